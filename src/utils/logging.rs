use crate::config::{Config, RunMode};
use crate::orchestrator::RunStats;
use crate::services::leaderboard::{LeaderboardEntry, Ranking};
use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use tracing::info;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n徽章核验日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 徽章核验模式: {}", config.mode);
    info!("📥 输入: {}", config.input_path);
    info!("📤 输出: {}", config.output_path);
    info!(
        "⏱️ 请求超时 {} 秒，行间等待 {}-{} 毫秒",
        config.request_timeout_secs, config.min_delay_ms, config.max_delay_ms
    );
    info!("{}", "=".repeat(60));
}

/// 记录工作簿加载信息
///
/// # 参数
/// - `total`: 参与者行数
/// - `mode`: 运行模式
pub fn log_rows_loaded(total: usize, mode: RunMode) {
    info!("✓ 找到 {} 行参与者数据", total);
    if mode == RunMode::Resume {
        info!("💡 续跑模式：已达标的行将被跳过\n");
    } else {
        info!("💡 全量模式：每一行都会重新抓取\n");
    }
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &RunStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已更新: {}/{}", stats.updated, stats.total);
    info!("🏆 符合条件: {}", stats.eligible);
    info!("⏭️ 已达标跳过: {}", stats.skipped_complete);
    info!("➖ 无 URL: {}", stats.skipped_no_url);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", config.output_path);
    info!("日志已保存至: {}", config.output_log_file);
    if stats.failed > 0 {
        if let Some(path) = &config.failed_rows_file {
            info!("失败记录: {}", path);
        }
    }
}

/// 打印排行榜更新结果
///
/// # 参数
/// - `ranking`: 本次排名
/// - `leaderboard_file`: 排行榜文件路径
pub fn log_leaderboard(ranking: &Ranking, leaderboard_file: &str) {
    let line = |e: &LeaderboardEntry| {
        format!("{}. {} ({})", e.rank, e.name, e.completed_paths)
    };
    let total = ranking.entries.len();

    info!("\n{}", "=".repeat(60));
    info!("🏆 排行榜更新完成");
    info!("{}", "=".repeat(60));
    info!("🔒 已锁定: {} / 共 {} 人", ranking.locked_count(), total);
    if ranking.corrected() {
        info!("🔧 排序错误 {} 处，已严格重排", ranking.violations.len());
    }
    info!("前 8 名:");
    for entry in ranking.entries.iter().take(8) {
        info!("  {}", line(entry));
    }
    info!("后 8 名:");
    for entry in ranking.entries.iter().skip(total.saturating_sub(8)) {
        info!("  {}", line(entry));
    }
    info!("{}", "=".repeat(60));
    info!("\n排行榜已保存至: {}", leaderboard_file);
}
