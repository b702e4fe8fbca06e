//! 批量行处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责整张表的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、构建徽章目录、读取工作簿、创建 HTTP 客户端
//! 2. **表头补齐**：输出列表头为空时写入默认标签
//! 3. **顺序处理**：逐行调用 `RowFlow`，上一行写完才开始下一行
//! 4. **限速**：每成功处理一行后随机等待
//! 5. **整体保存**：所有行处理完后一次性保存工作簿
//! 6. **全局统计**：汇总所有行的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单行的细节
//! - **资源所有者**：唯一持有工作簿的模块
//! - **严格串行**：不并发请求，不做重试

use crate::clients::ProfileClient;
use crate::config::Config;
use crate::infrastructure::{seed_headers, SheetGrid, XlsxWorkbook};
use crate::models::participant::{HEADER_LABELS, HEADER_ROW};
use crate::orchestrator::throttle::Throttle;
use crate::services::Catalog;
use crate::utils::logging::{log_rows_loaded, log_startup, print_final_stats};
use crate::workflow::{RowFlow, RowOutcome};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    workbook: XlsxWorkbook,
    flow: RowFlow,
    throttle: Throttle,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置校验失败")?;

        log_startup(&config);

        // 目录只构建一次，所有行共用
        let catalog = Arc::new(Catalog::new().context("无法构建徽章目录")?);

        let workbook = XlsxWorkbook::open(Path::new(&config.input_path))
            .with_context(|| format!("无法打开输入工作簿: {}", config.input_path))?;

        let client = ProfileClient::new(&config).context("无法创建 HTTP 客户端")?;
        let flow = RowFlow::new(&config, catalog, Box::new(client))?;
        let throttle = Throttle::from_config(&config);

        Ok(Self {
            config,
            workbook,
            flow,
            throttle,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(mut self) -> Result<RunStats> {
        let seeded = seed_headers(&mut self.workbook, HEADER_ROW, &HEADER_LABELS);
        if seeded > 0 {
            info!("📝 已补齐 {} 个表头", seeded);
        }

        let total_rows = self.workbook.max_row().saturating_sub(HEADER_ROW);
        if total_rows == 0 {
            warn!("⚠️ 工作簿中没有参与者数据");
        }
        log_rows_loaded(total_rows as usize, self.flow.mode());

        // 处理所有行
        let stats = process_rows(&self.flow, &mut self.workbook, &self.throttle).await;

        // 整体保存
        let output = Path::new(&self.config.output_path);
        self.workbook
            .save(output)
            .with_context(|| format!("无法保存输出工作簿: {}", self.config.output_path))?;

        // 输出最终统计
        print_final_stats(&stats, &self.config);

        Ok(stats)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub updated: usize,
    pub eligible: usize,
    pub skipped_complete: usize,
    pub skipped_no_url: usize,
    pub failed: usize,
}

impl RunStats {
    fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Updated(eligibility) => {
                self.updated += 1;
                if eligibility.is_eligible() {
                    self.eligible += 1;
                }
            }
            RowOutcome::SkippedComplete(_) => self.skipped_complete += 1,
            RowOutcome::SkippedNoUrl => self.skipped_no_url += 1,
            RowOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// 按顺序处理表头以下的所有行
///
/// 只有成功抓取并写回的行之后才等待；跳过和失败的行直接进入下一行。
pub async fn process_rows<G: SheetGrid + ?Sized>(
    flow: &RowFlow,
    grid: &mut G,
    throttle: &Throttle,
) -> RunStats {
    let max_row = grid.max_row();
    let mut stats = RunStats {
        total: max_row.saturating_sub(HEADER_ROW) as usize,
        ..Default::default()
    };

    for row in (HEADER_ROW + 1)..=max_row {
        let outcome = flow.run(grid, row).await;
        stats.record(&outcome);

        if matches!(outcome, RowOutcome::Updated(_)) {
            throttle.pause().await;
        }
    }

    stats
}
