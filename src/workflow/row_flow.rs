//! 行处理流程 - 流程层
//!
//! 核心职责：定义"一行参与者"的完整处理流程
//!
//! 流程顺序：
//! 1. 读取 URL，没有 URL 直接跳过
//! 2. 续跑模式下检查历史进度，已达标则跳过
//! 3. 抓取主页 → 提取标题 → 匹配目录 → 汇总结论
//! 4. 写回五个输出列；抓取失败则写入错误标记

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::clients::ProfileFetcher;
use crate::config::{Config, RunMode};
use crate::error::{AppResult, FetchError};
use crate::infrastructure::{SheetGrid, TitleExtractor};
use crate::models::evidence::{Eligibility, Extraction};
use crate::models::participant::{columns, CellValue, StoredProgress, Verdict, ERROR_SENTINEL};
use crate::services::{aggregate, Catalog, FailedRowWriter, MatchingService};
use crate::workflow::row_ctx::RowCtx;

/// 行处理结果
#[derive(Debug)]
pub enum RowOutcome {
    /// 已抓取并写回五列
    Updated(Eligibility),
    /// 续跑模式下历史记录已达标，未抓取
    SkippedComplete(StoredProgress),
    /// 没有 URL
    SkippedNoUrl,
    /// 抓取失败，已写入错误标记
    Failed(FetchError),
}

/// 行处理流程
///
/// - 编排单行的完整处理流程
/// - 不持有工作簿，由调用方传入
/// - 同一个流程对象被所有行复用
pub struct RowFlow {
    fetcher: Box<dyn ProfileFetcher>,
    extractor: TitleExtractor,
    matcher: MatchingService,
    failed_writer: Option<FailedRowWriter>,
    mode: RunMode,
    clear_names_on_error: bool,
    verbose_logging: bool,
}

impl RowFlow {
    /// 创建新的行处理流程
    pub fn new(
        config: &Config,
        catalog: Arc<Catalog>,
        fetcher: Box<dyn ProfileFetcher>,
    ) -> AppResult<Self> {
        Ok(Self {
            fetcher,
            extractor: TitleExtractor::new(&config.title_selector)?,
            matcher: MatchingService::new(catalog, config),
            failed_writer: config
                .failed_rows_file
                .as_deref()
                .map(|path| FailedRowWriter::with_path(path)),
            mode: config.mode,
            clear_names_on_error: config.clear_names_on_error,
            verbose_logging: config.verbose_logging,
        })
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    fn required_skills(&self) -> usize {
        self.matcher.catalog().required_skills()
    }

    pub async fn run<G: SheetGrid + ?Sized>(&self, grid: &mut G, row: u32) -> RowOutcome {
        let Some(url) = read_url(grid, row) else {
            debug!("[行 {}] 没有 URL，跳过", row);
            return RowOutcome::SkippedNoUrl;
        };
        let ctx = RowCtx::new(row, url);

        // ========== 续跑：已达标的行不再请求 ==========
        if self.mode == RunMode::Resume {
            let progress = StoredProgress::from_cells(
                &grid.read(row, columns::SKILL_COUNT),
                &grid.read(row, columns::ARCADE_COUNT),
            );
            if progress.is_complete(self.required_skills()) {
                info!(
                    "{} ✅ 已完成 (技能徽章={}, 街机游戏={})，跳过",
                    ctx, progress.skills, progress.arcades
                );
                return RowOutcome::SkippedComplete(progress);
            }
        }

        info!("{} 🌐 正在抓取: {}", ctx, ctx.url);

        let body = match self.fetcher.fetch(&ctx.url).await {
            Ok(body) => body,
            Err(e) => {
                error!("{} ❌ 抓取失败: {}", ctx, e);
                write_failure(grid, row, self.clear_names_on_error);
                self.record_failure(&ctx, &e);
                return RowOutcome::Failed(e);
            }
        };

        let (extraction, eligibility) = self.evaluate(&ctx, &body);
        write_success(grid, row, &extraction, &eligibility);

        info!(
            "{} → 技能徽章: {} | 街机游戏: {} | 符合条件: {}",
            ctx, eligibility.skill_count, eligibility.arcade_count, eligibility.verdict
        );

        RowOutcome::Updated(eligibility)
    }

    /// 从页面 HTML 计算匹配结果与结论
    pub fn evaluate(&self, ctx: &RowCtx, body: &str) -> (Extraction, Eligibility) {
        let fragments = self.extractor.extract(body);

        if fragments.is_empty() {
            warn!("{} ⚠️ 页面上没有找到徽章标题", ctx);
        } else if self.verbose_logging {
            info!("{} 找到 {} 个标题:", ctx, fragments.len());
            for fragment in &fragments {
                info!("{}   - {}", ctx, fragment);
            }
        }

        let extraction = self.matcher.classify(&fragments);
        let eligibility = aggregate(&extraction, self.required_skills());
        (extraction, eligibility)
    }

    fn record_failure(&self, ctx: &RowCtx, err: &FetchError) {
        let Some(writer) = &self.failed_writer else {
            return;
        };
        if let Err(e) = writer.write(ctx.row, &ctx.url, &err.to_string()) {
            warn!("{} ⚠️ 无法写入失败记录 {}: {}", ctx, writer.path(), e);
        }
    }
}

/// 读取 URL 列，空白视为没有 URL
fn read_url<G: SheetGrid + ?Sized>(grid: &G, row: u32) -> Option<String> {
    grid.read(row, columns::URL)
        .as_text()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// 写回五个输出列
pub fn write_success<G: SheetGrid + ?Sized>(
    grid: &mut G,
    row: u32,
    extraction: &Extraction,
    eligibility: &Eligibility,
) {
    grid.write(row, columns::SKILL_COUNT, eligibility.skill_count.into());
    grid.write(row, columns::SKILL_NAMES, extraction.skill_names().into());
    grid.write(row, columns::ARCADE_COUNT, eligibility.arcade_count.into());
    grid.write(row, columns::ARCADE_NAMES, extraction.arcade_names().into());
    grid.write(row, columns::ELIGIBLE, eligibility.verdict.as_str().into());
}

/// 抓取失败：计数与结论列写入错误标记
///
/// 名称列默认保留上一次的内容，`clear_names` 为真时清空
pub fn write_failure<G: SheetGrid + ?Sized>(grid: &mut G, row: u32, clear_names: bool) {
    grid.write(row, columns::SKILL_COUNT, ERROR_SENTINEL.into());
    grid.write(row, columns::ARCADE_COUNT, ERROR_SENTINEL.into());
    grid.write(row, columns::ELIGIBLE, Verdict::Error.as_str().into());

    if clear_names {
        grid.write(row, columns::SKILL_NAMES, CellValue::Empty);
        grid.write(row, columns::ARCADE_NAMES, CellValue::Empty);
    }
}
