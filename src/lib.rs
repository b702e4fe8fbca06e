//! # Badge Verifier
//!
//! 一个用于核验活动参与者徽章完成情况的 Rust 应用程序
//!
//! 读取工作簿第 3 列的公开主页链接，抓取页面上的徽章标题，
//! 与 19 个技能徽章和 5 个街机游戏比对，把结果写回第 7-11 列。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `infrastructure/` - 持有工作簿，只暴露按行列读写的能力；读写排行榜文件
//! - `TitleExtractor` - 从 HTML 中提取徽章标题
//! - `clients/` - `ProfileFetcher` 抓取公开主页
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理一组标题
//! - `normalize` / `Catalog` - 标题归一化与目录索引
//! - `MatchingService` - 精确匹配 + 模糊匹配 + 街机兜底
//! - `aggregate` - 计数与结论
//! - `FailedRowWriter` - 写失败记录能力
//! - `leaderboard::rank` - 按完成数排名，锁定已完成者的名次
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一行参与者"的完整处理流程
//! - `RowCtx` - 上下文封装（行号 + URL）
//! - `RowFlow` - 流程编排（续跑检查 → 抓取 → 匹配 → 写回）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 逐行处理整张表，管理工作簿的读取与保存
//! - `orchestrator/leaderboard_pass` - 根据结果工作簿更新排行榜
//! - `orchestrator/throttle` - 行间随机等待
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use cli::Cli;
pub use clients::{ProfileClient, ProfileFetcher};
pub use config::{Config, RunMode};
pub use error::{AppError, AppResult, FetchError};
pub use infrastructure::{MemoryGrid, SheetGrid, XlsxWorkbook};
pub use models::{Eligibility, Extraction, Verdict};
pub use orchestrator::{process_rows, update_leaderboard, App, RunStats, Throttle};
pub use services::{Catalog, LeaderboardEntry, MatchingService, Ranking};
pub use workflow::{RowCtx, RowFlow, RowOutcome};
