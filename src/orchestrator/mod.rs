//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整张表的调度，是整个系统的"指挥中心"。
//!
//! ### `batch_processor` - 批量行处理器
//! - 管理应用生命周期（初始化、运行、保存）
//! - 逐行调度 `RowFlow`
//! - 输出全局统计信息
//!
//! ### `leaderboard_pass` - 排行榜更新
//! - 读取核验结果，按完成数重新排名并写回排行榜文件
//!
//! ### `throttle` - 请求限速
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理整张表)
//!     ↓
//! workflow::RowFlow (处理单行)
//!     ↓
//! services (能力层：归一化 / 匹配 / 汇总)
//!     ↓
//! infrastructure + clients (工作簿、HTML、HTTP)
//! ```

pub mod batch_processor;
pub mod leaderboard_pass;
pub mod throttle;

pub use batch_processor::{process_rows, App, RunStats};
pub use leaderboard_pass::update_leaderboard;
pub use throttle::Throttle;
