//! 行处理上下文
//!
//! 封装"我正在处理第几行、哪个主页"这一信息

use std::fmt::Display;

/// 行处理上下文
#[derive(Debug, Clone)]
pub struct RowCtx {
    /// 表格行号（从 2 开始，第 1 行为表头）
    pub row: u32,

    /// 个人主页 URL
    pub url: String,
}

impl RowCtx {
    pub fn new(row: u32, url: impl Into<String>) -> Self {
        Self {
            row,
            url: url.into(),
        }
    }
}

impl Display for RowCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[行 {}]", self.row)
    }
}
