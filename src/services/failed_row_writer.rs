//! 失败记录写入服务 - 业务能力层
//!
//! 只负责"把抓取失败的行追加到文件"这一能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 失败记录写入服务
///
/// 职责：
/// - 将抓取失败的行写入 failed_rows.txt，方便续跑前人工排查
/// - 只处理单行
pub struct FailedRowWriter {
    file_path: String,
}

impl FailedRowWriter {
    /// 使用指定文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.file_path
    }

    /// 追加一条失败记录
    ///
    /// # 参数
    /// - `row`: 行号
    /// - `url`: 个人主页 URL
    /// - `reason`: 失败原因
    pub fn write(&self, row: u32, url: &str, reason: &str) -> Result<()> {
        debug!("写入失败记录: 行 {} | {}", row, url);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        let line = format!(
            "{} | 行 {} | {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            row,
            url,
            reason.replace('\n', " ")
        );

        file.write_all(line.as_bytes())?;

        Ok(())
    }
}
