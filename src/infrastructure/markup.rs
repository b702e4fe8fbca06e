//! 页面标题提取 - 基础设施层
//!
//! 只负责"从 HTML 中找出徽章标题文本"，不认识目录，也不做匹配

use crate::error::{AppResult, ConfigError};
use scraper::{ElementRef, Html, Selector};

/// 徽章标题提取器
///
/// 平台模板一旦改掉标题的 class，这里会安静地返回空列表
pub struct TitleExtractor {
    selector: Selector,
}

impl TitleExtractor {
    pub fn new(selector: &str) -> AppResult<Self> {
        let selector = Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { selector })
    }

    /// 按文档顺序返回每个标题元素的可见文本
    ///
    /// 各文本节点去掉首尾空白后用单个空格连接；没有可见文本的元素返回空字符串，
    /// 由匹配服务决定是否跳过。
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .map(element_text)
            .collect()
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
