/// 徽章匹配服务
///
/// 负责把页面上找到的标题文本归类为技能徽章或街机游戏
use crate::config::Config;
use crate::models::evidence::Extraction;
use crate::services::normalizer::{normalize, Catalog};
use std::sync::Arc;
use tracing::debug;

/// 兜底规则：归一化文本包含这些词即视为街机游戏
const ARCADE_HINTS: [&str; 2] = ["arcade", "game"];

/// 徽章匹配服务
#[derive(Debug, Clone)]
pub struct MatchingService {
    catalog: Arc<Catalog>,
    dedup_arcade_by_key: bool,
}

impl MatchingService {
    /// 创建新的匹配服务
    pub fn new(catalog: Arc<Catalog>, config: &Config) -> Self {
        Self {
            catalog,
            dedup_arcade_by_key: config.dedup_arcade_by_key,
        }
    }

    /// 使用默认规则（兜底原文单独计数）
    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            dedup_arcade_by_key: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 对页面上所有标题逐条归类
    ///
    /// 归一化后为空的标题（纯空白或纯符号）直接跳过，其余每条依次经过：
    /// 1. 技能徽章：精确匹配，未命中则双向包含匹配
    /// 2. 街机游戏：同上
    /// 3. 兜底：归一化文本含 "arcade" 或 "game" 时，把原始标题本身记为街机游戏
    pub fn classify<S: AsRef<str>>(&self, fragments: &[S]) -> Extraction {
        let mut extraction = Extraction::default();

        for fragment in fragments {
            let raw = fragment.as_ref();
            let key = normalize(raw);
            if key.is_empty() {
                debug!("标题归一化后为空，跳过: {:?}", raw);
                continue;
            }

            for entry in self.catalog.skills().lookup(&key) {
                extraction.skills.insert(entry.to_string());
            }

            let arcade_hits = self.catalog.arcades().lookup(&key);
            let matched_catalog_arcade = !arcade_hits.is_empty();
            for entry in arcade_hits {
                extraction.arcades.insert(entry.to_string());
            }

            if ARCADE_HINTS.iter().any(|hint| key.contains(hint)) {
                if self.dedup_arcade_by_key && matched_catalog_arcade {
                    debug!("兜底街机标题已匹配目录条目，不再单独计数: {}", raw);
                } else {
                    extraction.arcades.insert(raw.to_string());
                }
            }
        }

        debug!(
            "匹配完成: 技能徽章 {} 个, 街机游戏 {} 个",
            extraction.skills.len(),
            extraction.arcades.len()
        );

        extraction
    }
}
