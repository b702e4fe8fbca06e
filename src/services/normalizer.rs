//! 目录归一化 - 业务能力层
//!
//! 把徽章标题归一化为匹配用的键，并在启动时为两个固定目录各建一份索引。
//! 目录只构建一次，之后以只读方式传给每一行的处理流程。

use crate::error::{AppResult, CatalogError};
use crate::models::catalog::{CatalogKind, ARCADE_GAMES, SKILL_BADGES};
use std::collections::HashMap;
use tracing::debug;

/// 把任意文本归一化为匹配键
///
/// 1. 全部转小写
/// 2. `:` `-` `–` `—` `/` 替换为空格
/// 3. 去掉除 `a-z` `0-9` 空格以外的字符
/// 4. 合并连续空白并去掉首尾空白
pub fn normalize(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        let ch = match ch {
            ':' | '-' | '\u{2013}' | '\u{2014}' | '/' => ' ',
            other => other,
        };
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == ' ' {
            kept.push(ch);
        }
    }
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 单个目录的归一化索引
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    by_key: HashMap<String, &'static str>,
    /// 保持目录原顺序，供模糊匹配遍历
    entries: Vec<(String, &'static str)>,
}

impl CatalogIndex {
    /// 构建索引，任意两个条目归一化后相同即报错
    pub fn build(kind: CatalogKind, items: &[&'static str]) -> AppResult<Self> {
        let mut by_key: HashMap<String, &'static str> = HashMap::with_capacity(items.len());
        let mut entries = Vec::with_capacity(items.len());

        for &item in items {
            let key = normalize(item);
            if key.is_empty() {
                return Err(CatalogError::EmptyKey {
                    kind: kind.name().to_string(),
                    entry: item.to_string(),
                }
                .into());
            }
            if let Some(first) = by_key.insert(key.clone(), item) {
                return Err(CatalogError::KeyCollision {
                    kind: kind.name().to_string(),
                    key,
                    first: first.to_string(),
                    second: item.to_string(),
                }
                .into());
            }
            debug!("目录索引 [{}] {} -> {}", kind, key, item);
            entries.push((key, item));
        }

        Ok(Self { by_key, entries })
    }

    /// 精确匹配
    pub fn exact(&self, key: &str) -> Option<&'static str> {
        self.by_key.get(key).copied()
    }

    /// 双向包含匹配：目录键包含在 `key` 中，或 `key` 包含在目录键中
    ///
    /// 一个标题可能同时命中多个条目，调用方按集合累加。
    pub fn fuzzy<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.entries
            .iter()
            .filter(move |(entry_key, _)| {
                !entry_key.is_empty()
                    && (key.contains(entry_key.as_str()) || entry_key.contains(key))
            })
            .map(|(_, entry)| *entry)
    }

    /// 先精确匹配，未命中时再模糊匹配
    pub fn lookup(&self, key: &str) -> Vec<&'static str> {
        match self.exact(key) {
            Some(entry) => vec![entry],
            None => self.fuzzy(key).collect(),
        }
    }
}

/// 两个固定目录
#[derive(Debug, Clone)]
pub struct Catalog {
    skills: CatalogIndex,
    arcades: CatalogIndex,
}

impl Catalog {
    /// 使用内置的技能徽章与街机游戏列表构建目录
    pub fn new() -> AppResult<Self> {
        Self::from_lists(&SKILL_BADGES, &ARCADE_GAMES)
    }

    pub fn from_lists(skills: &[&'static str], arcades: &[&'static str]) -> AppResult<Self> {
        Ok(Self {
            skills: CatalogIndex::build(CatalogKind::SkillBadge, skills)?,
            arcades: CatalogIndex::build(CatalogKind::ArcadeGame, arcades)?,
        })
    }

    pub fn skills(&self) -> &CatalogIndex {
        &self.skills
    }

    pub fn arcades(&self) -> &CatalogIndex {
        &self.arcades
    }

    /// 达标所需的技能徽章数量（等于目录大小）
    pub fn required_skills(&self) -> usize {
        self.skills.entries.len()
    }
}
