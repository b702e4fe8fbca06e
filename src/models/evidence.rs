use crate::models::participant::{Verdict, NAME_SEPARATOR};
use std::collections::BTreeSet;

/// 单个页面的匹配结果
///
/// 集合内部自动去重并按字母顺序排列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub skills: BTreeSet<String>,
    pub arcades: BTreeSet<String>,
}

impl Extraction {
    pub fn skill_names(&self) -> String {
        join_names(&self.skills)
    }

    pub fn arcade_names(&self) -> String {
        join_names(&self.arcades)
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.arcades.is_empty()
    }
}

fn join_names(names: &BTreeSet<String>) -> String {
    names
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
}

/// 汇总后的计数与结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub skill_count: usize,
    pub arcade_count: usize,
    pub verdict: Verdict,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        self.verdict == Verdict::Eligible
    }
}
