//! 领奖资格汇总
//!
//! 技能徽章必须恰好全部完成（等于目录大小），街机游戏至少完成一个。

use crate::models::evidence::{Eligibility, Extraction};
use crate::models::participant::Verdict;

/// 根据匹配结果计算计数与结论
pub fn aggregate(extraction: &Extraction, required_skills: usize) -> Eligibility {
    let skill_count = extraction.skills.len();
    let arcade_count = extraction.arcades.len();

    Eligibility {
        skill_count,
        arcade_count,
        verdict: verdict_for(skill_count, arcade_count, required_skills),
    }
}

pub fn verdict_for(skill_count: usize, arcade_count: usize, required_skills: usize) -> Verdict {
    if skill_count == required_skills && arcade_count >= 1 {
        Verdict::Eligible
    } else {
        Verdict::NotEligible
    }
}
