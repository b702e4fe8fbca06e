//! 排行榜排名服务 - 业务能力层
//!
//! 只负责"根据本次表格数据和上一次的排行榜算出新排名"，不读写文件。
//!
//! 排名规则：
//! 1. 完成全部技能徽章的参与者被锁定，排在所有人之前
//!    - 上一次已锁定的保持原名次，其次按首次完成时间，最后按姓名
//! 2. 其余参与者按完成数降序，其次按上一次的锁定名次，最后按表格顺序
//! 3. 合并后若出现"完成数更多的人排在后面"，整体按完成数严格重排

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// 表格中一位参与者的当前成绩
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub completed_paths: u32,
    pub arcade_games: bool,
    pub eligible_for_goodies: bool,
    /// 在表格数据行中的顺序（从 0 开始，跳过空行）
    pub sheet_index: usize,
}

/// 排行榜中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub rank: usize,
    pub completed_paths: u32,
    pub total_paths: u32,
    pub arcade_games: bool,
    pub eligible_for_goodies: bool,
    /// 首次完成全部技能徽章的时间（RFC 3339）
    #[serde(default)]
    pub last_completed_at: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl LeaderboardEntry {
    fn finished(&self, total_paths: u32) -> bool {
        self.completed_paths == total_paths
    }
}

/// 排序错误：`lower_index` 处的人完成数少于排在其后的 `higher_index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingViolation {
    pub lower_index: usize,
    pub higher_index: usize,
}

/// 排名结果
#[derive(Debug, Clone)]
pub struct Ranking {
    pub entries: Vec<LeaderboardEntry>,
    /// 首次合并后发现的排序错误，非空表示已经严格重排
    pub violations: Vec<OrderingViolation>,
}

impl Ranking {
    pub fn corrected(&self) -> bool {
        !self.violations.is_empty()
    }

    pub fn locked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.locked).count()
    }
}

/// 排序过程中的参与者
struct Candidate<'a> {
    standing: &'a Standing,
    previous: Option<&'a LeaderboardEntry>,
    /// 仅上一次已锁定且已完成的人有名次，其余视为无穷大
    prev_rank: Option<usize>,
    first_completed: Option<DateTime<Utc>>,
    locked: bool,
}

impl<'a> Candidate<'a> {
    fn new(
        standing: &'a Standing,
        previous: &'a [LeaderboardEntry],
        total_paths: u32,
    ) -> Self {
        let prev = previous.iter().find(|p| p.name == standing.name);
        let prev_locked_and_complete = prev.is_some_and(|p| p.locked && p.finished(p.total_paths));
        let is_finisher = standing.completed_paths == total_paths;

        Self {
            standing,
            previous: prev,
            prev_rank: prev.filter(|_| prev_locked_and_complete).map(|p| p.rank),
            first_completed: prev
                .and_then(|p| p.last_completed_at.as_deref())
                .and_then(parse_timestamp),
            locked: prev_locked_and_complete || is_finisher,
        }
    }

    fn into_entry(self, rank: usize, total_paths: u32, now: &str) -> LeaderboardEntry {
        let was_finished = self.previous.is_some_and(|p| p.finished(total_paths));
        let is_finished = self.standing.completed_paths == total_paths;
        let last_completed_at = if is_finished && !was_finished {
            Some(now.to_string())
        } else {
            self.previous.and_then(|p| p.last_completed_at.clone())
        };

        LeaderboardEntry {
            name: self.standing.name.clone(),
            rank,
            completed_paths: self.standing.completed_paths,
            total_paths,
            arcade_games: self.standing.arcade_games,
            eligible_for_goodies: self.standing.eligible_for_goodies,
            last_completed_at,
            locked: self.locked,
            updated_at: Some(now.to_string()),
        }
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// `None` 视为无穷大
fn none_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn locked_order(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    none_last(&a.prev_rank, &b.prev_rank)
        .then_with(|| none_last(&a.first_completed, &b.first_completed))
        .then_with(|| a.standing.name.cmp(&b.standing.name))
}

/// 未锁定的排序规则，也是严格重排的规则
fn progress_order(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.standing
        .completed_paths
        .cmp(&a.standing.completed_paths)
        .then_with(|| none_last(&a.prev_rank, &b.prev_rank))
        .then_with(|| a.standing.sheet_index.cmp(&b.standing.sheet_index))
}

/// 找出排在前面、完成数却更少的位置
///
/// 每个位置只记录其后第一个完成数更多的人
pub fn find_ordering_violations(completed: &[u32]) -> Vec<OrderingViolation> {
    let mut violations = Vec::new();
    for (i, &current) in completed.iter().enumerate() {
        if let Some(offset) = completed[i + 1..].iter().position(|&later| later > current) {
            violations.push(OrderingViolation {
                lower_index: i,
                higher_index: i + 1 + offset,
            });
        }
    }
    violations
}

/// 计算新的排行榜
///
/// # 参数
/// - `standings`: 本次表格中的成绩
/// - `previous`: 上一次的排行榜，按姓名对应
/// - `total_paths`: 技能徽章总数
/// - `now`: 本次更新时间
pub fn rank(
    standings: &[Standing],
    previous: &[LeaderboardEntry],
    total_paths: u32,
    now: DateTime<Utc>,
) -> Ranking {
    let (mut locked, mut unlocked): (Vec<_>, Vec<_>) = standings
        .iter()
        .map(|s| Candidate::new(s, previous, total_paths))
        .partition(|c| c.locked);

    debug!("锁定 {} 人，未锁定 {} 人", locked.len(), unlocked.len());

    locked.sort_by(locked_order);
    unlocked.sort_by(progress_order);

    let mut merged = locked;
    merged.append(&mut unlocked);

    let completed: Vec<u32> = merged.iter().map(|c| c.standing.completed_paths).collect();
    let violations = find_ordering_violations(&completed);
    if violations.is_empty() {
        info!("✓ 排名顺序检查通过");
    } else {
        for v in violations.iter().take(5) {
            let lower = merged[v.lower_index].standing;
            let higher = merged[v.higher_index].standing;
            warn!(
                "⚠️ 排序错误: 第 {} 名 {} ({}) 排在第 {} 名 {} ({}) 之前",
                v.lower_index + 1,
                lower.name,
                lower.completed_paths,
                v.higher_index + 1,
                higher.name,
                higher.completed_paths
            );
        }
        merged.sort_by(progress_order);
        info!("🔧 已按完成数严格重排 ({} 处排序错误)", violations.len());
    }

    let now = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let entries = merged
        .into_iter()
        .enumerate()
        .map(|(i, c)| c.into_entry(i + 1, total_paths, &now))
        .collect();

    Ranking {
        entries,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TOTAL: u32 = 19;

    fn standing(name: &str, completed: u32, sheet_index: usize) -> Standing {
        Standing {
            name: name.to_string(),
            completed_paths: completed,
            arcade_games: false,
            eligible_for_goodies: false,
            sheet_index,
        }
    }

    fn previous(name: &str, rank: usize, completed: u32, locked: bool, at: Option<&str>) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            rank,
            completed_paths: completed,
            total_paths: TOTAL,
            arcade_games: false,
            eligible_for_goodies: false,
            last_completed_at: at.map(str::to_string),
            locked,
            updated_at: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    fn names(ranking: &Ranking) -> Vec<&str> {
        ranking.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn unlocked_sorted_by_count_then_sheet_order() {
        let standings = [
            standing("carol", 5, 0),
            standing("alice", 12, 1),
            standing("bob", 5, 2),
            standing("dave", 0, 3),
        ];

        let ranking = rank(&standings, &[], TOTAL, now());

        assert_eq!(names(&ranking), ["alice", "carol", "bob", "dave"]);
        assert_eq!(
            ranking.entries.iter().map(|e| e.rank).collect::<Vec<_>>(),
            [1, 2, 3, 4]
        );
        assert!(!ranking.corrected());
        assert_eq!(ranking.locked_count(), 0);
    }

    #[test]
    fn earlier_finishers_keep_their_rank() {
        // zoe 上一次以第 1 名锁定；amy 上一次第 2 名锁定；新完成的 ben 排在她们之后
        let prev = [
            previous("amy", 2, TOTAL, true, Some("2025-09-20T08:00:00.000Z")),
            previous("zoe", 1, TOTAL, true, Some("2025-09-10T08:00:00.000Z")),
            previous("ben", 5, 17, false, None),
        ];
        let standings = [
            standing("ben", TOTAL, 0),
            standing("amy", TOTAL, 1),
            standing("zoe", TOTAL, 2),
            standing("kim", 18, 3),
        ];

        let ranking = rank(&standings, &prev, TOTAL, now());

        assert_eq!(names(&ranking), ["zoe", "amy", "ben", "kim"]);
        assert_eq!(ranking.locked_count(), 3);
        assert!(!ranking.entries[3].locked);
    }

    #[test]
    fn new_finishers_ordered_by_completion_time_then_name() {
        // 上一次都未锁定：都没有锁定名次，按首次完成时间，再按姓名
        let prev = [
            previous("mia", 3, TOTAL, false, Some("2025-09-15T00:00:00Z")),
            previous("eve", 4, TOTAL, false, Some("2025-09-01T00:00:00Z")),
        ];
        let standings = [
            standing("mia", TOTAL, 0),
            standing("liz", TOTAL, 1),
            standing("eve", TOTAL, 2),
            standing("ann", TOTAL, 3),
        ];

        let ranking = rank(&standings, &prev, TOTAL, now());

        assert_eq!(names(&ranking), ["eve", "mia", "ann", "liz"]);
    }

    #[test]
    fn completion_time_is_stamped_once() {
        let prev = [
            previous("old", 1, TOTAL, true, Some("2025-09-01T00:00:00.000Z")),
            previous("new", 2, 18, false, None),
        ];
        let standings = [standing("old", TOTAL, 0), standing("new", TOTAL, 1), standing("slow", 3, 2)];

        let ranking = rank(&standings, &prev, TOTAL, now());

        let by_name = |n: &str| ranking.entries.iter().find(|e| e.name == n).unwrap();
        assert_eq!(
            by_name("old").last_completed_at.as_deref(),
            Some("2025-09-01T00:00:00.000Z")
        );
        assert_eq!(
            by_name("new").last_completed_at.as_deref(),
            Some("2025-10-01T12:00:00.000Z")
        );
        assert_eq!(by_name("slow").last_completed_at, None);
        assert_eq!(by_name("slow").updated_at.as_deref(), Some("2025-10-01T12:00:00.000Z"));
    }

    #[test]
    fn regressed_finisher_triggers_strict_resort() {
        // 上一次锁定的 sam 这次抓取失败（完成数为 0），仍被锁定排在最前
        let prev = [previous("sam", 1, TOTAL, true, Some("2025-09-01T00:00:00Z"))];
        let standings = [standing("sam", 0, 0), standing("ivy", 10, 1), standing("joe", 4, 2)];

        let ranking = rank(&standings, &prev, TOTAL, now());

        assert!(ranking.corrected());
        assert_eq!(
            ranking.violations,
            vec![OrderingViolation {
                lower_index: 0,
                higher_index: 1
            }]
        );
        assert_eq!(names(&ranking), ["ivy", "joe", "sam"]);
        assert_eq!(ranking.entries[2].rank, 3);
        assert!(ranking.entries[2].locked);
    }

    #[test]
    fn strict_resort_breaks_ties_by_previous_rank() {
        let prev = [
            previous("p2", 2, TOTAL, true, None),
            previous("p1", 1, TOTAL, true, None),
        ];
        let standings = [
            standing("p2", 3, 0),
            standing("p1", 3, 1),
            standing("fresh", 3, 2),
            standing("top", 8, 3),
        ];

        let ranking = rank(&standings, &prev, TOTAL, now());

        assert!(ranking.corrected());
        assert_eq!(names(&ranking), ["top", "p1", "p2", "fresh"]);
    }

    #[test]
    fn violations_record_first_higher_position() {
        assert!(find_ordering_violations(&[19, 10, 10, 2]).is_empty());
        assert_eq!(
            find_ordering_violations(&[3, 1, 5]),
            vec![
                OrderingViolation {
                    lower_index: 0,
                    higher_index: 2
                },
                OrderingViolation {
                    lower_index: 1,
                    higher_index: 2
                },
            ]
        );
        assert!(find_ordering_violations(&[]).is_empty());
    }

    #[test]
    fn entries_serialize_with_camel_case_keys() {
        let entry = previous("amy", 1, TOTAL, true, None);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"completedPaths\":19"));
        assert!(json.contains("\"lastCompletedAt\":null"));

        let parsed: LeaderboardEntry =
            serde_json::from_str(r#"{"name":"x","rank":3,"completedPaths":2,"totalPaths":19,"arcadeGames":true,"eligibleForGoodies":false}"#)
                .unwrap();
        assert!(!parsed.locked);
        assert_eq!(parsed.last_completed_at, None);
    }
}
