//! 排行榜存储 - 基础设施层
//!
//! - 从结果工作簿中按表头读出每位参与者的成绩
//! - 读写 JSON 排行榜文件

use crate::error::{AppResult, LeaderboardError};
use crate::infrastructure::sheet_store::SheetGrid;
use crate::models::participant::{columns, CellValue};
use crate::services::leaderboard::{LeaderboardEntry, Standing};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// 表头归一化：小写后只保留字母和数字
fn header_key(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// 参与者成绩所在的列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StandingColumns {
    name: Option<u32>,
    completed: u32,
    arcade: Option<u32>,
    eligible: Option<u32>,
}

impl StandingColumns {
    fn locate<G: SheetGrid + ?Sized>(grid: &G, header_row: u32) -> Self {
        let headers: Vec<(u32, String)> = (1..=grid.max_col())
            .filter_map(|col| {
                grid.read(header_row, col)
                    .as_text()
                    .map(|label| (col, header_key(&label)))
            })
            .collect();
        let find = |pred: fn(&str) -> bool| {
            headers
                .iter()
                .find(|(_, key)| pred(key.as_str()))
                .map(|(col, _)| *col)
        };

        Self {
            name: find(|k| k == "username").or_else(|| find(|k| k == "name")),
            completed: find(|k| k.starts_with("ofskillbadges")).unwrap_or(columns::SKILL_COUNT),
            arcade: find(|k| k.contains("arcade")),
            eligible: find(|k| k == "eligibleforgoodies"),
        }
    }
}

/// `"12"`、`"12/19"`、`12` 都读作 12，其余读作 0
fn completed_paths(cell: &CellValue) -> u32 {
    let Some(text) = cell.as_text() else {
        return 0;
    };
    let head = text.split('/').next().unwrap_or_default().trim();
    match head.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n as u32,
        _ => 0,
    }
}

/// 街机列为 "yes" 或不小于 1 的数字
fn has_arcade(cell: &CellValue) -> bool {
    let Some(text) = cell.as_text() else {
        return false;
    };
    let text = text.trim().to_lowercase();
    text == "yes" || text.parse::<f64>().is_ok_and(|n| n >= 1.0)
}

/// 读出表头以下每个非空行的成绩
pub fn read_standings<G: SheetGrid + ?Sized>(grid: &G, header_row: u32) -> Vec<Standing> {
    let cols = StandingColumns::locate(grid, header_row);
    debug!("排行榜列定位: {:?}", cols);

    let max_col = grid.max_col();
    let cell = |row: u32, col: Option<u32>| col.map(|c| grid.read(row, c)).unwrap_or_default();

    ((header_row + 1)..=grid.max_row())
        .filter(|&row| (1..=max_col).any(|col| !grid.read(row, col).is_empty()))
        .enumerate()
        .map(|(sheet_index, row)| Standing {
            name: cell(row, cols.name)
                .as_text()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            completed_paths: completed_paths(&grid.read(row, cols.completed)),
            arcade_games: has_arcade(&cell(row, cols.arcade)),
            eligible_for_goodies: cell(row, cols.eligible)
                .as_text()
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            sheet_index,
        })
        .collect()
}

/// 读取上一次的排行榜，文件不存在时视为空
pub fn load_entries(path: &Path) -> AppResult<Vec<LeaderboardEntry>> {
    let path_str = path.display().to_string();
    if !path.exists() {
        info!("📭 没有找到上一次的排行榜: {}", path_str);
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|source| LeaderboardError::ReadFailed {
        path: path_str.clone(),
        source,
    })?;
    let entries: Vec<LeaderboardEntry> =
        serde_json::from_str(&content).map_err(|source| LeaderboardError::ParseFailed {
            path: path_str.clone(),
            source,
        })?;

    info!("📂 已读取上一次的排行榜: {} 条 ({})", entries.len(), path_str);
    Ok(entries)
}

/// 整体写入排行榜
pub fn save_entries(path: &Path, entries: &[LeaderboardEntry]) -> AppResult<()> {
    let path_str = path.display().to_string();
    let json = serde_json::to_string_pretty(entries).map_err(LeaderboardError::SerializeFailed)?;
    fs::write(path, json).map_err(|source| LeaderboardError::WriteFailed {
        path: path_str.clone(),
        source,
    })?;
    info!("💾 排行榜已保存: {}", path_str);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::infrastructure::MemoryGrid;

    fn sheet() -> MemoryGrid {
        let mut grid = MemoryGrid::new();
        for (col, label) in [
            (1, "User Name"),
            (3, "Profile URL"),
            (7, "# of Skill Badges Completed"),
            (9, "# of Arcade Games"),
            (10, "Names of Completed Arcade Games"),
            (11, "Eligible for Goodies"),
        ] {
            grid.write(1, col, CellValue::text(label));
        }
        grid
    }

    #[test]
    fn standings_follow_header_labels() {
        let mut grid = sheet();
        grid.write(2, 1, CellValue::text("Asha"));
        grid.write(2, 7, CellValue::Number(19.0));
        grid.write(2, 9, CellValue::Number(2.0));
        grid.write(2, 11, CellValue::text("TRUE"));
        // 空行不计入表格顺序
        grid.write(4, 1, CellValue::text("Ravi"));
        grid.write(4, 7, CellValue::text("7/19"));
        grid.write(4, 9, CellValue::text("Error"));
        grid.write(5, 3, CellValue::text("https://example.com/p/5"));
        grid.write(5, 7, CellValue::text("Error"));

        let standings = read_standings(&grid, 1);

        assert_eq!(standings.len(), 3);
        assert_eq!(standings[0].name, "Asha");
        assert_eq!(standings[0].completed_paths, 19);
        assert!(standings[0].arcade_games);
        assert!(standings[0].eligible_for_goodies);

        assert_eq!(standings[1].name, "Ravi");
        assert_eq!(standings[1].completed_paths, 7);
        assert_eq!(standings[1].sheet_index, 1);
        assert!(!standings[1].arcade_games);
        assert!(!standings[1].eligible_for_goodies);

        assert_eq!(standings[2].name, "Unknown");
        assert_eq!(standings[2].completed_paths, 0);
    }

    #[test]
    fn seeded_count_header_is_recognised() {
        let mut grid = MemoryGrid::new();
        grid.write(1, 2, CellValue::text("Name"));
        grid.write(1, 8, CellValue::text("# of Skill Badges"));
        grid.write(2, 2, CellValue::text("Mei"));
        grid.write(2, 8, CellValue::Number(11.0));

        let standings = read_standings(&grid, 1);

        assert_eq!(standings[0].name, "Mei");
        assert_eq!(standings[0].completed_paths, 11);
    }

    #[test]
    fn entries_survive_a_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        assert!(load_entries(&path).unwrap().is_empty());

        let entries = vec![LeaderboardEntry {
            name: "Asha".to_string(),
            rank: 1,
            completed_paths: 19,
            total_paths: 19,
            arcade_games: true,
            eligible_for_goodies: true,
            last_completed_at: Some("2025-10-01T12:00:00.000Z".to_string()),
            locked: true,
            updated_at: None,
        }];
        save_entries(&path, &entries).unwrap();

        assert_eq!(load_entries(&path).unwrap(), entries);
    }

    #[test]
    fn corrupt_leaderboard_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_entries(&path),
            Err(AppError::Leaderboard(LeaderboardError::ParseFailed { .. }))
        ));
    }
}
