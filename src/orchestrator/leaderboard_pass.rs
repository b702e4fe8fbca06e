//! 排行榜更新 - 编排层
//!
//! 读取核验结果工作簿和上一次的排行榜，重新排名后整体写回排行榜文件。
//! 不抓取任何页面。

use crate::config::Config;
use crate::infrastructure::{load_entries, read_standings, save_entries, XlsxWorkbook};
use crate::models::catalog::SKILL_BADGES;
use crate::models::participant::HEADER_ROW;
use crate::services::leaderboard::{rank, Ranking};
use crate::utils::logging::log_leaderboard;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

/// 执行一次排行榜更新
pub fn update_leaderboard(config: &Config) -> Result<Ranking> {
    info!("🏁 开始更新排行榜");

    let workbook = XlsxWorkbook::open(Path::new(&config.output_path))
        .with_context(|| format!("无法打开结果工作簿: {}", config.output_path))?;
    let standings = read_standings(&workbook, HEADER_ROW);
    if standings.is_empty() {
        warn!("⚠️ 结果工作簿中没有参与者数据");
    }

    let leaderboard_path = Path::new(&config.leaderboard_file);
    let previous = load_entries(leaderboard_path).context("无法读取上一次的排行榜")?;

    let ranking = rank(&standings, &previous, SKILL_BADGES.len() as u32, Utc::now());

    save_entries(leaderboard_path, &ranking.entries).context("无法保存排行榜")?;
    log_leaderboard(&ranking, &config.leaderboard_file);

    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SheetGrid;
    use crate::models::participant::CellValue;

    #[test]
    fn second_update_keeps_finisher_lock() {
        let dir = tempfile::tempdir().unwrap();
        let sheet_path = dir.path().join("H.xlsx");
        let board_path = dir.path().join("leaderboard.json");

        let write_sheet = |rows: &[(&str, f64)]| {
            let mut book = umya_spreadsheet::new_file();
            let sheet = book.get_sheet_mut(&0).unwrap();
            sheet.get_cell_mut((1u32, 1u32)).set_value_string("User Name");
            sheet.get_cell_mut((7u32, 1u32)).set_value_string("# of Skill Badges");
            for (i, (name, count)) in rows.iter().enumerate() {
                let row = i as u32 + 2;
                sheet.get_cell_mut((1u32, row)).set_value_string(*name);
                sheet.get_cell_mut((7u32, row)).set_value_number(*count);
            }
            umya_spreadsheet::writer::xlsx::write(&book, &sheet_path).unwrap();
        };

        let config = Config {
            output_path: sheet_path.to_str().unwrap().to_string(),
            leaderboard_file: board_path.to_str().unwrap().to_string(),
            ..Config::default()
        };

        write_sheet(&[("ana", 12.0), ("bo", 19.0)]);
        let first = update_leaderboard(&config).unwrap();
        assert_eq!(first.entries[0].name, "bo");
        assert!(first.entries[0].locked);
        assert!(first.entries[0].last_completed_at.is_some());

        // ana 也完成了，但 bo 先完成，名次不变
        write_sheet(&[("ana", 19.0), ("bo", 19.0)]);
        let second = update_leaderboard(&config).unwrap();
        let names: Vec<_> = second.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["bo", "ana"]);
        assert_eq!(second.entries[0].last_completed_at, first.entries[0].last_completed_at);
        assert_eq!(second.locked_count(), 2);

        let saved = load_entries(&board_path).unwrap();
        assert_eq!(saved, second.entries);

        let reread = XlsxWorkbook::open(&sheet_path).unwrap();
        assert_eq!(reread.read(2, 7), CellValue::Number(19.0));
    }
}
