//! 工作簿存储 - 基础设施层
//!
//! 持有整本工作簿，只暴露"按行列读写单元格"的能力。
//! 运行开始时读入一次，所有行处理完后整体保存一次。

use crate::error::{AppError, AppResult, SheetError};
use crate::models::participant::CellValue;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::Spreadsheet;

/// 按行列（均从 1 开始）读写单元格的能力
pub trait SheetGrid {
    /// 最大已使用行号
    fn max_row(&self) -> u32;
    /// 最大已使用列号
    fn max_col(&self) -> u32;
    fn read(&self, row: u32, col: u32) -> CellValue;
    fn write(&mut self, row: u32, col: u32, value: CellValue);
}

/// 为空的表头单元格填入标签，已有内容的不动
///
/// # 返回
/// 返回实际写入的表头数量
pub fn seed_headers<G: SheetGrid + ?Sized>(grid: &mut G, header_row: u32, labels: &[(u32, &str)]) -> usize {
    let mut seeded = 0;
    for &(col, label) in labels {
        if grid.read(header_row, col).is_empty() {
            grid.write(header_row, col, CellValue::text(label));
            seeded += 1;
        }
    }
    seeded
}

/// xlsx 工作簿（操作第一个工作表）
pub struct XlsxWorkbook {
    book: Spreadsheet,
    sheet_index: usize,
}

impl XlsxWorkbook {
    /// 读取工作簿
    pub fn open(path: &Path) -> AppResult<Self> {
        let path_str = path.display().to_string();
        info!("📂 正在读取工作簿: {}", path_str);

        let book = umya_spreadsheet::reader::xlsx::read(path)
            .map_err(|e| AppError::sheet_open_failed(&path_str, e))?;

        if book.get_sheet(&0).is_none() {
            return Err(SheetError::NoWorksheet { path: path_str }.into());
        }

        Ok(Self {
            book,
            sheet_index: 0,
        })
    }

    /// 整本保存
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let path_str = path.display().to_string();
        umya_spreadsheet::writer::xlsx::write(&self.book, path)
            .map_err(|e| AppError::sheet_save_failed(&path_str, e))?;
        info!("💾 工作簿已保存: {}", path_str);
        Ok(())
    }
}

impl SheetGrid for XlsxWorkbook {
    fn max_row(&self) -> u32 {
        self.book
            .get_sheet(&self.sheet_index)
            .map(|sheet| sheet.get_highest_row())
            .unwrap_or(0)
    }

    fn max_col(&self) -> u32 {
        self.book
            .get_sheet(&self.sheet_index)
            .map(|sheet| sheet.get_highest_column())
            .unwrap_or(0)
    }

    fn read(&self, row: u32, col: u32) -> CellValue {
        let Some(cell) = self
            .book
            .get_sheet(&self.sheet_index)
            .and_then(|sheet| sheet.get_cell((col, row)))
        else {
            return CellValue::Empty;
        };

        let text = cell.get_value();
        if text.is_empty() {
            return CellValue::Empty;
        }
        match cell.get_value_number() {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(text.into_owned()),
        }
    }

    fn write(&mut self, row: u32, col: u32, value: CellValue) {
        let Some(sheet) = self.book.get_sheet_mut(&self.sheet_index) else {
            return;
        };
        let cell = sheet.get_cell_mut((col, row));
        match value {
            CellValue::Empty => {
                cell.set_value_string("");
            }
            CellValue::Text(text) => {
                cell.set_value_string(text);
            }
            CellValue::Number(n) => {
                cell.set_value_number(n);
            }
        }
        debug!("写入单元格 ({}, {})", row, col);
    }
}

/// 内存中的表格，用于预览和测试
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    cells: BTreeMap<(u32, u32), CellValue>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SheetGrid for MemoryGrid {
    fn max_row(&self) -> u32 {
        self.cells.keys().map(|&(row, _)| row).max().unwrap_or(0)
    }

    fn max_col(&self) -> u32 {
        self.cells.keys().map(|&(_, col)| col).max().unwrap_or(0)
    }

    fn read(&self, row: u32, col: u32) -> CellValue {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }

    fn write(&mut self, row: u32, col: u32, value: CellValue) {
        self.cells.insert((row, col), value);
    }
}
