use std::fmt;

/// 抓取失败时写入计数和结论列的标记
pub const ERROR_SENTINEL: &str = "Error";

/// 名称列使用的分隔符
pub const NAME_SEPARATOR: &str = ", ";

/// 表格列号（从 1 开始）
pub mod columns {
    /// 个人主页 URL（只读）
    pub const URL: u32 = 3;
    /// 技能徽章数量
    pub const SKILL_COUNT: u32 = 7;
    /// 技能徽章名称
    pub const SKILL_NAMES: u32 = 8;
    /// 街机游戏数量
    pub const ARCADE_COUNT: u32 = 9;
    /// 街机游戏名称
    pub const ARCADE_NAMES: u32 = 10;
    /// 是否符合领奖条件
    pub const ELIGIBLE: u32 = 11;
}

/// 表头行号
pub const HEADER_ROW: u32 = 1;

/// 输出列的表头（仅在原表头为空时写入）
pub const HEADER_LABELS: [(u32, &str); 5] = [
    (columns::SKILL_COUNT, "# of Skill Badges"),
    (columns::SKILL_NAMES, "Names of Skill Badges"),
    (columns::ARCADE_COUNT, "# of Arcade Games"),
    (columns::ARCADE_NAMES, "Names of Completed Arcade Games"),
    (columns::ELIGIBLE, "Eligible for Goodies"),
];

/// 单元格的值
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 以文本形式取值，数字按整数显示
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) if n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            CellValue::Number(n) => Some(n.to_string()),
        }
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// 上一次运行留在计数列中的内容
#[derive(Debug, Clone, PartialEq)]
pub enum StoredCount {
    /// 空单元格
    Missing,
    /// 错误标记
    Error,
    /// 合法的整数
    Count(i64),
    /// 既不是数字也不是错误标记
    Malformed(String),
}

impl StoredCount {
    pub fn parse(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty => StoredCount::Missing,
            CellValue::Number(n) if n.is_finite() => StoredCount::Count(n.trunc() as i64),
            CellValue::Number(n) => StoredCount::Malformed(n.to_string()),
            CellValue::Text(s) if s.is_empty() => StoredCount::Missing,
            CellValue::Text(s) if s == ERROR_SENTINEL => StoredCount::Error,
            CellValue::Text(s) => match s.trim().parse::<i64>() {
                Ok(n) => StoredCount::Count(n),
                Err(_) => StoredCount::Malformed(s.clone()),
            },
        }
    }
}

/// 续跑模式读取到的历史进度
///
/// 空值和错误标记都按 0 处理（表示"尚未核实"）；
/// 任意一列无法解析时两列都按 0 处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredProgress {
    pub skills: i64,
    pub arcades: i64,
}

impl StoredProgress {
    pub fn from_cells(skill_cell: &CellValue, arcade_cell: &CellValue) -> Self {
        let to_count = |stored: StoredCount| match stored {
            StoredCount::Missing | StoredCount::Error => Some(0),
            StoredCount::Count(n) => Some(n),
            StoredCount::Malformed(_) => None,
        };

        match (
            to_count(StoredCount::parse(skill_cell)),
            to_count(StoredCount::parse(arcade_cell)),
        ) {
            (Some(skills), Some(arcades)) => Self { skills, arcades },
            _ => Self {
                skills: 0,
                arcades: 0,
            },
        }
    }

    /// 历史记录已满足领奖条件
    pub fn is_complete(&self, required_skills: usize) -> bool {
        self.skills == required_skills as i64 && self.arcades >= 1
    }
}

/// 领奖结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Eligible,
    NotEligible,
    /// 抓取失败，无法判断
    Error,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Eligible => "TRUE",
            Verdict::NotEligible => "FALSE",
            Verdict::Error => ERROR_SENTINEL,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
