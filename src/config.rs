use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// 全量：每一行有 URL 就抓取
    Full,
    /// 续跑：已经达标的行直接跳过
    Resume,
}

impl RunMode {
    pub fn name(self) -> &'static str {
        match self {
            RunMode::Full => "full",
            RunMode::Resume => "resume",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RunMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(RunMode::Full),
            "resume" => Ok(RunMode::Resume),
            other => Err(AppError::invalid_config("mode", other, "只能是 full 或 resume")),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 运行模式
    pub mode: RunMode,
    /// 输入工作簿路径
    pub input_path: String,
    /// 输出工作簿路径
    pub output_path: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 徽章标题元素的 CSS 选择器
    pub title_selector: String,
    /// 两次请求之间的最短间隔（毫秒）
    pub min_delay_ms: u64,
    /// 两次请求之间的最长间隔（毫秒）
    pub max_delay_ms: u64,
    /// 是否显示详细日志（逐条打印页面上找到的标题）
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 抓取失败的行写入的文件，为空则不写
    pub failed_rows_file: Option<String>,
    /// 兜底规则找到的街机原文，若该标题已匹配到街机目录条目则不再单独计数
    pub dedup_arcade_by_key: bool,
    /// 抓取失败时是否清空两列名称
    pub clear_names_on_error: bool,
    /// 排行榜文件（JSON），既是上一次的排名来源，也是本次的输出
    pub leaderboard_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: RunMode::Full,
            input_path: "B.xlsx".to_string(),
            output_path: "H.xlsx".to_string(),
            request_timeout_secs: 15,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
            title_selector: "span.ql-title-medium.l-mts".to_string(),
            min_delay_ms: 1500,
            max_delay_ms: 3000,
            verbose_logging: false,
            output_log_file: "run_log.txt".to_string(),
            failed_rows_file: Some("failed_rows.txt".to_string()),
            dedup_arcade_by_key: false,
            clear_names_on_error: false,
            leaderboard_file: "leaderboard.json".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取 TOML 配置文件，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: String::new(),
            source,
        })?;
        Ok(config)
    }

    /// 用环境变量覆盖已有配置，无法解析的值保持原值
    pub fn with_env_overrides(self) -> Self {
        let current = self;
        Config {
            mode: env_parse("RUN_MODE").unwrap_or(current.mode),
            input_path: std::env::var("INPUT_PATH").unwrap_or(current.input_path),
            output_path: std::env::var("OUTPUT_PATH").unwrap_or(current.output_path),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS")
                .unwrap_or(current.request_timeout_secs),
            user_agent: std::env::var("USER_AGENT").unwrap_or(current.user_agent),
            title_selector: std::env::var("TITLE_SELECTOR").unwrap_or(current.title_selector),
            min_delay_ms: env_parse("MIN_DELAY_MS").unwrap_or(current.min_delay_ms),
            max_delay_ms: env_parse("MAX_DELAY_MS").unwrap_or(current.max_delay_ms),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(current.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(current.output_log_file),
            failed_rows_file: match std::env::var("FAILED_ROWS_FILE") {
                Ok(v) if v.trim().is_empty() => None,
                Ok(v) => Some(v),
                Err(_) => current.failed_rows_file,
            },
            dedup_arcade_by_key: env_parse("DEDUP_ARCADE_BY_KEY")
                .unwrap_or(current.dedup_arcade_by_key),
            clear_names_on_error: env_parse("CLEAR_NAMES_ON_ERROR")
                .unwrap_or(current.clear_names_on_error),
            leaderboard_file: std::env::var("LEADERBOARD_FILE").unwrap_or(current.leaderboard_file),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> AppResult<()> {
        if self.input_path.trim().is_empty() {
            return Err(AppError::invalid_config("input_path", "", "路径不能为空"));
        }
        if self.output_path.trim().is_empty() {
            return Err(AppError::invalid_config("output_path", "", "路径不能为空"));
        }
        if self.leaderboard_file.trim().is_empty() {
            return Err(AppError::invalid_config("leaderboard_file", "", "路径不能为空"));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::invalid_config(
                "request_timeout_secs",
                self.request_timeout_secs,
                "超时必须大于 0",
            ));
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(AppError::invalid_config(
                "min_delay_ms",
                self.min_delay_ms,
                format!("不能大于 max_delay_ms ({})", self.max_delay_ms),
            ));
        }
        if let Err(e) = scraper::Selector::parse(&self.title_selector) {
            return Err(AppError::Config(ConfigError::InvalidSelector {
                selector: self.title_selector.clone(),
                message: e.to_string(),
            }));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.mode, RunMode::Full);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.leaderboard_file, "leaderboard.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_given_fields() {
        let config = Config::from_toml_str(
            r#"
            mode = "resume"
            input_path = "H.xlsx"
            max_delay_ms = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, RunMode::Resume);
        assert_eq!(config.input_path, "H.xlsx");
        assert_eq!(config.output_path, "H.xlsx");
        assert_eq!(config.min_delay_ms, 1500);
        assert_eq!(config.max_delay_ms, 5000);
    }

    #[test]
    fn broken_toml_is_a_config_error() {
        let err = Config::from_toml_str("mode = ").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::TomlParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_inverted_delay() {
        let config = Config {
            min_delay_ms: 4000,
            max_delay_ms: 1000,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let config = Config {
            title_selector: "span[".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::Config(ConfigError::InvalidSelector { .. }))
        ));
    }

    #[test]
    fn run_mode_parses_case_insensitively() {
        assert_eq!("Resume".parse::<RunMode>().unwrap(), RunMode::Resume);
        assert_eq!(" full ".parse::<RunMode>().unwrap(), RunMode::Full);
        assert!("partial".parse::<RunMode>().is_err());
    }
}
