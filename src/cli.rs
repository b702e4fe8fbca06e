//! 命令行参数
//!
//! 配置优先级：默认值 < TOML 文件 < 环境变量 < 命令行

use crate::config::{Config, RunMode};
use crate::error::AppResult;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "badge-verifier",
    about = "核验参与者公开主页上的技能徽章与街机游戏"
)]
pub struct Cli {
    /// TOML 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 运行模式
    #[arg(short, long, value_enum)]
    pub mode: Option<RunMode>,

    /// 输入工作簿
    #[arg(short, long)]
    pub input: Option<String>,

    /// 输出工作簿
    #[arg(short, long)]
    pub output: Option<String>,

    /// 逐条打印页面上找到的标题
    #[arg(short, long)]
    pub verbose: bool,

    /// 已匹配到街机目录的标题不再按原文重复计数
    #[arg(long)]
    pub dedup_arcade: bool,

    /// 抓取失败时清空名称列
    #[arg(long)]
    pub clear_names_on_error: bool,

    /// 不抓取页面，只根据结果工作簿更新排行榜
    #[arg(long)]
    pub leaderboard: bool,
}

impl Cli {
    /// 按优先级合并出最终配置
    pub fn load_config(&self) -> AppResult<Config> {
        let config = match &self.config {
            Some(path) => Config::from_toml_file(path)?.with_env_overrides(),
            None => Config::from_env(),
        };
        Ok(self.apply(config))
    }

    /// 命令行参数覆盖配置，未给出的参数保持原值
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        config.verbose_logging |= self.verbose;
        config.dedup_arcade_by_key |= self.dedup_arcade;
        config.clear_names_on_error |= self.clear_names_on_error;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_keeps_config() {
        let cli = Cli::try_parse_from(["badge-verifier"]).unwrap();
        let config = cli.apply(Config::default());
        assert_eq!(config.mode, RunMode::Full);
        assert_eq!(config.input_path, "B.xlsx");
        assert!(!config.verbose_logging);
        assert!(!cli.leaderboard);
    }

    #[test]
    fn leaderboard_flag_is_parsed() {
        let cli = Cli::try_parse_from(["badge-verifier", "--leaderboard", "-o", "H.xlsx"]).unwrap();
        assert!(cli.leaderboard);
        assert_eq!(cli.apply(Config::default()).output_path, "H.xlsx");
    }

    #[test]
    fn resume_run_reads_and_writes_same_workbook() {
        let cli = Cli::try_parse_from([
            "badge-verifier",
            "--mode",
            "resume",
            "-i",
            "H.xlsx",
            "-o",
            "H.xlsx",
            "--dedup-arcade",
        ])
        .unwrap();
        let config = cli.apply(Config::default());
        assert_eq!(config.mode, RunMode::Resume);
        assert_eq!(config.input_path, "H.xlsx");
        assert_eq!(config.output_path, "H.xlsx");
        assert!(config.dedup_arcade_by_key);
        assert!(!config.clear_names_on_error);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["badge-verifier", "-m", "partial"]).is_err());
    }

    #[test]
    fn config_file_is_loaded_before_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verifier.toml");
        std::fs::write(&path, "input_path = \"from_file.xlsx\"\nmax_delay_ms = 4000\n").unwrap();

        let cli = Cli::try_parse_from([
            "badge-verifier",
            "-c",
            path.to_str().unwrap(),
            "-o",
            "out.xlsx",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();

        assert_eq!(config.input_path, "from_file.xlsx");
        assert_eq!(config.output_path, "out.xlsx");
        assert_eq!(config.max_delay_ms, 4000);
    }
}
