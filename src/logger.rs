//! 日志初始化
//!
//! 同时输出到终端和运行日志文件，级别由 `RUST_LOG` 控制。

use crate::config::Config;
use crate::utils::logging::init_log_file;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init(config: &Config) -> Result<()> {
    init_log_file(&config.output_log_file)
        .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

    let log_file = OpenOptions::new()
        .append(true)
        .open(&config.output_log_file)
        .with_context(|| format!("无法打开日志文件: {}", config.output_log_file))?;

    let default_directive = if config.verbose_logging {
        "info,badge_verifier=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .try_init()
        .context("日志系统已初始化")?;

    Ok(())
}
