use anyhow::Result;
use badge_verifier::{logger, update_leaderboard, App, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = cli.load_config()?;

    // 初始化日志
    logger::init(&config)?;

    if cli.leaderboard {
        config.validate()?;
        update_leaderboard(&config)?;
        return Ok(());
    }

    // 初始化并运行应用
    let _stats = App::initialize(config).await?.run().await?;

    Ok(())
}
