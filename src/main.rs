use anyhow::Result;
use playlist_summarizer::utils::logging;
use playlist_summarizer::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（缺少 YOUTUBE_API_KEY 等致命错误直接退出）
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
