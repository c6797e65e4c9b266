use anyhow::{Context, Result};
use fitness_server::config::ServerConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration from .env and environment variables
    let config = ServerConfig::load().context("Failed to load configuration")?;

    fitness_server::run(config).await.context("Server error")?;

    Ok(())
}
