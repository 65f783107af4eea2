use clap::Parser;
use tracing_subscriber::EnvFilter;

use tic_tac_toe_web::config::Config;
use tic_tac_toe_web::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    server::run(config).await?;

    Ok(())
}
