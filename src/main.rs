use anyhow::Result;
use clap::Parser;
use dynamodb_movies::{config::Config, walkthrough};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    tracing::info!(
        region = %config.region,
        endpoint_url = %config.endpoint_url,
        table = %config.table_name,
        "starting walkthrough"
    );
    let client = config.client().await;
    walkthrough::run(&client, &config).await?;
    Ok(())
}
