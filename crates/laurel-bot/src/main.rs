//! Laurel bot entrypoint
//!
//! Reads configuration from the environment, wires the core components, and
//! runs the Discord gateway until the process is stopped.

use anyhow::Context;
use laurel_integration_discord::DiscordConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,laurel=debug".into()),
        )
        .init();

    let token = std::env::var("DISCORD_TOKEN")
        .context("You must set the DISCORD_TOKEN environment variable.")?;
    let data_path = std::env::var("LAUREL_DATA").unwrap_or_else(|_| "data".to_string());

    let config = DiscordConfig::new(token).with_data_path(&data_path);
    info!(data_path = %data_path, "Starting Laurel");

    laurel_integration_discord::run(config)
        .await
        .context("Gateway terminated with an error")
}
