//! Discord Integration for Laurel
//!
//! This crate wires the Laurel core to Discord: port implementations backed
//! by the Discord API, the gateway event handler, and the slash command glue.
//!
//! # Usage
//!
//! ```rust,ignore
//! use laurel_integration_discord::{run, DiscordConfig};
//!
//! let config = DiscordConfig::new("your-bot-token").with_data_path("data");
//! run(config).await?;
//! ```

mod client;
mod commands;
mod config;
mod directory;
mod gateway;

pub use client::DiscordClient;
pub use config::DiscordConfig;
pub use directory::{DiscordDirectory, DiscordGateway};
pub use gateway::GatewayHandler;

use std::sync::Arc;

use laurel::ports::directory::Directory;
use laurel::ports::gateway::{Notifier, RoleGranter};
use laurel::services::{CooldownTracker, JsonDataStore, ProgressionService};
use serenity::client::Client;
use serenity::model::gateway::GatewayIntents;

/// Build the core components and run the gateway until shutdown.
pub async fn run(config: DiscordConfig) -> Result<(), serenity::Error> {
    let client = Arc::new(DiscordClient::new(&config.token));
    let directory = Arc::new(DiscordDirectory::new(Arc::clone(&client)));
    let outbound = Arc::new(DiscordGateway::new(Arc::clone(&client)));

    let store = Arc::new(JsonDataStore::new(
        config.data_path.as_str(),
        Arc::clone(&directory) as Arc<dyn Directory>,
    ));
    let service = Arc::new(ProgressionService::new(
        Arc::clone(&store),
        Arc::clone(&outbound) as Arc<dyn RoleGranter>,
        outbound as Arc<dyn Notifier>,
        CooldownTracker::default(),
    ));

    let handler = GatewayHandler::new(config.clone(), store, service, directory);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let mut gateway = Client::builder(&config.token, intents)
        .event_handler(handler)
        .await?;

    gateway.start().await
}
