//! Gateway event handler
//!
//! Translates serenity gateway events into core calls: guild messages become
//! activity events for the progression engine, interactions go to the command
//! dispatcher.

use std::sync::Arc;

use async_trait::async_trait;
use laurel::ports::gateway::ActivityEvent;
use laurel::services::{ActivityOutcome, JsonDataStore, ProgressionService};
use serenity::client::{Context, EventHandler};
use serenity::model::application::{Command, Interaction};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use tracing::{debug, error, info};

use crate::commands;
use crate::config::DiscordConfig;
use crate::directory::DiscordDirectory;

/// Shared bot state wired into serenity's event loop.
pub struct GatewayHandler {
    pub(crate) config: DiscordConfig,
    pub(crate) store: Arc<JsonDataStore>,
    pub(crate) service: Arc<ProgressionService<JsonDataStore>>,
    pub(crate) directory: Arc<DiscordDirectory>,
}

impl GatewayHandler {
    pub fn new(
        config: DiscordConfig,
        store: Arc<JsonDataStore>,
        service: Arc<ProgressionService<JsonDataStore>>,
        directory: Arc<DiscordDirectory>,
    ) -> Self {
        Self {
            config,
            store,
            service,
            directory,
        }
    }
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "Connected to Discord");

        if !self.config.register_commands {
            return;
        }

        for definition in commands::definitions() {
            if let Err(err) = Command::create_global_command(&ctx.http, definition).await {
                error!(error = %err, "Failed to register slash command");
            }
        }
    }

    async fn message(&self, _ctx: Context, message: Message) {
        // Only user messages inside a guild feed the progression engine.
        if message.author.bot {
            return;
        }

        let Some(guild_id) = message.guild_id else {
            return;
        };

        let event = ActivityEvent {
            user_id: message.author.id.get(),
            guild_id: guild_id.get(),
            channel_id: message.channel_id.get(),
        };

        match self.service.process_activity(event).await {
            Ok(ActivityOutcome::Accrued { profile, .. }) => {
                debug!(
                    user_id = event.user_id,
                    experience = profile.progress.experience,
                    "Processed activity event"
                );
            }
            Ok(ActivityOutcome::Throttled) => {}
            Err(err) => {
                error!(
                    user_id = event.user_id,
                    error = %err,
                    "Failed to process activity event"
                );
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            commands::dispatch(self, &ctx, &command).await;
        }
    }
}
