//! Port implementations backed by the Discord API
//!
//! `DiscordDirectory` resolves stored snowflakes into live handles;
//! `DiscordGateway` carries the outbound role-grant and notification
//! capabilities. Lookup failures are soft: they log and resolve to `None`,
//! matching the directory contract.

use std::sync::Arc;

use async_trait::async_trait;
use laurel::domain::entities::UserProfile;
use laurel::domain::errors::DomainError;
use laurel::domain::value_objects::{GuildHandle, RoleHandle, UserHandle};
use laurel::ports::directory::Directory;
use laurel::ports::gateway::{Notifier, RoleGranter};
use serenity::model::id::RoleId;
use tracing::{debug, warn};

use crate::client::DiscordClient;

/// Discord-backed id-to-descriptor resolution.
pub struct DiscordDirectory {
    client: Arc<DiscordClient>,
}

impl DiscordDirectory {
    pub fn new(client: Arc<DiscordClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Directory for DiscordDirectory {
    async fn user(&self, user_id: u64) -> Option<UserHandle> {
        match self.client.get_user(user_id).await {
            Ok(user) => Some(UserHandle::new(user_id, user.name)),
            Err(err) => {
                warn!(user_id, error = %err, "Failed to resolve user");
                None
            }
        }
    }

    async fn guild(&self, guild_id: u64) -> Option<GuildHandle> {
        match self.client.get_guild(guild_id).await {
            Ok(guild) => Some(GuildHandle::new(guild_id, guild.name)),
            Err(err) => {
                warn!(guild_id, error = %err, "Failed to resolve guild");
                None
            }
        }
    }

    async fn role(&self, guild_id: u64, role_id: u64) -> Option<RoleHandle> {
        let guild = match self.client.get_guild(guild_id).await {
            Ok(guild) => guild,
            Err(err) => {
                warn!(guild_id, error = %err, "Failed to resolve guild for role lookup");
                return None;
            }
        };

        let role = guild.roles.get(&RoleId::new(role_id))?;
        Some(RoleHandle::new(role_id, role.name.clone()))
    }

    async fn member_roles(&self, guild_id: u64, user_id: u64) -> Option<Vec<u64>> {
        match self.client.get_member(guild_id, user_id).await {
            Ok(member) => Some(member.roles.iter().map(|role| role.get()).collect()),
            Err(err) => {
                warn!(guild_id, user_id, error = %err, "Failed to resolve member");
                None
            }
        }
    }
}

/// Discord-backed outbound capabilities.
pub struct DiscordGateway {
    client: Arc<DiscordClient>,
}

impl DiscordGateway {
    pub fn new(client: Arc<DiscordClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleGranter for DiscordGateway {
    async fn grant(&self, guild_id: u64, user_id: u64, roles: &[u64]) -> Result<(), DomainError> {
        // A member that no longer resolves is skipped, not surfaced as an error.
        if self.client.get_member(guild_id, user_id).await.is_err() {
            warn!(guild_id, user_id, "Skipping role grant for unresolvable member");
            return Ok(());
        }

        self.client
            .add_member_roles(guild_id, user_id, roles)
            .await
            .map_err(|err| DomainError::ExternalService(format!("Discord API error: {err}")))
    }
}

#[async_trait]
impl Notifier for DiscordGateway {
    async fn level_up(&self, channel_id: u64, profile: &UserProfile) -> Result<(), DomainError> {
        let mention = profile
            .user
            .as_ref()
            .map(|user| user.mention())
            .unwrap_or_else(|| format!("<@{}>", profile.user_id));

        let text = format!(
            "Congratulations {}! You have reached level `{}`!",
            mention, profile.progress.level
        );
        debug!(channel_id, user_id = profile.user_id, "Announcing level up");

        self.client
            .send_message(channel_id, &text)
            .await
            .map_err(|err| DomainError::ExternalService(format!("Discord API error: {err}")))
    }
}
