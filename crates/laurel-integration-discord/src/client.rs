//! Discord API client wrapper

use std::sync::Arc;

use serenity::http::Http;
use serenity::model::guild::{Member, PartialGuild};
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use serenity::model::user::User;
use tracing::debug;

/// Thin wrapper over serenity's HTTP client.
pub struct DiscordClient {
    http: Arc<Http>,
}

impl DiscordClient {
    /// Create a new client from a bot token
    pub fn new(token: &str) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
        }
    }

    /// Create a client sharing an existing HTTP handle
    pub fn from_http(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Fetch a user by id
    pub async fn get_user(&self, user_id: u64) -> Result<User, serenity::Error> {
        self.http.get_user(UserId::new(user_id)).await
    }

    /// Fetch a guild by id
    pub async fn get_guild(&self, guild_id: u64) -> Result<PartialGuild, serenity::Error> {
        self.http.get_guild(GuildId::new(guild_id)).await
    }

    /// Fetch a guild member by id
    pub async fn get_member(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Member, serenity::Error> {
        self.http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await
    }

    /// Add a set of roles to a guild member
    pub async fn add_member_roles(
        &self,
        guild_id: u64,
        user_id: u64,
        roles: &[u64],
    ) -> Result<(), serenity::Error> {
        debug!(guild_id, user_id, count = roles.len(), "Adding member roles");

        for role_id in roles {
            self.http
                .add_member_role(
                    GuildId::new(guild_id),
                    UserId::new(user_id),
                    RoleId::new(*role_id),
                    None,
                )
                .await?;
        }

        Ok(())
    }

    /// Send a message to a channel
    pub async fn send_message(
        &self,
        channel_id: u64,
        content: &str,
    ) -> Result<(), serenity::Error> {
        debug!(channel_id, content_len = content.len(), "Sending message");

        ChannelId::new(channel_id).say(&self.http, content).await?;

        Ok(())
    }

    /// Get the underlying HTTP client for advanced operations
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }
}
