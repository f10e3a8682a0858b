//! Guild Config Repository Port

use async_trait::async_trait;

use crate::domain::entities::GuildConfig;
use crate::domain::errors::DomainError;

/// Repository interface for `GuildConfig` entities.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Load the guild's configuration, creating and persisting a fresh one
    /// when absent.
    async fn get_or_create_config(&self, guild_id: u64) -> Result<GuildConfig, DomainError>;

    /// Persist the configuration's stored fields.
    async fn save_config(&self, config: &GuildConfig) -> Result<(), DomainError>;
}
