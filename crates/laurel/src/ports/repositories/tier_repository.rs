//! Level Tier Repository Port

use async_trait::async_trait;

use crate::domain::entities::LevelTier;
use crate::domain::errors::DomainError;

/// Repository interface for `LevelTier` entities.
#[async_trait]
pub trait TierRepository: Send + Sync {
    /// Create and persist a tier with a freshly allocated guild-unique id.
    /// Pass `reward_role_id` 0 for a tier without a reward.
    async fn create_tier(
        &self,
        guild_id: u64,
        reward_role_id: u64,
    ) -> Result<LevelTier, DomainError>;

    /// Load a single tier, `None` when it does not exist.
    async fn get_tier(&self, guild_id: u64, tier_id: u32) -> Result<Option<LevelTier>, DomainError>;

    /// Load every tier of a guild, ordered by id. Unreadable tier files are
    /// skipped.
    async fn list_tiers(&self, guild_id: u64) -> Result<Vec<LevelTier>, DomainError>;

    /// Persist the tier's stored fields.
    async fn save_tier(&self, tier: &LevelTier) -> Result<(), DomainError>;
}
