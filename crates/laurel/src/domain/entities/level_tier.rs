//! Level tier - a named reward threshold within a guild
//!
//! The ranking system grants a tier's reward role to every member whose level
//! meets the tier's minimum.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{GuildHandle, RoleHandle};
use crate::ports::directory::Directory;
use crate::ports::repositories::StoredEntity;

/// A reward threshold inside one guild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelTier {
    /// Guild-unique identifier, assigned at creation and immutable after
    pub id: u32,
    /// Owning guild id
    pub guild_id: u64,
    /// Role granted on reaching the tier, 0 when the tier carries no reward
    #[serde(default)]
    pub reward_role_id: u64,
    /// Minimum level a member must reach for this tier
    #[serde(default)]
    pub min_level: u32,
    /// Resolved guild handle, populated on hydration
    #[serde(skip)]
    pub guild: Option<GuildHandle>,
    /// Resolved reward role, populated on hydration when the role still exists
    #[serde(skip)]
    pub reward_role: Option<RoleHandle>,
}

impl LevelTier {
    pub fn new(guild_id: u64, reward_role_id: u64, id: u32) -> Self {
        Self {
            id,
            guild_id,
            reward_role_id,
            min_level: 0,
            guild: None,
            reward_role: None,
        }
    }
}

#[async_trait]
impl StoredEntity for LevelTier {
    fn is_valid(&self) -> bool {
        self.guild_id != 0
    }

    async fn hydrate(&mut self, directory: &dyn Directory) {
        self.guild = directory.guild(self.guild_id).await;

        if self.reward_role_id != 0 {
            self.reward_role = directory.role(self.guild_id, self.reward_role_id).await;
        }
    }
}

impl std::fmt::Display for LevelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tier: {}, MinLevel: {}", self.id, self.min_level)?;

        if let Some(role) = &self.reward_role {
            write!(f, ", Role: {}", role.mention())?;
        }

        Ok(())
    }
}
