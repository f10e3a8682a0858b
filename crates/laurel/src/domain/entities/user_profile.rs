//! User profile - per-user progression state
//!
//! One profile per (user, guild) pair; `guild_id` 0 means the profile has no
//! guild context.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{GuildHandle, LevelInfo, UserHandle};
use crate::ports::directory::Directory;
use crate::ports::repositories::StoredEntity;

/// Progression state for a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user id
    pub user_id: u64,
    /// Guild scope, 0 when the profile is guild-less
    #[serde(default)]
    pub guild_id: u64,
    /// Accumulated experience and level
    #[serde(default)]
    pub progress: LevelInfo,
    /// Resolved user handle, populated on hydration
    #[serde(skip)]
    pub user: Option<UserHandle>,
    /// Resolved guild handle, populated on hydration
    #[serde(skip)]
    pub guild: Option<GuildHandle>,
}

impl UserProfile {
    /// Create a fresh profile with zeroed progress.
    pub fn new(user_id: u64, guild_id: Option<u64>) -> Self {
        Self {
            user_id,
            guild_id: guild_id.unwrap_or(0),
            progress: LevelInfo::default(),
            user: None,
            guild: None,
        }
    }

    /// Award the standard randomized experience increment.
    pub fn add_exp(&mut self) {
        self.add_exp_amount(LevelInfo::random_increment());
    }

    /// Award a specific amount of experience.
    pub fn add_exp_amount(&mut self, amount: u64) {
        self.progress.experience = self.progress.experience.saturating_add(amount);
    }

    /// Remove experience, never dropping below zero.
    pub fn deduct_exp(&mut self, amount: u64) {
        self.progress.experience = self.progress.experience.saturating_sub(amount);
    }

    /// Advance one level if the current threshold has been met.
    ///
    /// At most one level per call; a profile that is several thresholds ahead
    /// catches up over subsequent calls.
    pub fn check_level_up(&mut self) -> bool {
        if !self.progress.should_level_up() {
            return false;
        }

        self.progress.level += 1;
        true
    }
}

#[async_trait]
impl StoredEntity for UserProfile {
    fn is_valid(&self) -> bool {
        self.user_id != 0
    }

    async fn hydrate(&mut self, directory: &dyn Directory) {
        self.user = directory.user(self.user_id).await;

        if self.guild_id != 0 {
            self.guild = directory.guild(self.guild_id).await;
        }
    }
}

impl std::fmt::Display for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.guild_id == 0 { "User" } else { "Member" };
        match &self.user {
            Some(user) => write!(f, "{}: {}, {}", kind, user.name, self.progress),
            None => write!(f, "{}: {}, {}", kind, self.user_id, self.progress),
        }
    }
}
