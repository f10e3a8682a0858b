//! User Profile Repository Port

use async_trait::async_trait;

use crate::domain::entities::UserProfile;
use crate::domain::errors::DomainError;

/// Repository interface for `UserProfile` entities.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load the profile for `(user, guild)`, creating and persisting a fresh
    /// one when absent. The first successful read of a profile is
    /// indistinguishable from its creation.
    async fn get_or_create_profile(
        &self,
        user_id: u64,
        guild_id: Option<u64>,
    ) -> Result<UserProfile, DomainError>;

    /// Persist the profile's stored fields.
    async fn save_profile(&self, profile: &UserProfile) -> Result<(), DomainError>;
}
