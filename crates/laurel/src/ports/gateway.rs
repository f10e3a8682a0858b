//! Gateway Ports
//!
//! Abstract interfaces for the chat-platform capabilities the progression
//! engine depends on: the inbound activity notification, batch role grants,
//! and user-facing level-up acknowledgements.
//!
//! Implementations of these traits should live in separate crates
//! (e.g., laurel-integration-discord).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::UserProfile;
use crate::domain::errors::DomainError;

/// One observed activity notification from the chat platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Acting user
    pub user_id: u64,
    /// Guild the activity occurred in
    pub guild_id: u64,
    /// Channel the activity occurred in
    pub channel_id: u64,
}

/// Batch role assignment interface.
#[async_trait]
pub trait RoleGranter: Send + Sync {
    /// Grant the full set of roles to a member in one operation.
    ///
    /// Granting a role the member already holds is a no-op on the platform
    /// side, so callers may pass the complete reached set every time.
    async fn grant(&self, guild_id: u64, user_id: u64, roles: &[u64]) -> Result<(), DomainError>;
}

/// User-facing acknowledgement interface. Delivery is best-effort; callers
/// swallow failures.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announce a level-up in the channel that triggered it.
    async fn level_up(&self, channel_id: u64, profile: &UserProfile) -> Result<(), DomainError>;
}
