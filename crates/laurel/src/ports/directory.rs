//! Directory Lookup Port
//!
//! Abstract id-to-descriptor resolution against the chat platform. Entities
//! hold only identifiers; this port turns them into live handles after a load.
//!
//! Lookups are soft: a stale or deleted identifier resolves to `None` rather
//! than an error, and the implementation is expected to log the miss.

use async_trait::async_trait;

use crate::domain::value_objects::{GuildHandle, RoleHandle, UserHandle};

/// Id-to-descriptor resolution interface.
///
/// Implementations live in integration crates
/// (e.g., laurel-integration-discord).
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolve a user id.
    async fn user(&self, user_id: u64) -> Option<UserHandle>;

    /// Resolve a guild id.
    async fn guild(&self, guild_id: u64) -> Option<GuildHandle>;

    /// Resolve a role id within a guild.
    async fn role(&self, guild_id: u64, role_id: u64) -> Option<RoleHandle>;

    /// Role ids currently held by a guild member, `None` when the member
    /// cannot be resolved.
    async fn member_roles(&self, guild_id: u64, user_id: u64) -> Option<Vec<u64>>;
}
