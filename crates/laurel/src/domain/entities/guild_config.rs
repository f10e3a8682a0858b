//! Guild configuration
//!
//! Bot configuration bound to a single guild, including the administrator and
//! moderator rosters consulted by command preconditions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AdminRoster, GuildHandle};
use crate::ports::directory::Directory;
use crate::ports::repositories::StoredEntity;

/// Per-guild bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildConfig {
    /// Owning guild id
    pub guild_id: u64,
    /// Administrator and moderator membership
    #[serde(default)]
    pub roster: AdminRoster,
    /// Resolved guild handle, populated on hydration
    #[serde(skip)]
    pub guild: Option<GuildHandle>,
}

impl GuildConfig {
    pub fn new(guild_id: u64) -> Self {
        Self {
            guild_id,
            roster: AdminRoster::default(),
            guild: None,
        }
    }

    /// Register a user as an administrator. Returns false if already present.
    pub fn add_admin_user(&mut self, user_id: u64) -> bool {
        self.roster.administrator_users.insert(user_id)
    }

    /// Register a role as an administrator role. Returns false if already present.
    pub fn add_admin_role(&mut self, role_id: u64) -> bool {
        self.roster.administrator_roles.insert(role_id)
    }

    /// Register a user as a moderator. Returns false if already present.
    pub fn add_moderator_user(&mut self, user_id: u64) -> bool {
        self.roster.moderator_users.insert(user_id)
    }

    /// Register a role as a moderator role. Returns false if already present.
    pub fn add_moderator_role(&mut self, role_id: u64) -> bool {
        self.roster.moderator_roles.insert(role_id)
    }

    /// Whether the member is an administrator: their id, or any role they
    /// hold, appears in the administrator roster.
    pub fn is_admin(&self, user_id: u64, roles: &[u64]) -> bool {
        self.roster.administrator_users.contains(&user_id)
            || roles
                .iter()
                .any(|role| self.roster.administrator_roles.contains(role))
    }

    /// Whether the member is a moderator. Administrators always are.
    pub fn is_moderator(&self, user_id: u64, roles: &[u64]) -> bool {
        self.is_admin(user_id, roles)
            || self.roster.moderator_users.contains(&user_id)
            || roles
                .iter()
                .any(|role| self.roster.moderator_roles.contains(role))
    }
}

#[async_trait]
impl StoredEntity for GuildConfig {
    fn is_valid(&self) -> bool {
        self.guild_id != 0
    }

    async fn hydrate(&mut self, directory: &dyn Directory) {
        self.guild = directory.guild(self.guild_id).await;
    }
}

impl std::fmt::Display for GuildConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.guild {
            Some(guild) => write!(f, "GuildConfig: {}", guild.name),
            None => write!(f, "GuildConfig: {}", self.guild_id),
        }
    }
}
