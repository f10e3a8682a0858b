//! Administrator and moderator rosters for a guild.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The user and role ids granted administrator or moderator standing in a
/// guild. All four sets default to empty so older config files parse cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRoster {
    #[serde(default)]
    pub administrator_users: HashSet<u64>,
    #[serde(default)]
    pub administrator_roles: HashSet<u64>,
    #[serde(default)]
    pub moderator_users: HashSet<u64>,
    #[serde(default)]
    pub moderator_roles: HashSet<u64>,
}
