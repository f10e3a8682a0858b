//! Live descriptors resolved from stored ids.
//!
//! Entities persist only identifiers; these handles are populated through the
//! `Directory` port after a load and are never serialized.

/// A resolved chat-platform user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHandle {
    pub id: u64,
    pub name: String,
}

impl UserHandle {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Platform mention string for this user.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// A resolved guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildHandle {
    pub id: u64,
    pub name: String,
}

impl GuildHandle {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A resolved guild role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHandle {
    pub id: u64,
    pub name: String,
}

impl RoleHandle {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Platform mention string for this role.
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}
