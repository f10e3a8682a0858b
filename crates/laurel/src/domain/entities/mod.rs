//! Domain Entities
//!
//! Persisted domain models. Each entity stores plain identifiers and carries
//! optional hydrated handles resolved through the `Directory` port.
//! - `GuildConfig`: per-guild configuration and admin/moderator rosters
//! - `LevelTier`: a reward threshold within a guild
//! - `UserProfile`: per-user progression state

mod guild_config;
mod level_tier;
mod user_profile;

pub use guild_config::*;
pub use level_tier::*;
pub use user_profile::*;
