//! Data directory layout
//!
//! Pure mapping from entity identity to a file-system location. The same
//! identifiers always produce the same path, which is what makes the store's
//! get-or-create idempotent.
//!
//! ```text
//! <root>/
//! ├── users/<userId>.json                      guild-less profiles
//! └── guilds/<guildId>/
//!     ├── config.json                          guild configuration
//!     ├── members/<userId>.json                per-guild profiles
//!     └── ranks/<tierId>.json                  level tiers
//! ```

use std::path::{Path, PathBuf};

const GUILDS_DIR: &str = "guilds";
const USERS_DIR: &str = "users";
const MEMBERS_DIR: &str = "members";
const RANKS_DIR: &str = "ranks";

/// Location of a user profile. A missing or zero guild id selects the
/// guild-less layout.
pub fn profile_path(root: &Path, guild_id: Option<u64>, user_id: u64) -> PathBuf {
    let filename = format!("{user_id}.json");

    match guild_id {
        Some(guild_id) if guild_id != 0 => root
            .join(GUILDS_DIR)
            .join(guild_id.to_string())
            .join(MEMBERS_DIR)
            .join(filename),
        _ => root.join(USERS_DIR).join(filename),
    }
}

/// Location of a guild's configuration.
pub fn config_path(root: &Path, guild_id: u64) -> PathBuf {
    root.join(GUILDS_DIR)
        .join(guild_id.to_string())
        .join("config.json")
}

/// Directory holding a guild's tier files.
pub fn tier_dir(root: &Path, guild_id: u64) -> PathBuf {
    root.join(GUILDS_DIR)
        .join(guild_id.to_string())
        .join(RANKS_DIR)
}

/// Location of a single tier file.
pub fn tier_path(root: &Path, guild_id: u64, tier_id: u32) -> PathBuf {
    tier_dir(root, guild_id).join(format!("{tier_id}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guild_member_layout() {
        let root = Path::new("/data");
        let path = profile_path(root, Some(42), 7);
        assert_eq!(path, Path::new("/data/guilds/42/members/7.json"));
    }

    #[test]
    fn test_guildless_layout() {
        let root = Path::new("/data");
        assert_eq!(
            profile_path(root, None, 7),
            Path::new("/data/users/7.json")
        );
        assert_eq!(
            profile_path(root, Some(0), 7),
            Path::new("/data/users/7.json")
        );
    }

    #[test]
    fn test_config_and_tier_layout() {
        let root = Path::new("/data");
        assert_eq!(
            config_path(root, 42),
            Path::new("/data/guilds/42/config.json")
        );
        assert_eq!(
            tier_path(root, 42, 3),
            Path::new("/data/guilds/42/ranks/3.json")
        );
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let root = Path::new("/data");
        assert_eq!(profile_path(root, Some(1), 2), profile_path(root, Some(1), 2));
    }
}
