//! JSON file store
//!
//! File-backed implementation of the repository ports. Each entity owns a
//! single file under the data root (see `layout`). Reads are lenient: a
//! missing file, malformed content, and an entity failing validation all
//! collapse to "absent" at this boundary, with the distinction logged. Writes
//! go through a sibling temp file and a rename, so a concurrent read never
//! observes a partial write.
//!
//! A per-path lock table serializes get-or-create and save per entity key;
//! tier id allocation is serialized per guild through the same table.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::{GuildConfig, LevelTier, UserProfile};
use crate::domain::errors::DomainError;
use crate::ports::directory::Directory;
use crate::ports::repositories::{
    ConfigRepository, ProfileRepository, StoredEntity, TierRepository,
};
use crate::services::layout;

/// Hands out one async mutex per resolved path, so concurrent first-touches
/// of the same entity cannot both observe "absent" and race their writes.
#[derive(Default)]
struct PathLocks {
    inner: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl PathLocks {
    fn entry(&self, path: &Path) -> Arc<tokio::sync::Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.entry(path.to_path_buf()).or_default().clone()
    }

    async fn hold(&self, path: &Path) -> tokio::sync::OwnedMutexGuard<()> {
        self.entry(path).lock_owned().await
    }
}

/// JSON file implementation of the repository ports.
pub struct JsonDataStore {
    root: PathBuf,
    directory: Arc<dyn Directory>,
    locks: PathLocks,
}

impl JsonDataStore {
    pub fn new(root: impl Into<PathBuf>, directory: Arc<dyn Directory>) -> Self {
        Self {
            root: root.into(),
            directory,
            locks: PathLocks::default(),
        }
    }

    /// Root of the data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn io_error(path: &Path, err: std::io::Error) -> DomainError {
        DomainError::Repository(format!("{}: {}", path.display(), err))
    }

    /// Lenient read. Only storage-medium failures surface as errors; every
    /// other outcome is `Ok(None)`.
    async fn read_entity<T>(&self, path: &Path) -> Result<Option<T>, DomainError>
    where
        T: StoredEntity + DeserializeOwned,
    {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Self::io_error(path, err)),
        };

        let mut entity: T = match serde_json::from_slice(&bytes) {
            Ok(entity) => entity,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Discarding malformed entity file");
                return Ok(None);
            }
        };

        if !entity.is_valid() {
            warn!(path = %path.display(), "Discarding entity that failed validation");
            return Ok(None);
        }

        entity.hydrate(self.directory.as_ref()).await;

        Ok(Some(entity))
    }

    /// Write through a sibling temp file and rename it into place. The parent
    /// directory is created first.
    async fn write_entity<T>(&self, entity: &T, path: &Path) -> Result<(), DomainError>
    where
        T: Serialize + Sync,
    {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| Self::io_error(parent, err))?;
        }

        let bytes = serde_json::to_vec_pretty(entity)
            .map_err(|err| DomainError::Repository(format!("{}: {}", path.display(), err)))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)
            .await
            .map_err(|err| Self::io_error(&tmp, err))?;
        fs::rename(&tmp, path)
            .await
            .map_err(|err| Self::io_error(path, err))?;

        Ok(())
    }

    /// Next guild-unique tier id: one past the highest numeric filename stem
    /// in the guild's ranks directory. Gaps from manual edits are tolerated;
    /// an empty or missing directory allocates 0.
    ///
    /// Callers must hold the ranks-directory lock.
    async fn allocate_tier_id(&self, guild_id: u64) -> Result<u32, DomainError> {
        let dir = layout::tier_dir(&self.root, guild_id);

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(Self::io_error(&dir, err)),
        };

        let mut next = 0u32;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| Self::io_error(&dir, err))?
        {
            let path = entry.path();
            let stem = path.file_stem().and_then(|stem| stem.to_str());

            if let Some(id) = stem.and_then(|stem| stem.parse::<u32>().ok()) {
                next = next.max(id + 1);
            }
        }

        Ok(next)
    }
}

#[async_trait]
impl ProfileRepository for JsonDataStore {
    async fn get_or_create_profile(
        &self,
        user_id: u64,
        guild_id: Option<u64>,
    ) -> Result<UserProfile, DomainError> {
        let path = layout::profile_path(&self.root, guild_id, user_id);
        let _guard = self.locks.hold(&path).await;

        if let Some(profile) = self.read_entity::<UserProfile>(&path).await? {
            return Ok(profile);
        }

        debug!(user_id, guild_id = guild_id.unwrap_or(0), "Creating user profile");
        let mut profile = UserProfile::new(user_id, guild_id);
        profile.hydrate(self.directory.as_ref()).await;
        self.write_entity(&profile, &path).await?;

        Ok(profile)
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let guild_id = (profile.guild_id != 0).then_some(profile.guild_id);
        let path = layout::profile_path(&self.root, guild_id, profile.user_id);
        let _guard = self.locks.hold(&path).await;

        self.write_entity(profile, &path).await
    }
}

#[async_trait]
impl TierRepository for JsonDataStore {
    async fn create_tier(
        &self,
        guild_id: u64,
        reward_role_id: u64,
    ) -> Result<LevelTier, DomainError> {
        // The directory lock doubles as the per-guild allocation lock.
        let dir = layout::tier_dir(&self.root, guild_id);
        let _guard = self.locks.hold(&dir).await;

        let tier_id = self.allocate_tier_id(guild_id).await?;
        debug!(guild_id, tier_id, "Creating level tier");

        let mut tier = LevelTier::new(guild_id, reward_role_id, tier_id);
        tier.hydrate(self.directory.as_ref()).await;
        self.write_entity(&tier, &layout::tier_path(&self.root, guild_id, tier_id))
            .await?;

        Ok(tier)
    }

    async fn get_tier(
        &self,
        guild_id: u64,
        tier_id: u32,
    ) -> Result<Option<LevelTier>, DomainError> {
        self.read_entity(&layout::tier_path(&self.root, guild_id, tier_id))
            .await
    }

    async fn list_tiers(&self, guild_id: u64) -> Result<Vec<LevelTier>, DomainError> {
        let dir = layout::tier_dir(&self.root, guild_id);

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Self::io_error(&dir, err)),
        };

        let mut tiers = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| Self::io_error(&dir, err))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            if let Some(tier) = self.read_entity::<LevelTier>(&path).await? {
                tiers.push(tier);
            }
        }

        tiers.sort_by_key(|tier| tier.id);
        Ok(tiers)
    }

    async fn save_tier(&self, tier: &LevelTier) -> Result<(), DomainError> {
        let path = layout::tier_path(&self.root, tier.guild_id, tier.id);
        let _guard = self.locks.hold(&path).await;

        self.write_entity(tier, &path).await
    }
}

#[async_trait]
impl ConfigRepository for JsonDataStore {
    async fn get_or_create_config(&self, guild_id: u64) -> Result<GuildConfig, DomainError> {
        let path = layout::config_path(&self.root, guild_id);
        let _guard = self.locks.hold(&path).await;

        if let Some(config) = self.read_entity::<GuildConfig>(&path).await? {
            return Ok(config);
        }

        debug!(guild_id, "Creating guild config");
        let mut config = GuildConfig::new(guild_id);
        config.hydrate(self.directory.as_ref()).await;
        self.write_entity(&config, &path).await?;

        Ok(config)
    }

    async fn save_config(&self, config: &GuildConfig) -> Result<(), DomainError> {
        let path = layout::config_path(&self.root, config.guild_id);
        let _guard = self.locks.hold(&path).await;

        self.write_entity(config, &path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{GuildHandle, RoleHandle, UserHandle};

    /// Directory stub whose lookups never resolve, exercising the soft
    /// hydration path.
    struct NullDirectory;

    #[async_trait]
    impl Directory for NullDirectory {
        async fn user(&self, _user_id: u64) -> Option<UserHandle> {
            None
        }

        async fn guild(&self, _guild_id: u64) -> Option<GuildHandle> {
            None
        }

        async fn role(&self, _guild_id: u64, _role_id: u64) -> Option<RoleHandle> {
            None
        }

        async fn member_roles(&self, _guild_id: u64, _user_id: u64) -> Option<Vec<u64>> {
            None
        }
    }

    fn store(root: &Path) -> JsonDataStore {
        JsonDataStore::new(root, Arc::new(NullDirectory))
    }

    #[tokio::test]
    async fn test_get_or_create_profile_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let first = store.get_or_create_profile(7, Some(42)).await.unwrap();
        let second = store.get_or_create_profile(7, Some(42)).await.unwrap();

        assert_eq!(first.user_id, second.user_id);
        assert_eq!(first.guild_id, second.guild_id);
        assert_eq!(first.progress, second.progress);
        assert!(layout::profile_path(dir.path(), Some(42), 7).exists());
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let mut profile = store.get_or_create_profile(7, Some(42)).await.unwrap();
        profile.add_exp_amount(500);
        assert!(profile.check_level_up());
        store.save_profile(&profile).await.unwrap();

        let reloaded = store.get_or_create_profile(7, Some(42)).await.unwrap();
        assert_eq!(reloaded.progress.experience, 500);
        assert_eq!(reloaded.progress.level, 1);
    }

    #[tokio::test]
    async fn test_malformed_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let path = layout::config_path(dir.path(), 42);
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, b"{ not json").await.unwrap();

        let config = store.get_or_create_config(42).await.unwrap();
        assert_eq!(config.guild_id, 42);

        // The recreated file must parse again.
        let reloaded = store.get_or_create_config(42).await.unwrap();
        assert_eq!(reloaded.guild_id, 42);
    }

    #[tokio::test]
    async fn test_invalid_entity_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let path = layout::profile_path(dir.path(), Some(42), 7);
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        // Parses fine but fails the validity predicate (user_id 0).
        fs::write(&path, br#"{"user_id": 0, "guild_id": 42}"#)
            .await
            .unwrap();

        let profile = store.get_or_create_profile(7, Some(42)).await.unwrap();
        assert_eq!(profile.user_id, 7);
    }

    #[tokio::test]
    async fn test_missing_fields_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let path = layout::profile_path(dir.path(), Some(42), 7);
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, br#"{"user_id": 7}"#).await.unwrap();

        let profile = store.get_or_create_profile(7, Some(42)).await.unwrap();
        assert_eq!(profile.progress.experience, 0);
        assert_eq!(profile.progress.level, 0);
    }

    #[tokio::test]
    async fn test_guildless_profile_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store.get_or_create_profile(7, None).await.unwrap();
        assert!(layout::profile_path(dir.path(), None, 7).exists());
    }

    #[tokio::test]
    async fn test_tier_ids_allocate_sequentially() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let first = store.create_tier(42, 0).await.unwrap();
        let second = store.create_tier(42, 0).await.unwrap();
        let third = store.create_tier(42, 0).await.unwrap();

        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert_eq!(third.id, 2);
    }

    #[tokio::test]
    async fn test_tier_allocation_tolerates_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let tier_dir = layout::tier_dir(dir.path(), 42);
        fs::create_dir_all(&tier_dir).await.unwrap();
        fs::write(
            tier_dir.join("7.json"),
            br#"{"id": 7, "guild_id": 42, "min_level": 3}"#,
        )
        .await
        .unwrap();

        let tier = store.create_tier(42, 0).await.unwrap();
        assert_eq!(tier.id, 8);
    }

    #[tokio::test]
    async fn test_get_tier_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let mut tier = store.create_tier(42, 501).await.unwrap();
        tier.min_level = 5;
        store.save_tier(&tier).await.unwrap();

        let loaded = store.get_tier(42, tier.id).await.unwrap().unwrap();
        assert_eq!(loaded.min_level, 5);
        assert_eq!(loaded.reward_role_id, 501);

        assert!(store.get_tier(42, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_config_roster_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let mut config = store.get_or_create_config(42).await.unwrap();
        config.add_admin_user(1);
        config.add_moderator_role(600);
        store.save_config(&config).await.unwrap();

        let reloaded = store.get_or_create_config(42).await.unwrap();
        assert!(reloaded.is_admin(1, &[]));
        assert!(reloaded.is_moderator(2, &[600]));
    }

    #[tokio::test]
    async fn test_list_tiers_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store.create_tier(42, 0).await.unwrap();
        let tier_dir = layout::tier_dir(dir.path(), 42);
        fs::write(tier_dir.join("1.json"), b"garbage").await.unwrap();

        let tiers = store.list_tiers(42).await.unwrap();
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].id, 0);
    }

    #[tokio::test]
    async fn test_concurrent_first_touch_creates_one_entity() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store(dir.path()));

        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.get_or_create_profile(7, Some(42)).await })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.get_or_create_profile(7, Some(42)).await })
        };

        let first = a.await.unwrap().unwrap();
        let second = b.await.unwrap().unwrap();

        assert_eq!(first.user_id, second.user_id);
        assert_eq!(first.progress, second.progress);

        let members = layout::profile_path(dir.path(), Some(42), 7)
            .parent()
            .unwrap()
            .to_path_buf();
        let mut entries = fs::read_dir(&members).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
