//! Repository Ports
//!
//! Abstract interfaces for entity persistence, one per entity kind, plus the
//! contract every persisted entity satisfies.

use async_trait::async_trait;

use crate::ports::directory::Directory;

mod config_repository;
mod profile_repository;
mod tier_repository;

pub use config_repository::*;
pub use profile_repository::*;
pub use tier_repository::*;

/// Capability contract shared by every persisted entity: a cheap validity
/// predicate over the stored identifiers, and a hydration pass resolving those
/// identifiers into live handles.
///
/// Hydration is soft. A lookup that no longer resolves leaves the handle
/// empty instead of failing the load.
#[async_trait]
pub trait StoredEntity: Send + Sync {
    /// Whether the stored identifiers describe a usable entity.
    fn is_valid(&self) -> bool;

    /// Resolve stored ids into live handles through the directory.
    async fn hydrate(&mut self, directory: &dyn Directory);
}
