//! Laurel Domain Library
//!
//! Core domain types and services for the Laurel guild leveling system.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (GuildConfig, LevelTier, UserProfile)
//!   - `value_objects/`: Immutable value types (LevelInfo, AdminRoster, handles)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Entity persistence interfaces
//!   - `directory`: Chat-platform id-to-descriptor resolution
//!   - `gateway`: Outbound role-grant and notification capabilities
//!
//! - **Services** (`services/`): Concrete components
//!   - `json_store`: JSON file implementation of the repositories
//!   - `cooldown`: Per-user experience admission gate
//!   - `progression`: The activity-event engine
//!
//! # Usage
//!
//! ```rust,ignore
//! use laurel::domain::{GuildConfig, LevelTier, UserProfile};
//! use laurel::ports::{Directory, ProfileRepository, RoleGranter};
//! use laurel::services::{JsonDataStore, ProgressionService};
//! ```

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use domain::{
    AdminRoster, DomainError, GuildConfig, GuildHandle, LevelInfo, LevelTier, RoleHandle,
    UserHandle, UserProfile,
};
pub use ports::{
    ActivityEvent, ConfigRepository, Directory, Notifier, ProfileRepository, RoleGranter,
    StoredEntity, TierRepository,
};
pub use services::{ActivityOutcome, CooldownTracker, JsonDataStore, ProgressionService};
