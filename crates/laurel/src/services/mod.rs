//! Services
//!
//! Concrete components built on the ports: the JSON file store, the cooldown
//! ledger, and the progression engine.

pub mod cooldown;
pub mod json_store;
pub mod layout;
pub mod progression;

// Re-exports
pub use cooldown::CooldownTracker;
pub use json_store::JsonDataStore;
pub use progression::{ActivityOutcome, ProgressionService};
