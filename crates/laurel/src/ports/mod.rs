//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer interacts with
//! external systems (persistence, the chat platform directory, outbound
//! gateway capabilities).
//!
//! Implementations of these traits live in the services module and in
//! integration crates.

pub mod directory;
pub mod gateway;
pub mod repositories;

// Re-exports
pub use directory::*;
pub use gateway::*;
pub use repositories::*;
