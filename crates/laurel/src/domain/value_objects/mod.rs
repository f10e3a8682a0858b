//! Value Objects
//!
//! Immutable value types shared by the domain entities.

mod handles;
mod level_info;
mod roster;

pub use handles::*;
pub use level_info::*;
pub use roster::*;
