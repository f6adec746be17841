//! Configuration types
//!
//! Board-agnostic remote configuration. Defaults match the billboard
//! firmware; a board crate may override them at start-up.

pub mod types;

pub use types::*;
