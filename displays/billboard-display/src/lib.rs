//! Display content model and backend trait for the billboard remote
//!
//! This crate provides:
//! - `DisplayContent`: what the remote shows (a mirrored billboard page or
//!   a plain prompt/diagnostic)
//! - `DisplayBackend` trait the core renders into
//! - `LabelStyle`: how content maps onto the remote's text label
//! - `Label`: an in-memory backend holding the current label and status
//!
//! # Architecture
//!
//! The core never reads the display back. A board crate either implements
//! `DisplayBackend` directly on its screen driver, or renders into a
//! `Label` and pushes `Label::style()` to the hardware when it is dirty.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod content;
pub mod label;

// Re-export key types
pub use backend::DisplayBackend;
pub use content::DisplayContent;
pub use label::{Label, LabelStyle, PLAIN_TEXT_SCALE, STATUS_LEN};
