//! Board-agnostic core logic for the billboard remote
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Advertisement discovery with guaranteed scan release
//! - Connection lifecycle state machine
//! - Request/response session with bounded waits
//! - Reply interpretation into display content
//! - Button sampling and the remote control loop
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod config;
pub mod discovery;
pub mod input;
pub mod interpreter;
pub mod remote;
pub mod session;
pub mod state;

#[cfg(test)]
mod mock;

pub use config::{ConfigError, RemoteConfig};
pub use input::{ButtonSampler, InputEvent};
pub use remote::Remote;
pub use session::{ExchangeError, ExchangeTiming, Response, Session};
pub use state::{ConnectionState, Event};
