//! Billboard Remote Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the remote core is
//! written against. A board crate (nRF52840 with a BLE stack, a desktop
//! simulator, a test mock) implements them and hands them to the core.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (billboard-core Remote)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  billboard-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  BLE central  │       │   host mock   │
//! │  board crate  │       │  / simulator  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`radio::Radio`] - Advertisement scanning and connection management
//! - [`link::Link`] - Byte stream to a connected peripheral
//! - [`gpio::InputPin`] - Digital input (buttons)
//! - [`tone::Tone`] - Buzzer feedback

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod gpio;
pub mod link;
pub mod radio;
pub mod tone;

// Re-export key traits at crate root for convenience
pub use gpio::{ActiveLevel, Button, InputPin};
pub use link::{Link, LinkError};
pub use radio::{
    Address, Advertisement, PeripheralHandle, PeripheralName, Radio, RadioError, MAX_NAME_LEN,
};
pub use tone::{Silent, Tone};
