//! Billboard Remote Protocol
//!
//! This crate defines the byte-stream protocol between the remote (BLE
//! central) and the billboard (BLE peripheral exposing a UART service).
//! The exchange is strictly half-duplex: one request, one reply.
//!
//! # Protocol Overview
//!
//! ```text
//! remote ──── 'n' | 'p' (1 byte) ────► billboard
//! remote ◄─── {"text": …, "fg": "RRGGBB", "bg": "RRGGBB"} ── billboard
//! ```
//!
//! The reply carries no length header. It is framed by brace balance:
//! the frame is complete once every `{` has been matched by a `}`.
//! Braces inside JSON string values are counted too, so the billboard must
//! not send them.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod frame;
pub mod messages;

pub use frame::{FrameAccumulator, FrameError, FrameStatus, MAX_FRAME_SIZE};
pub use messages::{
    BillboardMessage, Color, Command, MessageError, BILLBOARD_DISPLAY_WIDTH, MIRROR_SCALE,
    REMOTE_DISPLAY_WIDTH,
};
