//! Reply interpretation
//!
//! Turns reply bytes into what the remote's label shows. Never fails: a
//! reply that cannot be mirrored becomes a plain diagnostic instead.

use alloc::format;
use alloc::string::String;

use billboard_display::DisplayContent;
use billboard_protocol::{BillboardMessage, MessageError};

use crate::session::{ExchangeError, Response};

/// Prefix for replies that are not JSON
pub const DECODE_FAILURE_PREFIX: &str = "failed to parse response:\n";

/// Prefix for JSON replies with missing or invalid fields
pub const FIELD_SHAPE_PREFIX: &str = "Error in dictionary content\n";

/// Shown when the reply is JSON but not an object
pub const CONTENT_INVALID: &str = "ERROR\nCONTENT INVALID\nCHECK BILLBOARD";

/// Shown when the billboard sent nothing at all
pub const NO_RESPONSE: &str = "ERROR\nNO RESPONSE\nCHECK BILLBOARD";

/// Shown when the link failed mid-exchange
pub const LINK_ERROR: &str = "ERROR\nLINK FAILED\nCHECK BILLBOARD";

/// Interpret reply bytes
pub fn interpret(raw: &[u8]) -> DisplayContent {
    match BillboardMessage::decode(raw) {
        Ok(message) => DisplayContent::Mirror(message),
        Err(error) => {
            debug!("reply of {=usize} bytes is not a billboard message", raw.len());
            diagnostic(raw, &error)
        }
    }
}

/// Diagnostic text for a reply that failed to decode
pub fn diagnostic(raw: &[u8], error: &MessageError) -> DisplayContent {
    match error {
        MessageError::Decode => DisplayContent::Plain(format!(
            "{}{}",
            DECODE_FAILURE_PREFIX,
            String::from_utf8_lossy(raw)
        )),
        MessageError::NotAnObject => DisplayContent::plain(CONTENT_INVALID),
        MessageError::FieldShape { content, .. } => {
            DisplayContent::Plain(format!("{}{}", FIELD_SHAPE_PREFIX, content))
        }
    }
}

/// Interpret the outcome of an exchange
pub fn interpret_exchange(outcome: &Result<Response, ExchangeError>) -> DisplayContent {
    match outcome {
        Ok(response) => interpret(&response.payload),
        Err(ExchangeError::Transport(_)) => DisplayContent::plain(LINK_ERROR),
        Err(error) if error.partial().is_empty() => DisplayContent::plain(NO_RESPONSE),
        Err(error) => interpret(error.partial()),
    }
}
