//! Message types for the billboard protocol
//!
//! - Remote → Billboard: single-byte navigation [`Command`]s
//! - Billboard → Remote: one JSON object describing what it shows

use alloc::format;
use alloc::string::{String, ToString};

use serde_json::Value;

// Command bytes: Remote → Billboard
pub const CMD_NEXT: u8 = b'n';
pub const CMD_PREVIOUS: u8 = b'p';

// Reply field names: Billboard → Remote
pub const FIELD_TEXT: &str = "text";
pub const FIELD_FG: &str = "fg";
pub const FIELD_BG: &str = "bg";

/// Billboard (LED matrix) width in pixels
pub const BILLBOARD_DISPLAY_WIDTH: u16 = 64;

/// Remote screen width in pixels
pub const REMOTE_DISPLAY_WIDTH: u16 = 252;

/// Text scale that makes the remote's label as wide as the billboard's
///
/// Both sides must agree on the two widths above.
pub const MIRROR_SCALE: u8 = REMOTE_DISPLAY_WIDTH.div_ceil(BILLBOARD_DISPLAY_WIDTH) as u8;

/// Navigation request sent to the billboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Show the next page
    Next,
    /// Show the previous page
    Previous,
}

impl Command {
    /// Parse a command from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_NEXT => Some(Command::Next),
            CMD_PREVIOUS => Some(Command::Previous),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Next => CMD_NEXT,
            Command::Previous => CMD_PREVIOUS,
        }
    }
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color(0xFF_FF_FF);
    pub const BLACK: Color = Color(0x00_00_00);

    /// Create a color from a `0xRRGGBB` value
    ///
    /// Returns `None` if the value does not fit in 24 bits.
    pub const fn from_rgb(rgb: u32) -> Option<Self> {
        if rgb > 0xFF_FF_FF {
            None
        } else {
            Some(Color(rgb))
        }
    }

    /// Parse a hex color string without `0x` or `#` (e.g. `"00FF00"`)
    ///
    /// Accepts 1 to 6 hex digits, case-insensitive.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.is_empty() || hex.len() > 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Color)
    }

    /// `0xRRGGBB` value
    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Six-digit uppercase hex string, as sent on the wire
    pub fn to_hex(self) -> String {
        format!("{:06X}", self.0)
    }
}

/// Errors decoding a billboard reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Bytes are not valid JSON
    Decode,
    /// JSON is valid but not an object
    NotAnObject,
    /// Object lacks a field, or a field has the wrong type or bad hex
    FieldShape {
        /// Offending field name
        field: &'static str,
        /// The decoded object, serialized again
        content: String,
    },
}

impl core::fmt::Display for MessageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MessageError::Decode => f.write_str("reply is not valid JSON"),
            MessageError::NotAnObject => f.write_str("reply is not a JSON object"),
            MessageError::FieldShape { field, .. } => {
                write!(f, "field `{}` is missing or invalid", field)
            }
        }
    }
}

/// What the billboard is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillboardMessage {
    /// Displayed text
    pub text: String,
    /// Text color
    pub fg: Color,
    /// Background color
    pub bg: Color,
}

impl BillboardMessage {
    /// Decode a captured frame
    pub fn decode(bytes: &[u8]) -> Result<Self, MessageError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|_| MessageError::Decode)?;
        Self::from_value(&value)
    }

    /// Extract the required fields from an already decoded value
    ///
    /// `value` is never parsed again; on failure it is only re-serialized
    /// into the error for display.
    pub fn from_value(value: &Value) -> Result<Self, MessageError> {
        if !value.is_object() {
            return Err(MessageError::NotAnObject);
        }

        let shape = |field: &'static str| MessageError::FieldShape {
            field,
            content: value.to_string(),
        };

        let text = value
            .get(FIELD_TEXT)
            .and_then(Value::as_str)
            .ok_or_else(|| shape(FIELD_TEXT))?;
        let fg = value
            .get(FIELD_FG)
            .and_then(Value::as_str)
            .and_then(Color::from_hex)
            .ok_or_else(|| shape(FIELD_FG))?;
        let bg = value
            .get(FIELD_BG)
            .and_then(Value::as_str)
            .and_then(Color::from_hex)
            .ok_or_else(|| shape(FIELD_BG))?;

        Ok(Self {
            text: text.to_string(),
            fg,
            bg,
        })
    }

    /// Encode as the billboard would send it
    pub fn to_json(&self) -> String {
        serde_json::json!({
            FIELD_TEXT: self.text,
            FIELD_FG: self.fg.to_hex(),
            FIELD_BG: self.bg.to_hex(),
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_bytes() {
        assert_eq!(Command::Next.to_byte(), b'n');
        assert_eq!(Command::Previous.to_byte(), b'p');
        assert_eq!(Command::from_byte(b'n'), Some(Command::Next));
        assert_eq!(Command::from_byte(b'p'), Some(Command::Previous));
        assert_eq!(Command::from_byte(b'N'), None);
    }

    #[test]
    fn test_mirror_scale() {
        // ceil(252 / 64)
        assert_eq!(MIRROR_SCALE, 4);
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("00FF00").map(Color::rgb), Some(0x00FF00));
        assert_eq!(Color::from_hex("ffffff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("0"), Some(Color::BLACK));
        assert_eq!(Color::from_hex("F0F").map(Color::rgb), Some(0x000F0F));
    }

    #[test]
    fn test_color_rejects_bad_hex() {
        assert_eq!(Color::from_hex("ZZZZZZ"), None);
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("0x00FF00"), None);
        assert_eq!(Color::from_hex("+FFFFF"), None);
        assert_eq!(Color::from_hex("1000000"), None);
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::from_hex("a0b"), Color::from_rgb(0xA0B));
        assert_eq!(Color::from_rgb(0xA0B).unwrap().to_hex(), "000A0B");
        assert_eq!(Color::from_rgb(0x1_000_000), None);
    }

    #[test]
    fn test_decode_valid() {
        let msg = BillboardMessage::decode(br#"{"text":"Hi","fg":"FFFFFF","bg":"000000"}"#).unwrap();
        assert_eq!(msg.text, "Hi");
        assert_eq!(msg.fg, Color::WHITE);
        assert_eq!(msg.bg, Color::BLACK);
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let msg =
            BillboardMessage::decode(br#"{"bg":"0000FF","text":"x","fg":"FF0000","page":3}"#)
                .unwrap();
        assert_eq!(msg.fg.rgb(), 0xFF0000);
        assert_eq!(msg.bg.rgb(), 0x0000FF);
    }

    #[test]
    fn test_decode_garbage() {
        assert_eq!(
            BillboardMessage::decode(b"{\"text\":\"Pa"),
            Err(MessageError::Decode)
        );
        assert_eq!(BillboardMessage::decode(b""), Err(MessageError::Decode));
        assert_eq!(BillboardMessage::decode(&[0xFF, 0xFE]), Err(MessageError::Decode));
    }

    #[test]
    fn test_decode_not_an_object() {
        assert_eq!(
            BillboardMessage::decode(b"[1,2,3]"),
            Err(MessageError::NotAnObject)
        );
        assert_eq!(
            BillboardMessage::decode(b"\"text\""),
            Err(MessageError::NotAnObject)
        );
    }

    #[test]
    fn test_invalid_hex_is_field_shape() {
        let err = BillboardMessage::decode(br#"{"text":"Hi","fg":"ZZZZZZ","bg":"000000"}"#)
            .unwrap_err();
        match err {
            MessageError::FieldShape { field, content } => {
                assert_eq!(field, FIELD_FG);
                assert!(content.contains("ZZZZZZ"));
                assert!(content.contains("\"text\":\"Hi\""));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_is_field_shape() {
        let err = BillboardMessage::decode(br#"{"text":"Hi","fg":"FFFFFF"}"#).unwrap_err();
        assert!(matches!(err, MessageError::FieldShape { field: FIELD_BG, .. }));

        let err = BillboardMessage::decode(br#"{"text":7,"fg":"FFFFFF","bg":"000000"}"#)
            .unwrap_err();
        assert!(matches!(err, MessageError::FieldShape { field: FIELD_TEXT, .. }));
    }

    #[test]
    fn test_to_json_decodes_back() {
        let msg = BillboardMessage {
            text: "Page2".into(),
            fg: Color::from_rgb(0x00FF00).unwrap(),
            bg: Color::BLACK,
        };
        let json = msg.to_json();
        assert!(json.contains("\"fg\":\"00FF00\""));
        assert_eq!(BillboardMessage::decode(json.as_bytes()), Ok(msg));
    }
}
