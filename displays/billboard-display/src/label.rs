//! Label presentation model
//!
//! The remote shows everything through one text label plus a short status
//! line. Mirrored pages are scaled up so they match the billboard's width;
//! prompts use a smaller fixed scale in white on no background.

use alloc::string::String;

use billboard_protocol::{Color, MIRROR_SCALE};
use heapless::String as StatusString;

use crate::backend::DisplayBackend;
use crate::content::DisplayContent;

/// Text scale for prompts and diagnostics
pub const PLAIN_TEXT_SCALE: u8 = 2;

/// Maximum status line length
pub const STATUS_LEN: usize = 8;

/// Status shown before any button is pressed
const IDLE_STATUS: &str = "o-o";

/// Visual properties of the main label
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LabelStyle {
    /// Label text
    pub text: String,
    /// Text color
    pub color: Color,
    /// Background fill, `None` for transparent
    pub background: Option<Color>,
    /// Integer text scale
    pub scale: u8,
}

impl LabelStyle {
    /// Map content to label properties
    pub fn for_content(content: &DisplayContent) -> Self {
        match content {
            DisplayContent::Mirror(msg) => Self {
                text: msg.text.clone(),
                color: msg.fg,
                background: Some(msg.bg),
                scale: MIRROR_SCALE,
            },
            DisplayContent::Plain(text) => Self {
                text: text.clone(),
                color: Color::WHITE,
                background: None,
                scale: PLAIN_TEXT_SCALE,
            },
        }
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::for_content(&DisplayContent::blank())
    }
}

/// In-memory display: current label style and status line
///
/// Tracks whether anything changed since the board last pushed it to the
/// screen.
#[derive(Debug, Clone)]
pub struct Label {
    style: LabelStyle,
    status: StatusString<STATUS_LEN>,
    dirty: bool,
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

impl Label {
    /// Create a blank label
    pub fn new() -> Self {
        let mut status = StatusString::new();
        let _ = status.push_str(IDLE_STATUS);
        Self {
            style: LabelStyle::default(),
            status,
            dirty: true,
        }
    }

    /// Current label style
    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    /// Current status line
    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    /// Check if the label needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark label as clean (after pushing to the screen)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl DisplayBackend for Label {
    fn render(&mut self, content: &DisplayContent) {
        self.style = LabelStyle::for_content(content);
        self.dirty = true;
    }

    fn show_status(&mut self, status: &str) {
        self.status.clear();
        // Truncate on a char boundary if too long
        for c in status.chars() {
            if self.status.push(c).is_err() {
                break;
            }
        }
        self.dirty = true;
    }
}
