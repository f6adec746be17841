//! Rendered content

use alloc::string::String;

use billboard_protocol::BillboardMessage;

/// What the remote's main label shows
///
/// Exactly one variant is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayContent {
    /// Mirror of the billboard's current page
    Mirror(BillboardMessage),
    /// Prompt or diagnostic text
    Plain(String),
}

impl DisplayContent {
    /// Plain text content
    pub fn plain(text: impl Into<String>) -> Self {
        DisplayContent::Plain(text.into())
    }

    /// Empty label
    pub fn blank() -> Self {
        DisplayContent::Plain(String::new())
    }

    /// Text shown on the label
    pub fn text(&self) -> &str {
        match self {
            DisplayContent::Mirror(msg) => &msg.text,
            DisplayContent::Plain(text) => text,
        }
    }

    /// True for mirrored billboard content
    pub fn is_mirror(&self) -> bool {
        matches!(self, DisplayContent::Mirror(_))
    }
}

impl From<BillboardMessage> for DisplayContent {
    fn from(msg: BillboardMessage) -> Self {
        DisplayContent::Mirror(msg)
    }
}
