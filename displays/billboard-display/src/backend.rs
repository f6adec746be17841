//! Display backend trait
//!
//! Defines the interface the core renders into.

use crate::content::DisplayContent;

/// Display backend trait
///
/// Rendering is infallible from the core's point of view: a backend must
/// accept every `DisplayContent` the core can produce, and deal with its
/// own hardware errors.
pub trait DisplayBackend {
    /// Replace the main label
    fn render(&mut self, content: &DisplayContent);

    /// Update the small status line (last button pressed)
    fn show_status(&mut self, status: &str) {
        let _ = status;
    }
}
