//! Brace-balance framing for billboard replies.
//!
//! The billboard sends one JSON object per request and no length header.
//! The accumulator counts open and close braces as bytes arrive:
//! - `{` increments depth, `}` decrements it
//! - the frame is complete when depth returns to 0 after having been nonzero
//! - depth below 0 is an unbalanced stream, never a frame
//!
//! A stream with unmatched open braces stays `Pending` forever; the session
//! bounds that with a deadline.

use heapless::Vec;

/// Opening brace
pub const OPEN_BRACE: u8 = b'{';

/// Closing brace
pub const CLOSE_BRACE: u8 = b'}';

/// Maximum reply size in bytes
pub const MAX_FRAME_SIZE: usize = 512;

/// Errors that end a capture early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// A `}` arrived with no matching `{`
    Unbalanced,
    /// Reply exceeded [`MAX_FRAME_SIZE`]
    Overflow,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::Unbalanced => f.write_str("unbalanced braces"),
            FrameError::Overflow => f.write_str("reply too large"),
        }
    }
}

/// Result of feeding bytes to the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameStatus {
    /// No capture active, bytes were discarded
    Idle,
    /// Capture active, frame not yet balanced
    Pending,
    /// A complete frame is available
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    /// Not capturing (never started, or failed)
    Idle,
    /// Appending bytes and tracking depth
    Capturing,
    /// Frame balanced; buffer holds the frame
    Complete,
}

/// Incremental frame capture
#[derive(Debug, Clone)]
pub struct FrameAccumulator {
    state: CaptureState,
    buffer: Vec<u8, MAX_FRAME_SIZE>,
    depth: i32,
    opened: bool,
}

impl Default for FrameAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAccumulator {
    /// Create an idle accumulator
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            buffer: Vec::new(),
            depth: 0,
            opened: false,
        }
    }

    /// Start capturing a new frame
    ///
    /// Discards any previous frame or partial bytes.
    pub fn begin(&mut self) {
        self.buffer.clear();
        self.depth = 0;
        self.opened = false;
        self.state = CaptureState::Capturing;
    }

    /// Stop capturing without completing
    pub fn abandon(&mut self) {
        self.state = CaptureState::Idle;
    }

    /// Check if a capture is in progress
    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    /// Current open-minus-close brace count
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// The completed frame, if the last capture finished
    pub fn frame(&self) -> Option<&[u8]> {
        match self.state {
            CaptureState::Complete => Some(&self.buffer),
            _ => None,
        }
    }

    /// Bytes captured so far, complete or not
    pub fn captured(&self) -> &[u8] {
        &self.buffer
    }

    /// Feed a single byte
    pub fn feed_byte(&mut self, byte: u8) -> Result<FrameStatus, FrameError> {
        if self.state != CaptureState::Capturing {
            return Ok(FrameStatus::Idle);
        }

        if self.buffer.push(byte).is_err() {
            self.state = CaptureState::Idle;
            return Err(FrameError::Overflow);
        }

        match byte {
            OPEN_BRACE => {
                self.depth += 1;
                self.opened = true;
            }
            CLOSE_BRACE => self.depth -= 1,
            _ => {}
        }

        if self.depth < 0 {
            self.state = CaptureState::Idle;
            return Err(FrameError::Unbalanced);
        }

        if self.opened && self.depth == 0 {
            self.state = CaptureState::Complete;
            return Ok(FrameStatus::Complete);
        }

        Ok(FrameStatus::Pending)
    }

    /// Feed a chunk of bytes
    ///
    /// Stops at the byte that completes the frame; the rest of the chunk is
    /// not part of it and is dropped.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<FrameStatus, FrameError> {
        if self.state != CaptureState::Capturing {
            return Ok(FrameStatus::Idle);
        }

        for &byte in bytes {
            if self.feed_byte(byte)? == FrameStatus::Complete {
                return Ok(FrameStatus::Complete);
            }
        }
        Ok(FrameStatus::Pending)
    }
}
