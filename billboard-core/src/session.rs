//! Request/response session over a connected link
//!
//! Strictly half-duplex: one command byte out, one brace-framed reply in.
//! The session owns the link and the frame accumulator for its whole
//! lifetime; nothing else reads or writes them.
//!
//! # Timing
//!
//! ```text
//! write ─┬─ response_delay (soft) ─┬──────── read_deadline (hard) ─────────┐
//!        │  wait for first byte    │  keep reading until the frame closes │
//!        └─────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! The soft delay only ends the initial idle wait. A reply that starts late
//! is still read; only the hard deadline abandons the frame.

use alloc::vec::Vec;

use billboard_hal::{Link, LinkError};
use billboard_protocol::{Command, FrameAccumulator, FrameError};
use embassy_time::{with_deadline, with_timeout, Duration, Instant};

use crate::config::{DEFAULT_READ_DEADLINE_MS, DEFAULT_RESPONSE_DELAY_MS};

/// Largest read from the link in one go
pub const RX_CHUNK_SIZE: usize = 64;

/// Wait bounds for one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExchangeTiming {
    /// Soft wait for the first reply byte
    pub response_delay: Duration,
    /// Hard bound on the whole exchange, from the write
    pub read_deadline: Duration,
}

impl Default for ExchangeTiming {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(DEFAULT_RESPONSE_DELAY_MS as u64),
            read_deadline: Duration::from_millis(DEFAULT_READ_DEADLINE_MS as u64),
        }
    }
}

/// A complete reply frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Frame bytes, outermost braces included
    pub payload: Vec<u8>,
    /// First byte arrived after the soft response delay
    pub late: bool,
}

/// Why an exchange produced no frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// Write or read failed on the link
    Transport(LinkError),
    /// Read deadline passed before the frame closed
    ResponseTimeout {
        /// Bytes captured before the deadline
        partial: Vec<u8>,
    },
    /// Reply is not brace-balanced or does not fit
    Framing {
        error: FrameError,
        /// Bytes captured up to the failure
        partial: Vec<u8>,
    },
}

impl ExchangeError {
    /// Check if the exchange ran out of time
    ///
    /// Transport failures count as timeouts from the user's point of view.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ExchangeError::Transport(_) | ExchangeError::ResponseTimeout { .. }
        )
    }

    /// Check if the link went away
    pub fn is_link_lost(&self) -> bool {
        matches!(self, ExchangeError::Transport(LinkError::Disconnected))
    }

    /// Bytes received before the failure
    pub fn partial(&self) -> &[u8] {
        match self {
            ExchangeError::Transport(_) => &[],
            ExchangeError::ResponseTimeout { partial } => partial,
            ExchangeError::Framing { partial, .. } => partial,
        }
    }
}

impl core::fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExchangeError::Transport(e) => write!(f, "link error: {:?}", e),
            ExchangeError::ResponseTimeout { partial } => {
                write!(f, "no complete reply ({} bytes received)", partial.len())
            }
            ExchangeError::Framing { error, .. } => write!(f, "bad reply frame: {}", error),
        }
    }
}

/// Session over a connected link
pub struct Session<L: Link> {
    link: L,
    frame: FrameAccumulator,
    timing: ExchangeTiming,
}

impl<L: Link> Session<L> {
    /// Take ownership of a freshly connected link
    pub fn new(link: L, timing: ExchangeTiming) -> Self {
        Self {
            link,
            frame: FrameAccumulator::new(),
            timing,
        }
    }

    /// Check if the peripheral is still connected
    pub fn is_link_up(&self) -> bool {
        self.link.is_connected()
    }

    /// Disconnect and drop the session
    pub fn close(mut self) {
        self.frame.abandon();
        self.link.disconnect();
    }

    /// Send `command` and read one reply frame
    pub async fn exchange(&mut self, command: Command) -> Result<Response, ExchangeError> {
        // A stale reply would frame as this one
        self.link.reset_input_buffer();
        self.link
            .write(&[command.to_byte()])
            .await
            .map_err(ExchangeError::Transport)?;

        self.frame.begin();
        let sent_at = Instant::now();
        let deadline = sent_at + self.timing.read_deadline;
        trace!("sent {=u8}", command.to_byte());

        let mut late = false;
        if self.link.available() == 0 {
            match with_timeout(self.timing.response_delay, self.link.wait_readable()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(self.transport_failure(e)),
                Err(_) => {
                    debug!("response delay expired");
                    late = true;
                }
            }
        }

        let mut chunk = [0u8; RX_CHUNK_SIZE];
        while self.frame.is_capturing() {
            if Instant::now() >= deadline {
                return Err(self.timed_out());
            }

            if self.link.available() == 0 {
                match with_deadline(deadline, self.link.wait_readable()).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => return Err(self.transport_failure(e)),
                    Err(_) => return Err(self.timed_out()),
                }
            }

            let n = match self.link.read(&mut chunk) {
                Ok(n) => n,
                Err(e) => return Err(self.transport_failure(e)),
            };

            if let Err(error) = self.frame.feed(&chunk[..n]) {
                warn!("reply framing failed: {:?}", error);
                return Err(ExchangeError::Framing {
                    error,
                    partial: self.frame.captured().to_vec(),
                });
            }
        }

        let payload = self.frame.frame().map(<[u8]>::to_vec).unwrap_or_default();
        debug!(
            "reply of {=usize} bytes in {=u64} ms",
            payload.len(),
            sent_at.elapsed().as_millis()
        );
        Ok(Response { payload, late })
    }

    fn transport_failure(&mut self, error: LinkError) -> ExchangeError {
        warn!("link error during exchange: {:?}", error);
        self.frame.abandon();
        ExchangeError::Transport(error)
    }

    fn timed_out(&mut self) -> ExchangeError {
        warn!("reply deadline passed");
        self.frame.abandon();
        ExchangeError::ResponseTimeout {
            partial: self.frame.captured().to_vec(),
        }
    }
}
