//! State machine definition
//!
//! ```text
//! Idle ──scan──► Scanning ──found──► Found ──connect──► Connecting ──ok──► Connected
//!  ▲                │                                      │                 │
//!  └──nothing found─┘◄──────────────── failed ─────────────┘◄─ teardown/lost ┘
//! ```

use super::events::Event;

/// Connection states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    /// No peripheral known, no link
    #[default]
    Idle,
    /// Scan window open
    Scanning,
    /// Billboard found, handle held, waiting for the user to connect
    Found,
    /// Connection attempt in progress
    Connecting,
    /// Session active
    Connected,
}

impl ConnectionState {
    /// Check if a session exists in this state
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Check if a peripheral handle is held in this state
    pub fn holds_handle(&self) -> bool {
        matches!(self, ConnectionState::Found | ConnectionState::Connecting)
    }

    /// Check if this state waits on the user
    pub fn is_resting(&self) -> bool {
        matches!(
            self,
            ConnectionState::Idle | ConnectionState::Found | ConnectionState::Connected
        )
    }

    /// Process an event and return the next state
    ///
    /// Unrecognised (state, event) pairs leave the state unchanged.
    pub fn transition(self, event: Event) -> Self {
        use ConnectionState::*;
        use Event::*;

        match (self, event) {
            // Idle transitions
            (Idle, ScanRequested) => Scanning,

            // Scanning transitions
            (Scanning, PeripheralFound) => Found,
            (Scanning, NothingFound) => Idle,

            // Found transitions
            (Found, ConnectRequested) => Connecting,

            // Connecting transitions
            (Connecting, ConnectSucceeded) => Connected,
            (Connecting, ConnectFailed) => Idle,

            // Connected transitions
            (Connected, Teardown) => Idle,
            (Connected, LinkLost) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
