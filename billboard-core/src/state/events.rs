//! Events that trigger state transitions

/// Events that can trigger connection state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // User events
    /// User asked for a scan (dual press while idle)
    ScanRequested,
    /// User asked to connect to the found billboard (dual press)
    ConnectRequested,
    /// User asked to disconnect (dual press while connected)
    Teardown,

    // Discovery events
    /// Scan matched the billboard's advertisement
    PeripheralFound,
    /// Scan window elapsed or failed without a match
    NothingFound,

    // Connection events
    /// Link established with the UART service
    ConnectSucceeded,
    /// Connect timed out, was rejected, or lacked the service
    ConnectFailed,
    /// Link dropped while connected
    LinkLost,
}

impl Event {
    /// Check if this event is user-initiated
    pub fn is_user_event(&self) -> bool {
        matches!(
            self,
            Event::ScanRequested | Event::ConnectRequested | Event::Teardown
        )
    }

    /// Check if this event ends a connection or an attempt at one
    pub fn is_disconnect(&self) -> bool {
        matches!(
            self,
            Event::Teardown | Event::LinkLost | Event::ConnectFailed
        )
    }
}
