//! BLE central abstractions
//!
//! The remote acts as a BLE central: it scans advertisements, connects to
//! one peripheral and talks to it through a UART-style service.
//!
//! ```text
//! start_scan ──► next_advertisement* ──► stop_scan
//!                       │
//!                       ▼ (name match)
//!                PeripheralHandle ──► connect ──► Link
//! ```

use heapless::String;

use crate::link::Link;

/// Maximum advertised name length (31-byte advertising payload minus headers)
pub const MAX_NAME_LEN: usize = 29;

/// Advertised peripheral name
pub type PeripheralName = String<MAX_NAME_LEN>;

/// 48-bit BLE device address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(pub [u8; 6]);

/// A single advertisement report received during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Advertisement {
    /// Advertiser address
    pub address: Address,
    /// Complete local name, if the advertiser included one
    pub complete_name: Option<PeripheralName>,
    /// Received signal strength (dBm)
    pub rssi: i8,
}

impl Advertisement {
    /// Check whether the complete name equals `name` exactly
    pub fn name_matches(&self, name: &str) -> bool {
        self.complete_name.as_deref() == Some(name)
    }

    /// Turn a named advertisement into a connectable handle
    ///
    /// Returns `None` for advertisements without a complete name.
    pub fn into_handle(self) -> Option<PeripheralHandle> {
        let name = self.complete_name?;
        Some(PeripheralHandle::new(self.address, name))
    }
}

/// Connectable peripheral found by a scan
///
/// Not `Clone`: a handle is consumed by exactly one [`Radio::connect`]
/// attempt, successful or not.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeripheralHandle {
    address: Address,
    name: PeripheralName,
}

impl PeripheralHandle {
    /// Create a handle for a peripheral
    pub fn new(address: Address, name: PeripheralName) -> Self {
        Self { address, name }
    }

    /// Peripheral address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Advertised name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Copy of the advertised name that outlives the handle
    pub fn name_owned(&self) -> PeripheralName {
        self.name.clone()
    }
}

/// Errors reported by the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Scan could not be started or was aborted by the stack
    ScanFailed,
    /// Connection attempt timed out
    Timeout,
    /// Peripheral rejected the connection
    Rejected,
    /// Connected, but the peripheral does not expose the UART service
    ServiceMissing,
    /// Any other BLE stack error
    Transport,
}

impl RadioError {
    /// True if the radio-level connect itself failed
    ///
    /// `ServiceMissing` happens after the link came up, so the peripheral is
    /// no longer the thing being connected to.
    pub fn is_connect_failure(&self) -> bool {
        matches!(
            self,
            RadioError::Timeout | RadioError::Rejected | RadioError::Transport
        )
    }
}

/// BLE central radio
///
/// Implementations do NOT need to be `Send` or `Sync`; the remote runs in a
/// single executor.
pub trait Radio {
    /// Byte stream produced by a successful connect
    type Link: Link;

    /// Start delivering advertisement reports
    fn start_scan(&mut self) -> Result<(), RadioError>;

    /// Wait for the next advertisement report
    ///
    /// Only valid between [`start_scan`](Self::start_scan) and
    /// [`stop_scan`](Self::stop_scan). The caller bounds the wait.
    async fn next_advertisement(&mut self) -> Result<Advertisement, RadioError>;

    /// Stop scanning and release scan buffers
    ///
    /// Must be safe to call when no scan is running.
    fn stop_scan(&mut self);

    /// Connect to a peripheral and open its UART service
    async fn connect(&mut self, peripheral: PeripheralHandle) -> Result<Self::Link, RadioError>;

    /// Drop every active connection on the radio
    fn disconnect_all(&mut self);

    /// Number of active connections
    fn connection_count(&self) -> usize;
}
