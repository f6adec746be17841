//! Configuration type definitions

use billboard_hal::{PeripheralName, MAX_NAME_LEN};
use embassy_time::Duration;

use crate::session::ExchangeTiming;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Advertised name of the billboard
pub const DEFAULT_PERIPHERAL_NAME: &str = "F-nRF52";

/// Advertisement scan window
pub const DEFAULT_SCAN_TIMEOUT_MS: u32 = 2_000;

/// Connection attempt bound
pub const DEFAULT_CONNECT_TIMEOUT_MS: u32 = 4_000;

/// Soft wait for the first reply byte
pub const DEFAULT_RESPONSE_DELAY_MS: u32 = 50;

/// Hard bound on a whole exchange, measured from the write
pub const DEFAULT_READ_DEADLINE_MS: u32 = 1_000;

/// Minimum spacing between accepted button presses
pub const DEFAULT_BUTTON_DELAY_MS: u32 = 200;

/// Control loop period
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 10;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Peripheral name is empty
    EmptyName,
    /// Peripheral name longer than an advertisement can carry
    NameTooLong,
    /// Scan window is zero
    ZeroScanTimeout,
    /// Soft response delay is not shorter than the hard read deadline
    DelayExceedsDeadline,
    /// Control loop period is zero
    ZeroPollInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyName => f.write_str("peripheral name is empty"),
            ConfigError::NameTooLong => {
                write!(f, "peripheral name exceeds {} bytes", MAX_NAME_LEN)
            }
            ConfigError::ZeroScanTimeout => f.write_str("scan timeout must be nonzero"),
            ConfigError::DelayExceedsDeadline => {
                f.write_str("response delay must be shorter than the read deadline")
            }
            ConfigError::ZeroPollInterval => f.write_str("poll interval must be nonzero"),
        }
    }
}

/// Remote configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RemoteConfig {
    /// Advertised name to connect to
    pub peripheral_name: PeripheralName,
    /// Scan window (ms)
    pub scan_timeout_ms: u32,
    /// Connection attempt bound (ms)
    pub connect_timeout_ms: u32,
    /// Soft wait for the first reply byte (ms)
    pub response_delay_ms: u32,
    /// Hard bound on an exchange (ms)
    pub read_deadline_ms: u32,
    /// Button debounce window (ms)
    pub button_delay_ms: u32,
    /// Control loop period (ms)
    pub poll_interval_ms: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        let mut peripheral_name = PeripheralName::new();
        let _ = peripheral_name.push_str(DEFAULT_PERIPHERAL_NAME);
        Self {
            peripheral_name,
            scan_timeout_ms: DEFAULT_SCAN_TIMEOUT_MS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            response_delay_ms: DEFAULT_RESPONSE_DELAY_MS,
            read_deadline_ms: DEFAULT_READ_DEADLINE_MS,
            button_delay_ms: DEFAULT_BUTTON_DELAY_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl RemoteConfig {
    /// Default configuration for a differently named billboard
    pub fn for_peripheral(name: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.peripheral_name.clear();
        config
            .peripheral_name
            .push_str(name)
            .map_err(|_| ConfigError::NameTooLong)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.peripheral_name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.scan_timeout_ms == 0 {
            return Err(ConfigError::ZeroScanTimeout);
        }
        if self.response_delay_ms >= self.read_deadline_ms {
            return Err(ConfigError::DelayExceedsDeadline);
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_millis(self.scan_timeout_ms as u64)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms as u64)
    }

    pub fn button_delay(&self) -> Duration {
        Duration::from_millis(self.button_delay_ms as u64)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms as u64)
    }

    /// Session timing derived from this configuration
    pub fn exchange_timing(&self) -> ExchangeTiming {
        ExchangeTiming {
            response_delay: Duration::from_millis(self.response_delay_ms as u64),
            read_deadline: Duration::from_millis(self.read_deadline_ms as u64),
        }
    }
}
