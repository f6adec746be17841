//! Byte stream abstraction for a connected peripheral
//!
//! Modelled on a UART: the peripheral's notifications land in a receive
//! buffer, writes go out as they are. Bytes arrive in arbitrary-sized
//! chunks with no framing of their own.

/// Errors reported by a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Peripheral went away
    Disconnected,
    /// Receive buffer overflowed and bytes were lost
    Overrun,
    /// Any other BLE stack error
    Transport,
}

/// Bidirectional byte stream to a connected peripheral
pub trait Link {
    /// Write all of `data`
    async fn write(&mut self, data: &[u8]) -> Result<(), LinkError>;

    /// Number of bytes waiting in the receive buffer
    fn available(&mut self) -> usize;

    /// Read up to `buf.len()` buffered bytes without waiting
    ///
    /// Returns the number of bytes copied, `0` if nothing is buffered.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError>;

    /// Discard everything in the receive buffer
    fn reset_input_buffer(&mut self);

    /// Wait until at least one byte is buffered
    ///
    /// The caller bounds the wait.
    async fn wait_readable(&mut self) -> Result<(), LinkError>;

    /// Check if the peripheral is still connected
    fn is_connected(&self) -> bool;

    /// Close this connection
    fn disconnect(&mut self);
}
