//! UART serial communication abstractions
//!
//! Transmission is modelled the way the DMA engine does it: a transfer is
//! started and then runs in the background while the caller keeps going.

/// UART transmitter with background transfers
///
/// Only `'static` buffers can be handed over. A transfer may still be
/// reading its buffer long after `start_write` has returned, so the buffer
/// must outlive it and must not change underneath it.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Check whether a previously started transfer is still in flight
    fn is_busy(&self) -> bool;

    /// Start a background transfer of `data`.
    ///
    /// Must only be called while `is_busy()` is false. Returns as soon as the
    /// transfer is handed to the hardware.
    fn start_write(&mut self, data: &'static [u8]) -> Result<(), Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baudrate: 115_200 }
    }
}

impl UartConfig {
    /// Bits on the wire per character (start + 8 data + stop, no parity)
    pub const BITS_PER_CHAR: u32 = 10;

    /// Time one character occupies on the line, in microseconds (rounded up)
    pub fn char_time_us(&self) -> u32 {
        if self.baudrate == 0 {
            return u32::MAX;
        }
        (Self::BITS_PER_CHAR * 1_000_000).div_ceil(self.baudrate)
    }
}
