//! Link configuration
//!
//! The idle threshold must be longer than any gap inside one burst from the
//! host and shorter than the smallest gap between two commands. The lower
//! bound is expressed in character times at the configured baud rate.

use idlelink_hal::UartConfig;

/// Slowest supported baud rate
pub const MIN_BAUDRATE: u32 = 1_200;
/// Fastest supported baud rate
pub const MAX_BAUDRATE: u32 = 4_000_000;
/// Minimum idle threshold, in character times
pub const MIN_IDLE_CHARS: u32 = 2;
/// Longest idle threshold accepted
pub const MAX_IDLE_TIMEOUT_US: u32 = 100_000;
/// Default idle threshold (about 23 character times at 115200 baud)
pub const DEFAULT_IDLE_TIMEOUT_US: u32 = 2_000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Line is not `key = value`, or a value is not an integer
    InvalidValue,
    /// Unknown `[section]`
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Baud rate outside the supported range
    InvalidBaudrate,
    /// Idle threshold shorter than the minimum character times
    IdleTooShort,
    /// Idle threshold above the maximum
    IdleTooLong,
}

/// UART link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Serial line settings
    pub uart: UartConfig,
    /// Silence that ends a frame, in microseconds
    pub idle_timeout_us: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            uart: UartConfig::default(),
            idle_timeout_us: DEFAULT_IDLE_TIMEOUT_US,
        }
    }
}

impl LinkConfig {
    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BAUDRATE..=MAX_BAUDRATE).contains(&self.uart.baudrate) {
            return Err(ConfigError::InvalidBaudrate);
        }
        if self.idle_timeout_us < self.min_idle_timeout_us() {
            return Err(ConfigError::IdleTooShort);
        }
        if self.idle_timeout_us > MAX_IDLE_TIMEOUT_US {
            return Err(ConfigError::IdleTooLong);
        }
        Ok(())
    }

    /// Shortest idle threshold allowed at the configured baud rate
    pub fn min_idle_timeout_us(&self) -> u32 {
        self.uart.char_time_us().saturating_mul(MIN_IDLE_CHARS)
    }

    /// Idle threshold expressed in character times (rounded down)
    pub fn idle_chars(&self) -> u32 {
        self.idle_timeout_us / self.uart.char_time_us().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LinkConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.uart.baudrate, 115_200);
        assert_eq!(config.idle_chars(), 22);
    }

    #[test]
    fn test_idle_shorter_than_two_chars() {
        let config = LinkConfig {
            uart: UartConfig { baudrate: 9_600 },
            idle_timeout_us: 2_000,
        };
        // Two characters at 9600 baud take 2084us
        assert_eq!(config.validate(), Err(ConfigError::IdleTooShort));
    }

    #[test]
    fn test_idle_too_long() {
        let config = LinkConfig {
            idle_timeout_us: MAX_IDLE_TIMEOUT_US + 1,
            ..LinkConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::IdleTooLong));
    }

    #[test]
    fn test_baudrate_bounds() {
        let slow = LinkConfig {
            uart: UartConfig { baudrate: 300 },
            idle_timeout_us: MAX_IDLE_TIMEOUT_US,
        };
        assert_eq!(slow.validate(), Err(ConfigError::InvalidBaudrate));

        let zero = LinkConfig {
            uart: UartConfig { baudrate: 0 },
            ..LinkConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::InvalidBaudrate));
    }
}
