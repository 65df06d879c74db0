//! GPIO pin abstractions
//!
//! Provides the digital output trait implemented by chip-specific HALs.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Flip the pin's logic level
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Led {
        high: bool,
    }

    impl OutputPin for Led {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_default_toggle_flips_level() {
        let mut led = Led { high: false };
        led.toggle();
        assert!(led.is_set_high());
        led.toggle();
        assert!(!led.is_set_high());
    }

    #[test]
    fn test_set_state() {
        let mut led = Led { high: false };
        led.set_state(true);
        assert!(led.is_set_high());
        led.set_state(false);
        assert!(!led.is_set_high());
    }
}
