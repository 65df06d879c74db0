//! GPIO outputs for STM32F4
//!
//! Wraps any embedded-hal output (embassy's `Output` included) as an
//! `idlelink_hal::OutputPin`.

use embedded_hal::digital::{OutputPin as EhOutputPin, PinState};
use idlelink_hal::OutputPin;

/// Push-pull digital output
///
/// The wrapper owns the pin, so it tracks the driven level itself instead of
/// reading back the output data register.
pub struct PushPullPin<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin> PushPullPin<P> {
    /// Wrap a configured output pin, driving it to `initial_high`
    pub fn new(mut pin: P, initial_high: bool) -> Self {
        let _ = pin.set_state(PinState::from(initial_high));
        Self {
            pin,
            high: initial_high,
        }
    }
}

// GPIO writes on STM32 cannot fail; embassy's error type is `Infallible`
impl<P: EhOutputPin> OutputPin for PushPullPin<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
