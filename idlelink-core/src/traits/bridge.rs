//! Peripheral bridge
//!
//! The capability interface the dispatcher drives. Board bring-up lives
//! outside the core; the firmware injects an implementation and tests inject
//! a recording fake.

use idlelink_hal::{AnalogInput, AnalogOutput, OutputPin};
use idlelink_protocol::{AnalogChannel, DacValue, PinId};

/// Actuator and converter capabilities available to commands
pub trait PeripheralBridge {
    /// Flip a digital output's logic level
    fn toggle(&mut self, pin: PinId);

    /// Write a 12-bit value to an analog output channel
    fn set_analog_output(&mut self, channel: AnalogChannel, value: DacValue);

    /// Most recent samples of the two analog inputs
    fn read_analog_inputs(&mut self) -> (u16, u16);
}

/// Bridge assembled from HAL trait implementations
///
/// One wired digital output, two DAC channels and an ADC pair. Toggle
/// requests for any other pin are ignored.
pub struct HalBridge<P, D1, D2, A> {
    pin_id: PinId,
    pin: P,
    dac1: D1,
    dac2: D2,
    adc: A,
}

impl<P, D1, D2, A> HalBridge<P, D1, D2, A>
where
    P: OutputPin,
    D1: AnalogOutput,
    D2: AnalogOutput,
    A: AnalogInput,
{
    /// Create a bridge with `pin` wired as `pin_id`
    pub fn new(pin_id: PinId, pin: P, dac1: D1, dac2: D2, adc: A) -> Self {
        Self {
            pin_id,
            pin,
            dac1,
            dac2,
            adc,
        }
    }

    /// Access the digital output
    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P, D1, D2, A> PeripheralBridge for HalBridge<P, D1, D2, A>
where
    P: OutputPin,
    D1: AnalogOutput,
    D2: AnalogOutput,
    A: AnalogInput,
{
    fn toggle(&mut self, pin: PinId) {
        if pin == self.pin_id {
            self.pin.toggle();
        }
    }

    fn set_analog_output(&mut self, channel: AnalogChannel, value: DacValue) {
        match channel {
            AnalogChannel::Ch1 => self.dac1.write(value.get()),
            AnalogChannel::Ch2 => self.dac2.write(value.get()),
        }
    }

    fn read_analog_inputs(&mut self) -> (u16, u16) {
        self.adc.latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
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

    #[derive(Default)]
    struct Dac {
        last: Option<u16>,
    }

    impl AnalogOutput for Dac {
        fn write(&mut self, value: u16) {
            self.last = Some(value);
        }
    }

    struct Adc(u16, u16);

    impl AnalogInput for Adc {
        fn latest(&self) -> (u16, u16) {
            (self.0, self.1)
        }
    }

    fn bridge() -> HalBridge<Led, Dac, Dac, Adc> {
        HalBridge::new(
            PinId::PD12,
            Led::default(),
            Dac::default(),
            Dac::default(),
            Adc(1234, 4095),
        )
    }

    #[test]
    fn test_toggle_wired_pin() {
        let mut b = bridge();
        b.toggle(PinId::PD12);
        assert!(b.pin().is_set_high());
        b.toggle(PinId::PD12);
        assert!(!b.pin().is_set_high());
    }

    #[test]
    fn test_toggle_unwired_pin_is_ignored() {
        let mut b = bridge();
        b.toggle(PinId {
            port: b'D',
            number: 13,
        });
        assert!(!b.pin().is_set_high());
    }

    #[test]
    fn test_dac_channels_are_separate() {
        let mut b = bridge();
        b.set_analog_output(AnalogChannel::Ch1, DacValue::new(2048).unwrap());
        assert_eq!(b.dac1.last, Some(2048));
        assert_eq!(b.dac2.last, None);

        b.set_analog_output(AnalogChannel::Ch2, DacValue::MAX);
        assert_eq!(b.dac2.last, Some(4095));
    }

    #[test]
    fn test_read_analog_inputs() {
        let mut b = bridge();
        assert_eq!(b.read_analog_inputs(), (1234, 4095));
    }
}
