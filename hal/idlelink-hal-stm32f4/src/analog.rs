//! DAC outputs and sampled ADC inputs for STM32F4
//!
//! STM32F407 has one DAC with two 12-bit channels:
//! - Channel 1: PA4
//! - Channel 2: PA5
//!
//! The two analog inputs are ADC1 channels 6 (PA6) and 7 (PA7), sampled
//! continuously by a firmware task into a [`SampledInputs`] cell.

use embassy_stm32::dac::{DacCh1, DacCh2, Value};
use embassy_stm32::mode::Blocking;
use embassy_stm32::peripherals::DAC1;
use idlelink_hal::{AnalogInput, AnalogOutput, DAC_MAX};
use portable_atomic::{AtomicU32, Ordering};

/// DAC channel 1 (PA4)
pub struct Dac1Output<'d> {
    ch: DacCh1<'d, DAC1, Blocking>,
}

impl<'d> Dac1Output<'d> {
    /// Wrap a configured channel
    pub fn new(ch: DacCh1<'d, DAC1, Blocking>) -> Self {
        Self { ch }
    }
}

impl AnalogOutput for Dac1Output<'_> {
    fn write(&mut self, value: u16) {
        self.ch.set(Value::Bit12Right(value & DAC_MAX));
    }
}

/// DAC channel 2 (PA5)
pub struct Dac2Output<'d> {
    ch: DacCh2<'d, DAC1, Blocking>,
}

impl<'d> Dac2Output<'d> {
    /// Wrap a configured channel
    pub fn new(ch: DacCh2<'d, DAC1, Blocking>) -> Self {
        Self { ch }
    }
}

impl AnalogOutput for Dac2Output<'_> {
    fn write(&mut self, value: u16) {
        self.ch.set(Value::Bit12Right(value & DAC_MAX));
    }
}

/// Latest pair of ADC samples, shared between the sampling task and readers
///
/// Both samples live in one word so a reader never sees a pair mixed from
/// two different scans.
pub struct SampledInputs {
    packed: AtomicU32,
}

impl Default for SampledInputs {
    fn default() -> Self {
        Self::new()
    }
}

impl SampledInputs {
    /// Create with both samples at zero
    pub const fn new() -> Self {
        Self {
            packed: AtomicU32::new(0),
        }
    }

    /// Publish a completed scan
    pub fn store(&self, first: u16, second: u16) {
        let packed = (u32::from(second & DAC_MAX) << 16) | u32::from(first & DAC_MAX);
        self.packed.store(packed, Ordering::Release);
    }

    /// Read the latest completed scan
    pub fn load(&self) -> (u16, u16) {
        let packed = self.packed.load(Ordering::Acquire);
        ((packed & 0xFFFF) as u16, (packed >> 16) as u16)
    }
}

impl AnalogInput for &SampledInputs {
    fn latest(&self) -> (u16, u16) {
        self.load()
    }
}
