//! Analog converter abstractions
//!
//! Both converters on the target are 12-bit, right aligned.

/// Largest value a 12-bit converter accepts or produces
pub const DAC_MAX: u16 = 4095;

/// One DAC output channel
pub trait AnalogOutput {
    /// Write a 12-bit value to the channel.
    ///
    /// Callers guarantee `value <= DAC_MAX`; implementations may mask the
    /// upper bits.
    fn write(&mut self, value: u16);
}

/// A pair of continuously sampled ADC inputs
///
/// Sampling runs in the background. Reads return the most recent completed
/// conversion of each channel.
pub trait AnalogInput {
    /// Latest samples of the first and second input, 12-bit each
    fn latest(&self) -> (u16, u16);
}
