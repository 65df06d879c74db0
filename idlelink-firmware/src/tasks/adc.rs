//! Analog input sampling
//!
//! Scans ADC1 channels 6 (PA6) and 7 (PA7) continuously and publishes each
//! completed pair.

use defmt::*;
use embassy_stm32::adc::{Adc, AnyAdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;
use embassy_time::{Duration, Ticker};

use crate::channels::ANALOG_INPUTS;

/// Interval between scans in milliseconds
const SAMPLE_INTERVAL_MS: u64 = 1;

/// ADC task
#[embassy_executor::task]
pub async fn adc_task(
    mut adc: Adc<'static, ADC1>,
    mut first: AnyAdcChannel<ADC1>,
    mut second: AnyAdcChannel<ADC1>,
) {
    info!("ADC task started");

    adc.set_sample_time(SampleTime::CYCLES480);
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));

    loop {
        let a = adc.blocking_read(&mut first);
        let b = adc.blocking_read(&mut second);
        ANALOG_INPUTS.store(a, b);

        ticker.next().await;
    }
}
