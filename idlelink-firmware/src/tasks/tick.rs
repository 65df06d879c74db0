//! Tick task
//!
//! Keeps a free-running millisecond counter for the heartbeat and anything
//! else that needs coarse time without reading the timer driver.

use defmt::*;
use embassy_time::{Duration, Ticker};
use portable_atomic::{AtomicU32, Ordering};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 10;

/// Milliseconds since the tick task started (wraps after ~49 days)
pub static TICK_MS: AtomicU32 = AtomicU32::new(0);

/// Tick task - advances [`TICK_MS`] every [`TICK_INTERVAL_MS`]
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;
        TICK_MS.fetch_add(TICK_INTERVAL_MS, Ordering::Relaxed);
    }
}
