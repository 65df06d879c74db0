//! Embassy async tasks
//!
//! Each task runs independently and communicates through the statics in
//! `channels`.

pub mod adc;
pub mod tick;
pub mod uart_rx;
pub mod uart_tx;

pub use adc::adc_task;
pub use tick::{tick_task, TICK_MS};
pub use uart_rx::uart_rx_task;
pub use uart_tx::uart_tx_task;
