//! UART transmit task
//!
//! Drains the reply queue through DMA. The dispatcher sees the line as busy
//! from `start_write` until the last byte has left the shift register.

use defmt::*;
use embassy_stm32::mode::Async;
use embassy_stm32::usart::UartTx;

use crate::channels::REPLY_QUEUE;

/// UART TX task
#[embassy_executor::task]
pub async fn uart_tx_task(mut tx: UartTx<'static, Async>) {
    info!("UART TX task started");

    loop {
        match REPLY_QUEUE.transmit_next(&mut tx).await {
            Ok(n) => trace!("TX: {} bytes", n),
            Err(e) => error!("UART write error: {:?}", e),
        }
    }
}
