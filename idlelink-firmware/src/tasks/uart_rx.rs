//! UART receive task
//!
//! DMA runs in circular mode into a ring buffer, so bytes keep landing while
//! this task is not reading. A frame ends when no byte has arrived for the
//! configured idle time: each read is raced against the framer's idle
//! deadline and losing the race closes the frame.

use defmt::*;
use embassy_stm32::usart::RingBufferedUartRx;
use embassy_time::{with_deadline, Instant};

use idlelink_core::link::{FrameReceiver, RxEvent};
use idlelink_hal_stm32f4::UartBusError;

use crate::channels::{FRAME_MAILBOX, LINK_STATS};

/// Bytes copied out of the DMA ring per read
const RX_CHUNK_SIZE: usize = 32;

fn now_us() -> u64 {
    Instant::now().as_micros()
}

/// UART RX task - turns the byte stream into frames
#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: RingBufferedUartRx<'static>, idle_timeout_us: u32) {
    info!("UART RX task started (idle {} us)", idle_timeout_us);

    let mut receiver = FrameReceiver::new(&FRAME_MAILBOX, idle_timeout_us);
    receiver.start();

    let mut chunk = [0u8; RX_CHUNK_SIZE];

    loop {
        let read = match receiver.idle_deadline_us() {
            Some(deadline) => {
                with_deadline(Instant::from_micros(deadline), rx.read(&mut chunk))
                    .await
                    .ok()
            }
            None => Some(rx.read(&mut chunk).await),
        };

        match read {
            Some(Ok(n)) => {
                trace!("RX: {} bytes", n);
                receiver.on_bytes(&chunk[..n], now_us());
            }
            Some(Err(e)) => {
                warn!("UART read error: {:?}", UartBusError::from(e));
                receiver.on_line_error(now_us());
            }
            None => {}
        }

        if let Some(event) = receiver.on_idle(now_us()) {
            match event {
                RxEvent::Published { len } => debug!("Frame ready: {} bytes", len),
                RxEvent::Rejected { reason, len } => {
                    warn!("Frame rejected ({:?}) after {} bytes", reason, len)
                }
                RxEvent::Dropped { len } => {
                    warn!("Previous frame still pending, dropped {} bytes", len)
                }
            }
            LINK_STATS.signal(receiver.stats());
        }
    }
}
