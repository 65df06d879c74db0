//! UART support for STM32F4
//!
//! Embassy drives USART DMA transfers as futures owned by a task. The
//! [`ReplyQueue`] bridges that to the start-and-forget `idlelink_hal::UartTx`
//! model: `start_write` parks the buffer in a one-slot queue and marks the
//! line busy, the TX task drains it through DMA and clears the flag once the
//! last stop bit has left the shift register.

use embassy_stm32::mode::Async;
use embassy_stm32::usart::{self, Error as UsartError};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use idlelink_hal::{UartConfig, UartTx};
use portable_atomic::{AtomicBool, Ordering};

/// Build an embassy USART configuration (8N1) from link settings
pub fn usart_config(config: &UartConfig) -> usart::Config {
    let mut cfg = usart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = usart::DataBits::DataBits8;
    cfg.parity = usart::Parity::ParityNone;
    cfg.stop_bits = usart::StopBits::STOP1;
    cfg
}

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Buffer too large for a single DMA transfer
    BufferTooLong,
    /// A transfer was started while the previous one was still queued
    Busy,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            UsartError::BufferTooLong => UartBusError::BufferTooLong,
            _ => UartBusError::Other,
        }
    }
}

/// One-slot queue between the dispatcher and the DMA transmit task
pub struct ReplyQueue {
    slot: Channel<CriticalSectionRawMutex, &'static [u8], 1>,
    busy: AtomicBool,
}

impl Default for ReplyQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyQueue {
    /// Create an idle queue
    pub const fn new() -> Self {
        Self {
            slot: Channel::new(),
            busy: AtomicBool::new(false),
        }
    }

    /// Transmitter handle for the dispatcher
    pub fn sender(&'static self) -> QueuedTx {
        QueuedTx { queue: self }
    }

    /// Transmit the next queued buffer through DMA
    ///
    /// Waits for a buffer, writes it, waits for transmission complete and
    /// then releases the line. Call in a loop from the TX task.
    pub async fn transmit_next(
        &self,
        tx: &mut usart::UartTx<'_, Async>,
    ) -> Result<usize, UartBusError> {
        let data = self.slot.receive().await;
        let result = tx.write(data).await.and_then(|()| tx.blocking_flush());
        self.busy.store(false, Ordering::Release);
        result.map(|()| data.len()).map_err(UartBusError::from)
    }
}

/// `UartTx` handle backed by a [`ReplyQueue`]
#[derive(Clone, Copy)]
pub struct QueuedTx {
    queue: &'static ReplyQueue,
}

impl UartTx for QueuedTx {
    type Error = UartBusError;

    fn is_busy(&self) -> bool {
        self.queue.busy.load(Ordering::Acquire)
    }

    fn start_write(&mut self, data: &'static [u8]) -> Result<(), Self::Error> {
        if self.queue.busy.swap(true, Ordering::AcqRel) {
            return Err(UartBusError::Busy);
        }
        self.queue.slot.try_send(data).map_err(|_| {
            self.queue.busy.store(false, Ordering::Release);
            UartBusError::Busy
        })
    }
}
