//! Transmit path
//!
//! Serializes replies onto a background-transfer UART. A send waits for the
//! previous transfer to leave the line, then starts the next one and returns
//! without waiting for it.

use embassy_futures::yield_now;
use idlelink_hal::UartTx;

/// Reply transmitter over a background-transfer UART
pub struct TransmitPath<T: UartTx> {
    tx: T,
    sent: u32,
    busy_polls: u32,
}

impl<T: UartTx> TransmitPath<T> {
    /// Wrap a UART transmitter
    pub fn new(tx: T) -> Self {
        Self {
            tx,
            sent: 0,
            busy_polls: 0,
        }
    }

    /// Send a reply
    ///
    /// While the previous transfer is still in flight this yields back to
    /// the executor and checks again; the wait is bounded by the transfer
    /// time of the previous reply.
    pub async fn send(&mut self, reply: &'static [u8]) -> Result<(), T::Error> {
        while self.tx.is_busy() {
            self.busy_polls = self.busy_polls.wrapping_add(1);
            yield_now().await;
        }
        self.tx.start_write(reply)?;
        self.sent = self.sent.wrapping_add(1);
        Ok(())
    }

    /// Replies started since boot
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Times a send found the line busy and had to wait
    pub fn busy_polls(&self) -> u32 {
        self.busy_polls
    }

    /// Access the underlying transmitter
    pub fn inner(&self) -> &T {
        &self.tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embassy_futures::block_on;

    /// Fake DMA transmitter: each transfer stays busy for `hold` polls
    struct FakeTx {
        hold: u32,
        remaining: Cell<u32>,
        log: heapless::Vec<&'static [u8], 8>,
    }

    impl FakeTx {
        fn new(hold: u32) -> Self {
            Self {
                hold,
                remaining: Cell::new(0),
                log: heapless::Vec::new(),
            }
        }
    }

    impl UartTx for FakeTx {
        type Error = ();

        fn is_busy(&self) -> bool {
            let left = self.remaining.get();
            if left == 0 {
                return false;
            }
            self.remaining.set(left - 1);
            true
        }

        fn start_write(&mut self, data: &'static [u8]) -> Result<(), ()> {
            assert_eq!(self.remaining.get(), 0, "started while busy");
            self.log.push(data).map_err(|_| ())?;
            self.remaining.set(self.hold);
            Ok(())
        }
    }

    #[test]
    fn test_send_on_idle_line_starts_immediately() {
        let mut path = TransmitPath::new(FakeTx::new(0));
        block_on(path.send(b"[DONE]")).unwrap();
        assert_eq!(path.sent(), 1);
        assert_eq!(path.busy_polls(), 0);
        assert_eq!(&path.inner().log[..], &[&b"[DONE]"[..]]);
    }

    #[test]
    fn test_send_waits_for_previous_transfer() {
        let mut path = TransmitPath::new(FakeTx::new(3));
        block_on(path.send(b"[DONE]")).unwrap();
        block_on(path.send(b"[DONE]")).unwrap();

        assert_eq!(path.sent(), 2);
        assert_eq!(path.busy_polls(), 3);
        assert_eq!(path.inner().log.len(), 2);
    }

    #[test]
    fn test_start_error_propagates() {
        let mut path = TransmitPath::new(FakeTx::new(0));
        for _ in 0..8 {
            block_on(path.send(b"[DONE]")).unwrap();
        }
        // Fake log is full: the ninth start fails
        assert_eq!(block_on(path.send(b"[DONE]")), Err(()));
        assert_eq!(path.sent(), 8);
    }
}
