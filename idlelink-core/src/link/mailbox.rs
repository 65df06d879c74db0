//! Single-slot frame mailbox
//!
//! Hands completed frames from the receive context to the dispatcher. The
//! slot is a capacity-1 [`Channel`], so publishing a frame happens-before the
//! dispatcher can take it and taking it is a single read-and-clear.
//!
//! The published frame is a separate buffer from the one the framer
//! accumulates into. A new frame can therefore build up while the previous
//! one is still waiting here; the two never share memory.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use heapless::Vec;

/// Single-slot mailbox for `N`-byte frames
pub struct FrameMailbox<M: RawMutex, const N: usize> {
    slot: Channel<M, Vec<u8, N>, 1>,
}

impl<M: RawMutex, const N: usize> Default for FrameMailbox<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> FrameMailbox<M, N> {
    /// Create an empty mailbox
    pub const fn new() -> Self {
        Self {
            slot: Channel::new(),
        }
    }

    /// Publish a complete frame
    ///
    /// Fails without touching the pending frame if the slot is occupied; the
    /// rejected frame is handed back.
    pub fn publish(&self, frame: Vec<u8, N>) -> Result<(), Vec<u8, N>> {
        self.slot.try_send(frame).map_err(|e| match e {
            TrySendError::Full(frame) => frame,
        })
    }

    /// Take the pending frame, if any, clearing the slot
    pub fn try_take(&self) -> Option<Vec<u8, N>> {
        self.slot.try_receive().ok()
    }

    /// Check whether a frame is waiting for the dispatcher
    pub fn is_pending(&self) -> bool {
        !self.slot.is_empty()
    }
}
