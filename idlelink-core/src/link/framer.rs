//! Idle-timeout framer
//!
//! Turns an unframed byte stream into frames using silence as the delimiter.
//! Every byte restarts the idle timer; once the line has been quiet for the
//! configured interval the bytes collected so far form one frame.
//!
//! State machine:
//! ```text
//!            byte                      byte (timer restart)
//!   Idle ───────────▶ Accumulating ◀──────┐
//!    ▲                 │   │  └───────────┘
//!    │   idle expiry   │   │ buffer full / line error
//!    ├─────────────────┘   ▼
//!    │   idle expiry   Discarding ◀── byte (dropped)
//!    └──────────────────┘
//! ```
//!
//! The framer is pure: it never reads a clock. Callers pass timestamps in
//! microseconds from any monotonic source.

use heapless::Vec;

/// Why a frame was thrown away instead of published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// More bytes arrived than the frame buffer holds
    Overflow,
    /// The UART reported a framing, noise, parity or overrun error
    LineError,
}

/// Framer states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramerState {
    /// Line quiet, no frame in progress
    Idle,
    /// Collecting bytes of a frame
    Accumulating,
    /// Frame in progress is already rejected; bytes are dropped until the
    /// line goes quiet
    Discarding(RejectReason),
}

/// What the framer produced at an idle expiry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameEvent<const N: usize> {
    /// A complete frame, every byte since the previous boundary
    Complete(Vec<u8, N>),
    /// The frame was rejected; `len` counts every byte it spanned
    Rejected { reason: RejectReason, len: usize },
}

/// Idle-timeout framer with a fixed `N`-byte accumulation buffer
#[derive(Debug, Clone)]
pub struct IdleFramer<const N: usize> {
    state: FramerState,
    buffer: Vec<u8, N>,
    /// Bytes seen in the current frame, including dropped ones
    seen: usize,
    idle_timeout_us: u32,
    last_byte_us: u64,
}

impl<const N: usize> IdleFramer<N> {
    /// Create a framer that closes a frame after `idle_timeout_us` of silence
    pub const fn new(idle_timeout_us: u32) -> Self {
        Self {
            state: FramerState::Idle,
            buffer: Vec::new(),
            seen: 0,
            idle_timeout_us,
            last_byte_us: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> FramerState {
        self.state
    }

    /// Drop any frame in progress and return to `Idle`
    pub fn reset(&mut self) {
        self.state = FramerState::Idle;
        self.buffer.clear();
        self.seen = 0;
    }

    /// Feed one received byte
    pub fn push(&mut self, byte: u8, now_us: u64) {
        if self.state == FramerState::Idle {
            self.buffer.clear();
            self.seen = 0;
            self.state = FramerState::Accumulating;
        }

        if self.state == FramerState::Accumulating && self.buffer.push(byte).is_err() {
            self.state = FramerState::Discarding(RejectReason::Overflow);
        }

        self.seen = self.seen.saturating_add(1);
        self.last_byte_us = now_us;
    }

    /// Feed a run of bytes that arrived together
    pub fn extend(&mut self, bytes: &[u8], now_us: u64) {
        for &byte in bytes {
            self.push(byte, now_us);
        }
    }

    /// Record a receive error on the line
    ///
    /// The error counts as line activity: it restarts the idle timer and
    /// poisons the frame in progress (or starts a poisoned one).
    pub fn line_error(&mut self, now_us: u64) {
        match self.state {
            FramerState::Idle => {
                self.buffer.clear();
                self.seen = 0;
                self.state = FramerState::Discarding(RejectReason::LineError);
            }
            FramerState::Accumulating => {
                self.state = FramerState::Discarding(RejectReason::LineError);
            }
            // Overflow already decided the fate of this frame
            FramerState::Discarding(_) => {}
        }
        self.last_byte_us = now_us;
    }

    /// Time at which the idle timer expires, if a frame is in progress
    pub fn deadline_us(&self) -> Option<u64> {
        match self.state {
            FramerState::Idle => None,
            _ => Some(self.last_byte_us.saturating_add(u64::from(self.idle_timeout_us))),
        }
    }

    /// Check the idle timer
    ///
    /// Returns an event once the line has been quiet for at least the idle
    /// interval since the last byte. The framer is back in `Idle` afterwards.
    pub fn poll(&mut self, now_us: u64) -> Option<FrameEvent<N>> {
        let deadline = self.deadline_us()?;
        if now_us < deadline {
            return None;
        }

        let event = match self.state {
            FramerState::Accumulating => FrameEvent::Complete(core::mem::take(&mut self.buffer)),
            FramerState::Discarding(reason) => FrameEvent::Rejected {
                reason,
                len: self.seen,
            },
            FramerState::Idle => return None,
        };

        self.reset();
        Some(event)
    }
}
