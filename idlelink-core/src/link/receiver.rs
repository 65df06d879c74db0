//! Frame receiver
//!
//! Glues the [`IdleFramer`] to the [`FrameMailbox`]: bytes go into the
//! framer, completed frames go into the mailbox, and everything else is
//! counted.

use embassy_sync::blocking_mutex::raw::RawMutex;

use super::framer::{FrameEvent, FramerState, IdleFramer, RejectReason};
use super::mailbox::FrameMailbox;

/// Link statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Frames handed to the dispatcher
    pub published: u32,
    /// Frames rejected because they exceeded the buffer
    pub overflows: u32,
    /// Frames rejected because of a UART error
    pub line_errors: u32,
    /// Complete frames dropped because the previous one was still pending
    pub dropped_pending: u32,
}

/// Outcome of an idle expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxEvent {
    /// A frame of `len` bytes is waiting in the mailbox
    Published { len: usize },
    /// The frame was rejected and nothing was published
    Rejected { reason: RejectReason, len: usize },
    /// The frame was complete but the mailbox still held the previous one
    Dropped { len: usize },
}

/// Pipeline state as seen from outside
///
/// The receiver and the mailbox are separate buffers, so a frame can be
/// accumulating while another is ready. `FrameReady` takes precedence: it is
/// what the dispatcher acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineState {
    /// Nothing received, nothing pending
    Idle,
    /// Bytes of a frame are arriving
    Accumulating,
    /// A complete frame is waiting for the dispatcher
    FrameReady,
}

/// Idle-timeout frame receiver publishing into a mailbox
pub struct FrameReceiver<'a, M: RawMutex, const N: usize> {
    framer: IdleFramer<N>,
    mailbox: &'a FrameMailbox<M, N>,
    stats: LinkStats,
}

impl<'a, M: RawMutex, const N: usize> FrameReceiver<'a, M, N> {
    /// Create a receiver publishing into `mailbox`
    pub fn new(mailbox: &'a FrameMailbox<M, N>, idle_timeout_us: u32) -> Self {
        Self {
            framer: IdleFramer::new(idle_timeout_us),
            mailbox,
            stats: LinkStats::default(),
        }
    }

    /// Arm reception: forget any partial frame and wait for the first byte
    pub fn start(&mut self) {
        self.framer.reset();
    }

    /// Feed bytes received at `now_us`
    pub fn on_bytes(&mut self, bytes: &[u8], now_us: u64) {
        self.framer.extend(bytes, now_us);
    }

    /// Record a UART receive error at `now_us`
    pub fn on_line_error(&mut self, now_us: u64) {
        self.framer.line_error(now_us);
    }

    /// When the idle timer expires, if a frame is in progress
    pub fn idle_deadline_us(&self) -> Option<u64> {
        self.framer.deadline_us()
    }

    /// Check the idle timer and publish a finished frame
    pub fn on_idle(&mut self, now_us: u64) -> Option<RxEvent> {
        let event = match self.framer.poll(now_us)? {
            FrameEvent::Complete(frame) => {
                let len = frame.len();
                match self.mailbox.publish(frame) {
                    Ok(()) => {
                        self.stats.published = self.stats.published.wrapping_add(1);
                        RxEvent::Published { len }
                    }
                    Err(_) => {
                        self.stats.dropped_pending = self.stats.dropped_pending.wrapping_add(1);
                        RxEvent::Dropped { len }
                    }
                }
            }
            FrameEvent::Rejected { reason, len } => {
                match reason {
                    RejectReason::Overflow => {
                        self.stats.overflows = self.stats.overflows.wrapping_add(1)
                    }
                    RejectReason::LineError => {
                        self.stats.line_errors = self.stats.line_errors.wrapping_add(1)
                    }
                }
                RxEvent::Rejected { reason, len }
            }
        };
        Some(event)
    }

    /// Current pipeline state
    pub fn state(&self) -> PipelineState {
        if self.mailbox.is_pending() {
            PipelineState::FrameReady
        } else if self.framer.state() == FramerState::Idle {
            PipelineState::Idle
        } else {
            PipelineState::Accumulating
        }
    }

    /// Link statistics since boot
    pub fn stats(&self) -> LinkStats {
        self.stats
    }
}
