//! Shared state between the firmware tasks
//!
//! The mailbox is the only path from the receive task to the main loop. It
//! holds at most one complete frame.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use idlelink_core::link::{FrameMailbox, LinkStats};
use idlelink_hal_stm32f4::{ReplyQueue, SampledInputs};

/// Largest frame accepted, in bytes
pub const FRAME_CAPACITY: usize = 32;

/// Complete frames waiting for the dispatcher
pub static FRAME_MAILBOX: FrameMailbox<CriticalSectionRawMutex, FRAME_CAPACITY> =
    FrameMailbox::new();

/// Replies waiting for the UART TX task
pub static REPLY_QUEUE: ReplyQueue = ReplyQueue::new();

/// Latest ADC scan (PA6, PA7)
pub static ANALOG_INPUTS: SampledInputs = SampledInputs::new();

/// Receive statistics, updated by the RX task after every idle expiry
pub static LINK_STATS: Signal<CriticalSectionRawMutex, LinkStats> = Signal::new();
