//! UART link layer
//!
//! Receive side: bytes → [`IdleFramer`] → [`FrameMailbox`], driven by a
//! [`FrameReceiver`]. Transmit side: [`TransmitPath`].

pub mod framer;
pub mod mailbox;
pub mod receiver;
pub mod transmit;

pub use framer::{FrameEvent, FramerState, IdleFramer, RejectReason};
pub use mailbox::FrameMailbox;
pub use receiver::{FrameReceiver, LinkStats, PipelineState, RxEvent};
pub use transmit::TransmitPath;
