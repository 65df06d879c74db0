//! Command dispatch
//!
//! Consumes completed frames from the mailbox and drives the peripherals.

pub mod dispatcher;

pub use dispatcher::{DispatchOutcome, DispatchStats, Dispatcher};
