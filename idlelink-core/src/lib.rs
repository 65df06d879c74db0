//! Board-agnostic core of the idlelink firmware
//!
//! This crate contains all logic that does not depend on a specific chip:
//!
//! - Idle-timeout framing of the UART receive stream
//! - The single-slot mailbox between receive context and main loop
//! - The reply transmit path
//! - The command dispatcher and the peripheral bridge it drives
//! - Link configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod link;
pub mod traits;
