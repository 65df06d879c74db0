//! idlelink command protocol
//!
//! This crate defines the ASCII protocol spoken over the idle-timeout framed
//! UART link. A frame is whatever arrived between two quiet periods on the
//! line; this crate only decides what a complete frame means.
//!
//! # Protocol Overview
//!
//! ```text
//! request                  action                    reply
//! ───────────────────────  ────────────────────────  ───────
//! [PD12_TOGGLE]            toggle output PD12        [DONE]
//! [DAC1 nnnn]              DAC channel 1 <- nnnn     [DONE]
//! [DAC2 nnnn]              DAC channel 2 <- nnnn     [DONE]
//! anything else            nothing                   nothing
//! ```
//!
//! Matching is case-sensitive and exact. Unknown frames and frames with a
//! malformed parameter are ignored without a reply; the host detects them by
//! the missing `[DONE]`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod decimal;

pub use command::{
    match_frame, Action, AnalogChannel, Command, CommandEntry, DacValue, MatchError, MatchKind,
    Matched, PinId, COMMAND_TABLE, REPLY_DONE,
};
pub use decimal::{parse_decimal, ParseError};
