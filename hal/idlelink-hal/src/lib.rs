//! idlelink Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that the link core and
//! the command dispatcher are written against. Chip-specific crates
//! (`idlelink-hal-stm32f4`) implement them; host tests implement them with
//! fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (idlelink-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  idlelink-core (framer, dispatcher)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  idlelink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ idlelink-hal- │
//!             │    stm32f4    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital outputs
//! - [`analog::AnalogOutput`], [`analog::AnalogInput`] - 12-bit DAC / ADC
//! - [`uart::UartTx`] - Background (DMA) serial transmission

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use analog::{AnalogInput, AnalogOutput, DAC_MAX};
pub use gpio::OutputPin;
pub use uart::{UartConfig, UartTx};
