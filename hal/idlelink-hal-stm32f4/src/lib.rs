//! STM32F4-specific HAL for the idlelink firmware
//!
//! This crate provides STM32F4 implementations of the `idlelink-hal` traits
//! on top of embassy-stm32. It supports:
//!
//! - STM32F407VG (STM32F4-Discovery)
//!
//! # Features
//!
//! - `stm32f407vg` - Enable support for STM32F407VGT6
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Peripheral construction stays in the firmware, which uses embassy-stm32
//! directly. This crate wraps the constructed drivers so the core can drive
//! them through `idlelink-hal` traits.

#![no_std]

pub mod analog;
pub mod gpio;
pub mod uart;

pub use analog::{Dac1Output, Dac2Output, SampledInputs};
pub use gpio::PushPullPin;
pub use uart::{usart_config, QueuedTx, ReplyQueue, UartBusError};
