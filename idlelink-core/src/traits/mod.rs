//! Hardware capability traits
//!
//! These traits define the interface between the command dispatcher and
//! board-specific implementations.

pub mod bridge;

pub use bridge::{HalBridge, PeripheralBridge};
