//! Link configuration
//!
//! Configuration is compiled into the firmware as TOML text and parsed at
//! boot by a custom no_std reader.

pub mod link;
pub mod toml;

pub use link::{ConfigError, LinkConfig, DEFAULT_IDLE_TIMEOUT_US};
pub use toml::parse_link_config;
