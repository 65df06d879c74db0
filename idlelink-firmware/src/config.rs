//! Link configuration loading
//!
//! `link.toml` is compiled into the image and already checked by build.rs,
//! so a parse failure here only happens if the two validators disagree.

use defmt::*;

use idlelink_core::config::{parse_link_config, LinkConfig};

/// Embedded link configuration
/// Edit link.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../link.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_link_config() -> LinkConfig {
    match parse_link_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Link config: {} baud, idle {} us ({} chars)",
                config.uart.baudrate,
                config.idle_timeout_us,
                config.idle_chars()
            );
            config
        }
        Err(e) => {
            warn!("Invalid link.toml ({:?}), using defaults", e);
            LinkConfig::default()
        }
    }
}
