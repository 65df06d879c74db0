//! Minimal TOML reader for the link configuration
//!
//! Handles only the subset `link.toml` uses. It does NOT support the full
//! TOML spec.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = integer` pairs, with optional `_` digit separators
//! - Comments (`# ...`), whole-line or trailing
//!
//! Recognised keys:
//! ```toml
//! [uart]
//! baudrate = 115_200
//!
//! [framing]
//! idle_timeout_us = 2_000
//! ```
//!
//! Missing keys keep their defaults. The result is validated before it is
//! returned.

use super::link::{ConfigError, LinkConfig};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Uart,
    Framing,
}

/// Parse and validate a link configuration
pub fn parse_link_config(input: &str) -> Result<LinkConfig, ConfigError> {
    let mut config = LinkConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = match line[1..line.len() - 1].trim() {
                "uart" => Section::Uart,
                "framing" => Section::Framing,
                _ => return Err(ConfigError::InvalidSection),
            };
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ConfigError::InvalidValue)?;
        let value = parse_int(value.trim())?;

        match (section, key.trim()) {
            (Section::Uart, "baudrate") => config.uart.baudrate = value,
            (Section::Framing, "idle_timeout_us") => config.idle_timeout_us = value,
            _ => return Err(ConfigError::UnknownKey),
        }
    }

    config.validate()?;
    Ok(config)
}

/// Remove a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Parse an unsigned decimal integer, allowing `_` separators
fn parse_int(s: &str) -> Result<u32, ConfigError> {
    if s.is_empty() || s.starts_with('_') {
        return Err(ConfigError::InvalidValue);
    }

    let mut value: u32 = 0;
    for c in s.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ConfigError::InvalidValue)?;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or(ConfigError::InvalidValue)?;
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let input = "\
# Link settings
[uart]
baudrate = 230_400

[framing]
idle_timeout_us = 1000  # ~23 chars
";
        let config = parse_link_config(input).unwrap();
        assert_eq!(config.uart.baudrate, 230_400);
        assert_eq!(config.idle_timeout_us, 1000);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_link_config("[uart]\n").unwrap();
        assert_eq!(config, LinkConfig::default());

        let config = parse_link_config("").unwrap();
        assert_eq!(config, LinkConfig::default());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_link_config("[spi]\nbaudrate = 1\n"),
            Err(ConfigError::InvalidSection)
        );
    }

    #[test]
    fn test_key_in_wrong_section() {
        assert_eq!(
            parse_link_config("[framing]\nbaudrate = 9600\n"),
            Err(ConfigError::UnknownKey)
        );
        assert_eq!(
            parse_link_config("baudrate = 9600\n"),
            Err(ConfigError::UnknownKey)
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_link_config("[uart]\nbaudrate = fast\n"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_link_config("[uart]\nbaudrate\n"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_link_config("[uart]\nbaudrate = 99999999999\n"),
            Err(ConfigError::InvalidValue)
        );
    }

    #[test]
    fn test_parsed_config_is_validated() {
        assert_eq!(
            parse_link_config("[framing]\nidle_timeout_us = 10\n"),
            Err(ConfigError::IdleTooShort)
        );
    }
}
