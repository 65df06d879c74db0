//! Build script for idlelink-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates link.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Must match `idlelink_core::config` limits
const MIN_BAUDRATE: i64 = 1_200;
const MAX_BAUDRATE: i64 = 4_000_000;
const MIN_IDLE_CHARS: i64 = 2;
const MAX_IDLE_TIMEOUT_US: i64 = 100_000;
const BITS_PER_CHAR: i64 = 10;
const DEFAULT_BAUDRATE: i64 = 115_200;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate link.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=link.toml");

    let config_path = Path::new("link.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: link.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds link.toml at build time.                    ║\n\
            ║  Please create one in the idlelink-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read link.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in link.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    let baudrate = validate_uart(&config, &mut errors);
    validate_framing(&config, baudrate, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid link configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=link.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only `[uart]` and `[framing]` tables with their known keys are accepted
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let root = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for (name, section) in root {
        let known: &[&str] = match name.as_str() {
            "uart" => &["baudrate"],
            "framing" => &["idle_timeout_us"],
            _ => {
                errors.push(format!("unknown section [{}]", name));
                continue;
            }
        };

        let table = match section {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[{}] must be a table", name));
                continue;
            }
        };

        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

/// Check `[uart]` and return the effective baud rate
fn validate_uart(config: &toml::Value, errors: &mut Vec<String>) -> i64 {
    match config.get("uart").and_then(|u| u.get("baudrate")) {
        Some(toml::Value::Integer(baud)) => {
            if !(MIN_BAUDRATE..=MAX_BAUDRATE).contains(baud) {
                errors.push(format!(
                    "[uart] baudrate must be {}-{}",
                    MIN_BAUDRATE, MAX_BAUDRATE
                ));
                return DEFAULT_BAUDRATE;
            }
            *baud
        }
        Some(_) => {
            errors.push("[uart] baudrate must be an integer".to_string());
            DEFAULT_BAUDRATE
        }
        None => DEFAULT_BAUDRATE,
    }
}

/// Check `[framing]` against the baud rate
fn validate_framing(config: &toml::Value, baudrate: i64, errors: &mut Vec<String>) {
    let idle = match config.get("framing").and_then(|f| f.get("idle_timeout_us")) {
        Some(toml::Value::Integer(idle)) => *idle,
        Some(_) => {
            errors.push("[framing] idle_timeout_us must be an integer".to_string());
            return;
        }
        None => return,
    };

    let char_time_us = (BITS_PER_CHAR * 1_000_000 + baudrate - 1) / baudrate;
    let min_idle = MIN_IDLE_CHARS * char_time_us;

    if idle < min_idle {
        errors.push(format!(
            "[framing] idle_timeout_us must be >= {} at {} baud",
            min_idle, baudrate
        ));
    }
    if idle > MAX_IDLE_TIMEOUT_US {
        errors.push(format!(
            "[framing] idle_timeout_us must be <= {}",
            MAX_IDLE_TIMEOUT_US
        ));
    }
}
