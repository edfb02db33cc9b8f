//! Build script for picodoom-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Value range accepted for one integer key
struct IntKey {
    section: &'static str,
    key: &'static str,
    min: i64,
    max: i64,
}

const INT_KEYS: &[IntKey] = &[
    IntKey { section: "display", key: "panel_width", min: 1, max: 320 },
    IntKey { section: "display", key: "panel_height", min: 200, max: 480 },
    IntKey { section: "display", key: "spi_frequency_hz", min: 1_000_000, max: 62_500_000 },
    IntKey { section: "display", key: "madctl", min: 0, max: 0xFF },
    IntKey { section: "display", key: "backlight", min: 0, max: 0xFF },
    IntKey { section: "display", key: "border_color", min: 0, max: 0xFF_FFFF },
    IntKey { section: "input", key: "debounce_ms", min: 0, max: 1_000 },
    IntKey { section: "input", key: "hold_ms", min: 1, max: 10_000 },
    IntKey { section: "wad", key: "flash_offset", min: 0x0010_0000, max: 0x001F_FFFF },
    IntKey { section: "wad", key: "max_len", min: 0, max: 0x0020_0000 },
    IntKey { section: "status", key: "interval_ms", min: 1, max: 60_000 },
];

const BOOL_KEYS: &[(&str, &str)] = &[("display", "invert")];

const SECTIONS: &[&str] = &["display", "input", "wad", "status"];

/// RP2040 boards ship with 2 MiB of flash
const FLASH_SIZE: i64 = 0x0020_0000;

/// Validate board.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml at build time.                   ║\n\
            ║  Please create one in the picodoom-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
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
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
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
    validate_layout(&config, &mut errors);
    validate_values(&config, &mut errors);
    validate_wad_region(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
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

    println!("cargo:warning=board.toml validated successfully");
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

/// Only known sections and keys, no nesting
///
/// The firmware's boot-time reader understands exactly this shape, so
/// anything else would silently fall back to defaults on the board.
fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (name, section) in root {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
            continue;
        }
        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            let known = INT_KEYS
                .iter()
                .any(|k| k.section == name && k.key == key)
                || BOOL_KEYS.iter().any(|(s, k)| s == name && k == key);
            if !known {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

/// Types and ranges of every present key
fn validate_values(config: &toml::Value, errors: &mut Vec<String>) {
    for range in INT_KEYS {
        match config.get(range.section).and_then(|s| s.get(range.key)) {
            None => {}
            Some(toml::Value::Integer(v)) => {
                if *v < range.min || *v > range.max {
                    errors.push(format!(
                        "[{}] {} must be {}-{}",
                        range.section, range.key, range.min, range.max
                    ));
                }
            }
            Some(_) => errors.push(format!(
                "[{}] {} must be an integer",
                range.section, range.key
            )),
        }
    }

    for (section, key) in BOOL_KEYS {
        if let Some(value) = config.get(section).and_then(|s| s.get(key)) {
            if !value.is_bool() {
                errors.push(format!("[{}] {} must be true or false", section, key));
            }
        }
    }

    if let Some(width) = config
        .get("display")
        .and_then(|d| d.get("panel_width"))
        .and_then(|w| w.as_integer())
    {
        if width != 320 {
            errors.push("[display] panel_width must match the 320 px surface".to_string());
        }
    }
}

/// Game data region must fit in flash
fn validate_wad_region(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(wad) = config.get("wad") else {
        return;
    };
    let offset = wad
        .get("flash_offset")
        .and_then(|v| v.as_integer())
        .unwrap_or(0x0010_0000);
    let len = wad
        .get("max_len")
        .and_then(|v| v.as_integer())
        .unwrap_or(0x0010_0000);

    if offset + len > FLASH_SIZE {
        errors.push(format!(
            "[wad] flash_offset + max_len exceeds {} KiB of flash",
            FLASH_SIZE / 1024
        ));
    }
}
