//! Board configuration loading
//!
//! Parses the embedded `board.toml`. Falls back to built-in defaults if the
//! file is rejected, so a bad edit never bricks the board.

use defmt::*;

use picodoom_core::config::{parse_config, BoardConfig};

/// Embedded configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

/// Load the board configuration
pub fn load() -> BoardConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded board.toml ({} bytes)", EMBEDDED_CONFIG.len());
            config
        }
        Err(e) => {
            error!("Failed to parse board.toml: {}, using defaults", e);
            BoardConfig::default()
        }
    }
}

/// Log the active configuration
pub fn log(config: &BoardConfig) {
    let display = &config.display;
    info!(
        "Display: {}x{} panel, SPI {} Hz, MADCTL {=u8:#04x}, invert={}, backlight={}",
        display.panel_width,
        display.panel_height,
        display.spi_frequency_hz,
        display.madctl,
        display.invert,
        display.backlight
    );
    info!(
        "Input: debounce {} ms, hold {} ms",
        config.input.debounce_ms, config.input.hold_ms
    );
    info!(
        "WAD: flash offset {=u32:#x}, up to {} bytes",
        config.wad.flash_offset, config.wad.max_len
    );
}
