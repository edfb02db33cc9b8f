//! Board configuration types
//!
//! Every field has a default matching the Pico Display 2.0 board, so a
//! partial or missing config file still boots.

use crate::pixel::{convert, WireColor};

/// Panel and SPI link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub panel_width: u16,
    /// Panel height in pixels
    pub panel_height: u16,
    /// SPI clock in Hz
    pub spi_frequency_hz: u32,
    /// MADCTL orientation byte
    pub madctl: u8,
    /// Send INVON during bring-up
    pub invert: bool,
    /// Backlight level, 0 = off
    pub backlight: u8,
    /// Letterbox band color as 0xRRGGBB
    pub border_color: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            panel_width: 320,
            panel_height: 240,
            spi_frequency_hz: 62_500_000,
            madctl: 0x60,
            invert: true,
            backlight: 255,
            border_color: 0x000000,
        }
    }
}

impl DisplayConfig {
    /// Letterbox band color in wire format
    pub const fn border(&self) -> WireColor {
        let [_, r, g, b] = self.border_color.to_be_bytes();
        convert(r, g, b)
    }
}

/// Button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    pub debounce_ms: u32,
    pub hold_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            hold_ms: 500,
        }
    }
}

/// Where the game data lives in flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WadConfig {
    /// Byte offset from the start of flash
    pub flash_offset: u32,
    /// Bytes mapped for the container, 0 disables loading
    pub max_len: u32,
}

impl Default for WadConfig {
    fn default() -> Self {
        Self {
            flash_offset: 0x0010_0000,
            max_len: 0x0010_0000,
        }
    }
}

/// Status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusConfig {
    /// Interval between status lines
    pub interval_ms: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { interval_ms: 1000 }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub wad: WadConfig,
    pub status: StatusConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_board() {
        let config = BoardConfig::default();
        assert_eq!(config.display.panel_width, 320);
        assert_eq!(config.display.panel_height, 240);
        assert_eq!(config.display.spi_frequency_hz, 62_500_000);
        assert_eq!(config.input.debounce_ms, 50);
        assert_eq!(config.input.hold_ms, 500);
        assert_eq!(config.status.interval_ms, 1000);
    }

    #[test]
    fn test_border_color() {
        let display = DisplayConfig {
            border_color: 0x00FF00,
            ..DisplayConfig::default()
        };
        assert_eq!(display.border(), convert(0, 255, 0));
        assert_eq!(DisplayConfig::default().border(), WireColor::BLACK);
    }
}
