//! Pixel format conversion
//!
//! The ST7789 runs in 16-bit color mode (COLMOD 0x55) and expects every
//! pixel as an R5G6B5 word sent most significant byte first. Colors are
//! converted once, on the producer side, so the display core can stream
//! surfaces without touching individual pixels.

use bytemuck::{Pod, Zeroable};

/// Number of entries in an 8-bit palette
pub const PALETTE_SIZE: usize = 256;

/// Size in bytes of an RGB888 palette (3 bytes per entry)
pub const PALETTE_RGB_LEN: usize = PALETTE_SIZE * 3;

/// A pixel in panel wire format
///
/// Stored as the two bytes that go on the wire, high byte first. Because
/// the representation is the byte sequence itself, a surface made of
/// `WireColor` values can be handed to the SPI bus without conversion on
/// any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct WireColor([u8; 2]);

impl WireColor {
    /// All channels off
    pub const BLACK: Self = Self([0x00, 0x00]);

    /// All channels at full intensity
    pub const WHITE: Self = Self([0xFF, 0xFF]);

    /// Wrap an R5G6B5 value
    pub const fn from_rgb565(rgb565: u16) -> Self {
        Self(rgb565.to_be_bytes())
    }

    /// The R5G6B5 value carried by this pixel
    pub const fn rgb565(self) -> u16 {
        u16::from_be_bytes(self.0)
    }

    /// The byte-reversed 16-bit word as a little-endian core holds it in memory
    ///
    /// Swapping this value back yields [`rgb565`](Self::rgb565).
    pub const fn bits(self) -> u16 {
        u16::from_le_bytes(self.0)
    }

    /// Bytes in transmission order (most significant first)
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0
    }
}

/// Convert an RGB888 color to panel wire format
///
/// Red and blue keep their top 5 bits, green its top 6 bits.
pub const fn convert(r: u8, g: u8, b: u8) -> WireColor {
    let rgb565 = ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3);
    WireColor::from_rgb565(rgb565)
}

/// Convert the `index`-th entry of an RGB888 palette
pub const fn convert_indexed(palette: &[u8; PALETTE_RGB_LEN], index: u8) -> WireColor {
    let base = index as usize * 3;
    convert(palette[base], palette[base + 1], palette[base + 2])
}

/// Palette index to wire color lookup table
///
/// Rebuilt whenever the game supplies a new palette. Lives in the producer
/// handle, so only the render core ever reads or writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteCache {
    entries: [WireColor; PALETTE_SIZE],
}

impl Default for PaletteCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteCache {
    /// Create a palette with every entry black
    pub const fn new() -> Self {
        Self {
            entries: [WireColor::BLACK; PALETTE_SIZE],
        }
    }

    /// Build a cache from an RGB888 palette
    pub fn from_rgb888(palette: &[u8; PALETTE_RGB_LEN]) -> Self {
        let mut cache = Self::new();
        cache.update(palette);
        cache
    }

    /// Rebuild every entry from an RGB888 palette
    pub fn update(&mut self, palette: &[u8; PALETTE_RGB_LEN]) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            *entry = convert_indexed(palette, index as u8);
        }
    }

    /// Look up the wire color for a palette index
    #[inline]
    pub fn get(&self, index: u8) -> WireColor {
        self.entries[index as usize]
    }

    /// All entries in index order
    pub fn entries(&self) -> &[WireColor; PALETTE_SIZE] {
        &self.entries
    }
}
