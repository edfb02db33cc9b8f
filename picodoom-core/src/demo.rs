//! Placeholder scene shown until a real game engine is wired in
//!
//! Renders one of a few test patterns. Weapon-up cycles forward through
//! them, weapon-down steps back (stopping at the first). Once a palette has
//! been loaded from game data, a palette swatch becomes available too.

use core::fmt::Write;

use heapless::String;

use crate::input::GameInput;
use crate::pixel::{convert, PaletteCache, WireColor};
use crate::surface::Surface;

const BAR_COLORS: [WireColor; 6] = [
    convert(0x00, 0x00, 0x00),
    convert(0xFF, 0x00, 0x00),
    convert(0x00, 0xFF, 0x00),
    convert(0x00, 0x00, 0xFF),
    convert(0xFF, 0xFF, 0x00),
    convert(0xFF, 0x00, 0xFF),
];

const CHECKER_SIZE: usize = 8;

/// Test patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// Vertical color bars
    Bars,
    /// Black and white checkerboard
    Checker,
    /// Horizontal/vertical gradient with a pulsing blue channel
    Gradient,
    /// All 256 palette entries as a 16x16 grid
    Palette,
}

impl Pattern {
    const ALL: [Pattern; 4] = [
        Pattern::Bars,
        Pattern::Checker,
        Pattern::Gradient,
        Pattern::Palette,
    ];

    /// Short name for status output
    pub const fn name(self) -> &'static str {
        match self {
            Pattern::Bars => "Bars",
            Pattern::Checker => "Check",
            Pattern::Gradient => "Grad",
            Pattern::Palette => "Palette",
        }
    }
}

/// Test-pattern engine
#[derive(Debug, Clone)]
pub struct DemoScene {
    frame: u32,
    mode: usize,
    palette_loaded: bool,
}

impl Default for DemoScene {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoScene {
    pub const fn new() -> Self {
        Self {
            frame: 0,
            mode: 0,
            palette_loaded: false,
        }
    }

    /// Make the palette swatch available
    pub fn enable_palette(&mut self) {
        self.palette_loaded = true;
    }

    fn pattern_count(&self) -> usize {
        if self.palette_loaded {
            Pattern::ALL.len()
        } else {
            Pattern::ALL.len() - 1
        }
    }

    /// Advance one tick
    pub fn update(&mut self, input: &GameInput) {
        if input.weapon_next {
            self.mode = (self.mode + 1) % self.pattern_count();
        }
        if input.weapon_prev && self.mode > 0 {
            self.mode -= 1;
        }
        self.frame = self.frame.wrapping_add(1);
    }

    /// Ticks since start
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Pattern drawn by [`render`](Self::render)
    pub fn pattern(&self) -> Pattern {
        Pattern::ALL[self.mode]
    }

    /// Draw the current pattern over the whole surface
    pub fn render<const W: usize, const H: usize>(
        &self,
        surface: &mut Surface<W, H>,
        palette: &PaletteCache,
    ) {
        match self.pattern() {
            Pattern::Bars => {
                let bar_width = (W / BAR_COLORS.len()).max(1);
                for row in surface.rows_mut() {
                    for (x, px) in row.iter_mut().enumerate() {
                        *px = BAR_COLORS[(x / bar_width) % BAR_COLORS.len()];
                    }
                }
            }
            Pattern::Checker => {
                for (y, row) in surface.rows_mut().enumerate() {
                    for (x, px) in row.iter_mut().enumerate() {
                        let odd = ((x / CHECKER_SIZE) + (y / CHECKER_SIZE)) & 1 == 1;
                        *px = if odd { WireColor::WHITE } else { WireColor::BLACK };
                    }
                }
            }
            Pattern::Gradient => {
                let blue = 128 + ((self.frame.wrapping_mul(2)) % 128) as u8;
                for (y, row) in surface.rows_mut().enumerate() {
                    let green = (y * 255 / H) as u8;
                    for (x, px) in row.iter_mut().enumerate() {
                        *px = convert((x * 255 / W) as u8, green, blue);
                    }
                }
            }
            Pattern::Palette => {
                let cell_w = (W / 16).max(1);
                let cell_h = (H / 16).max(1);
                for (y, row) in surface.rows_mut().enumerate() {
                    let base = (y / cell_h).min(15) * 16;
                    for (x, px) in row.iter_mut().enumerate() {
                        *px = palette.get((base + (x / cell_w).min(15)) as u8);
                    }
                }
            }
        }
    }

    /// Status line, e.g. `Frame: 120 | Pattern: Bars`
    pub fn describe(&self) -> String<48> {
        let mut line = String::new();
        let _ = write!(line, "Frame: {} | Pattern: {}", self.frame, self.pattern().name());
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PALETTE_RGB_LEN;

    fn next() -> GameInput {
        GameInput {
            weapon_next: true,
            ..GameInput::default()
        }
    }

    fn prev() -> GameInput {
        GameInput {
            weapon_prev: true,
            ..GameInput::default()
        }
    }

    #[test]
    fn test_pattern_cycling() {
        let mut scene = DemoScene::new();
        assert_eq!(scene.pattern(), Pattern::Bars);

        scene.update(&prev());
        assert_eq!(scene.pattern(), Pattern::Bars);

        scene.update(&next());
        scene.update(&next());
        assert_eq!(scene.pattern(), Pattern::Gradient);

        // Wraps without a palette
        scene.update(&next());
        assert_eq!(scene.pattern(), Pattern::Bars);

        scene.enable_palette();
        for _ in 0..3 {
            scene.update(&next());
        }
        assert_eq!(scene.pattern(), Pattern::Palette);
        assert_eq!(scene.frame(), 7);
    }

    #[test]
    fn test_color_bars() {
        let scene = DemoScene::new();
        let mut surface: Surface<12, 2> = Surface::new();
        scene.render(&mut surface, &PaletteCache::new());

        assert_eq!(surface.pixel(0, 0), Some(WireColor::BLACK));
        assert_eq!(surface.pixel(2, 1), Some(convert(0xFF, 0, 0)));
        assert_eq!(surface.pixel(11, 0), Some(convert(0xFF, 0, 0xFF)));
    }

    #[test]
    fn test_checkerboard() {
        let mut scene = DemoScene::new();
        scene.update(&next());
        let mut surface: Surface<16, 16> = Surface::new();
        scene.render(&mut surface, &PaletteCache::new());

        assert_eq!(surface.pixel(0, 0), Some(WireColor::BLACK));
        assert_eq!(surface.pixel(8, 0), Some(WireColor::WHITE));
        assert_eq!(surface.pixel(7, 8), Some(WireColor::WHITE));
        assert_eq!(surface.pixel(15, 15), Some(WireColor::BLACK));
    }

    #[test]
    fn test_gradient_blue_pulses() {
        let mut scene = DemoScene::new();
        scene.update(&next());
        scene.update(&next());
        let mut surface: Surface<4, 4> = Surface::new();
        scene.render(&mut surface, &PaletteCache::new());

        // Two ticks so far
        assert_eq!(surface.pixel(0, 0), Some(convert(0, 0, 132)));
        assert_eq!(surface.pixel(2, 2), Some(convert(127, 127, 132)));
    }

    #[test]
    fn test_palette_swatch() {
        let mut rgb = [0u8; PALETTE_RGB_LEN];
        for i in 0..256 {
            rgb[i * 3] = i as u8;
        }
        let palette = PaletteCache::from_rgb888(&rgb);

        let mut scene = DemoScene::new();
        scene.enable_palette();
        for _ in 0..3 {
            scene.update(&next());
        }
        let mut surface: Surface<32, 32> = Surface::new();
        scene.render(&mut surface, &palette);

        assert_eq!(surface.pixel(0, 0), Some(palette.get(0)));
        assert_eq!(surface.pixel(2, 0), Some(palette.get(1)));
        assert_eq!(surface.pixel(31, 31), Some(palette.get(255)));
    }

    #[test]
    fn test_describe() {
        let mut scene = DemoScene::new();
        scene.update(&GameInput::default());
        assert_eq!(scene.describe().as_str(), "Frame: 1 | Pattern: Bars");
    }
}
