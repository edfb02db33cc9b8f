//! Fixed-size pixel surfaces
//!
//! A surface is a `W` x `H` raster of [`WireColor`] pixels. The pipeline
//! owns exactly two of them; they are zero-filled at construction and never
//! resized.

use crate::pixel::WireColor;

/// A fixed-size raster of wire-format pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface<const W: usize, const H: usize> {
    rows: [[WireColor; W]; H],
}

impl<const W: usize, const H: usize> Default for Surface<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Surface<W, H> {
    /// Width in pixels
    pub const WIDTH: usize = W;

    /// Height in pixels
    pub const HEIGHT: usize = H;

    /// Create a black (all-zero) surface
    pub const fn new() -> Self {
        Self {
            rows: [[WireColor::BLACK; W]; H],
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        W
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        H
    }

    /// Fill every pixel with one color
    pub fn clear(&mut self, color: WireColor) {
        self.pixels_mut().fill(color);
    }

    /// Read a pixel, or `None` outside the surface
    pub fn pixel(&self, x: usize, y: usize) -> Option<WireColor> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Write a pixel; writes outside the surface are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, color: WireColor) {
        if let Some(px) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *px = color;
        }
    }

    /// One row of pixels
    ///
    /// # Panics
    /// Panics if `y >= H`.
    pub fn row(&self, y: usize) -> &[WireColor; W] {
        &self.rows[y]
    }

    /// One mutable row of pixels
    ///
    /// # Panics
    /// Panics if `y >= H`.
    pub fn row_mut(&mut self, y: usize) -> &mut [WireColor; W] {
        &mut self.rows[y]
    }

    /// All rows, top to bottom
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [WireColor; W]> {
        self.rows.iter_mut()
    }

    /// All pixels in raster order
    pub fn pixels(&self) -> &[WireColor] {
        self.rows.as_flattened()
    }

    /// All pixels in raster order, mutable
    pub fn pixels_mut(&mut self) -> &mut [WireColor] {
        self.rows.as_flattened_mut()
    }

    /// The whole raster as wire bytes, ready for a single data burst
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::convert;

    #[test]
    fn test_new_surface_is_black() {
        let surface: Surface<8, 4> = Surface::new();
        assert_eq!(surface.width(), 8);
        assert_eq!(surface.height(), 4);
        assert!(surface.pixels().iter().all(|p| *p == WireColor::BLACK));
        assert!(surface.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_clear() {
        let mut surface: Surface<8, 4> = Surface::new();
        let red = convert(255, 0, 0);
        surface.clear(red);
        assert!(surface.pixels().iter().all(|p| *p == red));
    }

    #[test]
    fn test_set_pixel_bounds() {
        let mut surface: Surface<4, 2> = Surface::new();
        surface.set_pixel(3, 1, WireColor::WHITE);
        surface.set_pixel(4, 0, WireColor::WHITE); // ignored
        surface.set_pixel(0, 2, WireColor::WHITE); // ignored

        assert_eq!(surface.pixel(3, 1), Some(WireColor::WHITE));
        assert_eq!(surface.pixel(4, 0), None);
        assert_eq!(surface.pixels().iter().filter(|p| **p == WireColor::WHITE).count(), 1);
    }

    #[test]
    fn test_bytes_are_raster_order() {
        let mut surface: Surface<2, 2> = Surface::new();
        surface.set_pixel(1, 0, convert(255, 0, 0));
        surface.set_pixel(0, 1, convert(0, 0, 255));

        assert_eq!(
            surface.as_bytes(),
            &[0x00, 0x00, 0xF8, 0x00, 0x00, 0x1F, 0x00, 0x00]
        );
    }
}
