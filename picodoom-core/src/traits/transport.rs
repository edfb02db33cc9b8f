//! Frame transport trait for the display link

use crate::pixel::WireColor;

/// An inclusive pixel rectangle on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    /// First column
    pub x0: u16,
    /// First row
    pub y0: u16,
    /// Last column (inclusive)
    pub x1: u16,
    /// Last row (inclusive)
    pub y1: u16,
}

impl Window {
    /// Window covering `height` full-width rows starting at row `y`
    ///
    /// `width` and `height` must be non-zero.
    pub const fn rows(y: u16, height: u16, width: u16) -> Self {
        Self {
            x0: 0,
            y0: y,
            x1: width - 1,
            y1: y + height - 1,
        }
    }

    /// Width in pixels
    pub const fn width(&self) -> u16 {
        self.x1 - self.x0 + 1
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.y1 - self.y0 + 1
    }

    /// Number of pixels the controller expects after a memory write
    pub const fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// Byte-oriented link to a display controller
///
/// Implementations address a window on the panel, after which pixel data
/// streams in row-major order until the window is filled.
#[allow(async_fn_in_trait)]
pub trait FrameTransport {
    /// Error type for link failures
    type Error;

    /// Select the output window and begin a memory write
    async fn set_window(&mut self, window: Window) -> Result<(), Self::Error>;

    /// Stream raw pixel bytes as one contiguous data burst
    async fn write_pixels(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Stream `count` copies of one color as one contiguous data burst
    async fn fill(&mut self, color: WireColor, count: usize) -> Result<(), Self::Error>;
}
