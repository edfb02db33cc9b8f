//! Panel layout and letterboxing
//!
//! The game renders at 320x200 while the panel is 320x240, so every frame
//! is centered vertically with a solid band above and below it.

use crate::pixel::WireColor;
use crate::traits::Window;

/// Layout validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Panel or content has a zero dimension
    ZeroSize,
    /// Content width differs from the panel width
    WidthMismatch,
    /// Content is taller than the panel
    ContentTooTall,
}

/// Row split of the panel into top band, content, and bottom band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Letterbox {
    /// Rows above the content
    pub top: u16,
    /// Content rows
    pub content: u16,
    /// Rows below the content
    pub bottom: u16,
}

impl Letterbox {
    /// Split `panel_height` rows around `content_height` centered rows
    ///
    /// An odd leftover row goes to the bottom band so the three parts
    /// always add up to the panel height.
    pub const fn split(panel_height: u16, content_height: u16) -> Self {
        let spare = panel_height - content_height;
        let top = spare / 2;
        Self {
            top,
            content: content_height,
            bottom: spare - top,
        }
    }

    /// Total rows covered
    pub const fn total(&self) -> u16 {
        self.top + self.content + self.bottom
    }
}

/// Geometry of the panel and where the content surface lands on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelLayout {
    panel_width: u16,
    panel_height: u16,
    letterbox: Letterbox,
    border: WireColor,
}

impl PanelLayout {
    /// Create a layout for content of the given size
    pub const fn new(
        panel_width: u16,
        panel_height: u16,
        content_width: u16,
        content_height: u16,
        border: WireColor,
    ) -> Result<Self, LayoutError> {
        if panel_width == 0 || panel_height == 0 || content_width == 0 || content_height == 0 {
            return Err(LayoutError::ZeroSize);
        }
        if content_width != panel_width {
            return Err(LayoutError::WidthMismatch);
        }
        if content_height > panel_height {
            return Err(LayoutError::ContentTooTall);
        }

        Ok(Self {
            panel_width,
            panel_height,
            letterbox: Letterbox::split(panel_height, content_height),
            border,
        })
    }

    /// Panel width in pixels
    pub const fn panel_width(&self) -> u16 {
        self.panel_width
    }

    /// Panel height in pixels
    pub const fn panel_height(&self) -> u16 {
        self.panel_height
    }

    /// Row split used for every frame
    pub const fn letterbox(&self) -> Letterbox {
        self.letterbox
    }

    /// Color of the letterbox bands
    pub const fn border(&self) -> WireColor {
        self.border
    }

    /// Band above the content, if any
    pub const fn top_band(&self) -> Option<Window> {
        if self.letterbox.top == 0 {
            None
        } else {
            Some(Window::rows(0, self.letterbox.top, self.panel_width))
        }
    }

    /// Window the content surface is written to
    pub const fn content_window(&self) -> Window {
        Window::rows(self.letterbox.top, self.letterbox.content, self.panel_width)
    }

    /// Band below the content, if any
    pub const fn bottom_band(&self) -> Option<Window> {
        if self.letterbox.bottom == 0 {
            None
        } else {
            Some(Window::rows(
                self.letterbox.top + self.letterbox.content,
                self.letterbox.bottom,
                self.panel_width,
            ))
        }
    }
}
