//! Render-side handle

use core::ops::{Deref, DerefMut};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::MutexGuard;

use super::{FramePipeline, SwapError};
use crate::pixel::{PaletteCache, PALETTE_RGB_LEN};
use crate::surface::Surface;

/// Producer handle
///
/// There is exactly one, obtained from [`FramePipeline::split`]. It owns the
/// palette cache, so palette updates can never race a swap.
pub struct Producer<'a, const W: usize, const H: usize> {
    pipeline: &'a FramePipeline<W, H>,
    palette: PaletteCache,
}

/// Exclusive view of the producer-owned surface for one frame
///
/// Dereferences to the [`Surface`]. Holding it borrows the producer, so the
/// frame cannot be presented until drawing is finished.
pub struct DrawSurface<'a, const W: usize, const H: usize> {
    guard: MutexGuard<'a, CriticalSectionRawMutex, Surface<W, H>>,
    palette: &'a PaletteCache,
}

impl<'a, const W: usize, const H: usize> DrawSurface<'a, W, H> {
    /// Palette cache to draw indexed colors with
    ///
    /// The reference outlives the borrow of `self`, so it can be passed
    /// alongside the surface itself.
    pub fn palette(&self) -> &'a PaletteCache {
        self.palette
    }
}

impl<const W: usize, const H: usize> Deref for DrawSurface<'_, W, H> {
    type Target = Surface<W, H>;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<const W: usize, const H: usize> DerefMut for DrawSurface<'_, W, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

impl<'a, const W: usize, const H: usize> Producer<'a, W, H> {
    pub(super) fn new(pipeline: &'a FramePipeline<W, H>) -> Self {
        Self {
            pipeline,
            palette: PaletteCache::new(),
        }
    }

    /// Borrow the surface to draw this frame into
    pub async fn draw_surface(&mut self) -> DrawSurface<'_, W, H> {
        let index = self.pipeline.active_index();
        DrawSurface {
            guard: self.pipeline.surfaces[index].lock().await,
            palette: &self.palette,
        }
    }

    /// Wait until the next swap can go through
    ///
    /// Returns once the surface that becomes producer-owned at the next swap
    /// has been written to the panel. No timeout.
    pub async fn wait_for_reuse(&self) {
        while !self.pipeline.reusable() {
            self.pipeline.consumed.wait().await;
        }
    }

    /// Hand the finished surface to the consumer
    ///
    /// Does not block. Fails with [`SwapError::FramePending`] if the
    /// previous frame has not been consumed yet; call
    /// [`wait_for_reuse`](Self::wait_for_reuse) first.
    pub fn present_frame(&mut self) -> Result<(), SwapError> {
        self.pipeline.swap()
    }

    /// Rebuild the palette cache from an RGB888 palette
    pub fn update_palette(&mut self, palette: &[u8; PALETTE_RGB_LEN]) {
        self.palette.update(palette);
    }

    /// Current palette cache
    pub fn palette(&self) -> &PaletteCache {
        &self.palette
    }

    /// Most recently measured output rate
    pub fn frame_rate(&self) -> f32 {
        self.pipeline.frame_rate()
    }

    /// Total frames written to the panel so far
    pub fn frames_presented(&self) -> u32 {
        self.pipeline.frames_presented()
    }
}
