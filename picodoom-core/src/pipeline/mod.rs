//! Cross-core frame pipeline
//!
//! Two surfaces shared between a producer (the render core) and a consumer
//! (the display core). At any moment one surface is producer-owned and the
//! other consumer-owned; roles change only inside [`Producer::present_frame`].
//!
//! Shared state:
//! - role assignment and readiness flags, behind a blocking
//!   `CriticalSectionRawMutex` (a hardware spinlock on the RP2040)
//! - the surfaces themselves, each behind an async mutex that role
//!   discipline keeps uncontended
//! - a `frame_ready` signal released once per swap
//! - a `consumed` signal released once per presented frame
//!
//! Frames reach the consumer in swap order. At most one frame is in flight:
//! the producer blocks in [`Producer::wait_for_reuse`] instead of dropping.

mod consumer;
mod frame_rate;
mod producer;

pub use consumer::{Consumer, Presented};
pub use frame_rate::{FrameRateMonitor, WINDOW_US};
pub use producer::{DrawSurface, Producer};

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::surface::Surface;

/// Swap failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwapError {
    /// The surface that would return to the producer still holds a frame
    /// the consumer has not picked up
    FramePending,
}

/// Which surface each side currently owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoleAssignment {
    /// Producer-owned surface
    pub active: usize,
    /// Consumer-owned surface
    pub present: usize,
}

#[derive(Clone, Copy)]
struct Roles {
    active: usize,
    present: usize,
    ready: [bool; 2],
}

impl Roles {
    const INITIAL: Self = Self {
        active: 0,
        present: 1,
        ready: [false, false],
    };
}

/// The pipeline shared by both cores
///
/// Construct once in a static and call [`split`](Self::split) to obtain the
/// two role handles.
pub struct FramePipeline<const W: usize, const H: usize> {
    surfaces: [Mutex<CriticalSectionRawMutex, Surface<W, H>>; 2],
    roles: BlockingMutex<CriticalSectionRawMutex, Cell<Roles>>,
    frame_ready: Signal<CriticalSectionRawMutex, ()>,
    consumed: Signal<CriticalSectionRawMutex, ()>,
    taken: AtomicBool,
    frame_rate_bits: AtomicU32,
    frames_presented: AtomicU32,
}

impl<const W: usize, const H: usize> Default for FramePipeline<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> FramePipeline<W, H> {
    /// Create a pipeline with both surfaces black and nothing pending
    pub const fn new() -> Self {
        Self {
            surfaces: [Mutex::new(Surface::new()), Mutex::new(Surface::new())],
            roles: BlockingMutex::new(Cell::new(Roles::INITIAL)),
            frame_ready: Signal::new(),
            consumed: Signal::new(),
            taken: AtomicBool::new(false),
            frame_rate_bits: AtomicU32::new(0),
            frames_presented: AtomicU32::new(0),
        }
    }

    /// Hand out the producer and consumer handles
    ///
    /// Returns `None` on every call after the first.
    pub fn split(&self) -> Option<(Producer<'_, W, H>, Consumer<'_, W, H>)> {
        if self.taken.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some((Producer::new(self), Consumer::new(self)))
    }

    /// Current role assignment
    pub fn roles(&self) -> RoleAssignment {
        let roles = self.roles.lock(Cell::get);
        RoleAssignment {
            active: roles.active,
            present: roles.present,
        }
    }

    /// Most recently published output rate in frames per second
    pub fn frame_rate(&self) -> f32 {
        f32::from_bits(self.frame_rate_bits.load(Ordering::Relaxed))
    }

    /// Total frames written to the panel
    pub fn frames_presented(&self) -> u32 {
        self.frames_presented.load(Ordering::Relaxed)
    }

    fn active_index(&self) -> usize {
        self.roles.lock(|cell| cell.get().active)
    }

    /// Whether the surface that goes back to the producer at the next swap
    /// is free
    fn reusable(&self) -> bool {
        self.roles.lock(|cell| {
            let roles = cell.get();
            !roles.ready[roles.present]
        })
    }

    fn swap(&self) -> Result<(), SwapError> {
        self.roles.lock(|cell| {
            let mut roles = cell.get();
            if roles.ready[roles.present] {
                return Err(SwapError::FramePending);
            }
            core::mem::swap(&mut roles.active, &mut roles.present);
            roles.ready[roles.present] = true;
            cell.set(roles);
            Ok(())
        })?;
        self.frame_ready.signal(());
        Ok(())
    }

    /// Index of the presentable surface, if one is ready
    fn take_ready(&self) -> Option<usize> {
        self.roles.lock(|cell| {
            let roles = cell.get();
            roles.ready[roles.present].then_some(roles.present)
        })
    }

    fn mark_consumed(&self, index: usize) {
        self.roles.lock(|cell| {
            let mut roles = cell.get();
            roles.ready[index] = false;
            cell.set(roles);
        });
        self.consumed.signal(());
    }

    fn publish_frame_rate(&self, fps: f32) {
        self.frame_rate_bits.store(fps.to_bits(), Ordering::Relaxed);
    }
}
