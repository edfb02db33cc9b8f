//! Test doubles shared by the unit tests in this crate

use core::cell::Cell;
use core::convert::Infallible;
use std::vec::Vec;

use crate::pixel::WireColor;
use crate::traits::{Clock, FrameTransport, Window};

/// One call made on a [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOp {
    Window(Window),
    Pixels(Vec<u8>),
    Fill(WireColor, usize),
}

/// Transport that records every call
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub ops: Vec<TransportOp>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Sum of the heights of every window that was addressed
    pub fn rows_written(&self) -> u32 {
        self.ops
            .iter()
            .map(|op| match op {
                TransportOp::Window(w) => w.height() as u32,
                _ => 0,
            })
            .sum()
    }

    /// Number of pixels streamed, fills included
    pub fn pixels_written(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                TransportOp::Pixels(bytes) => bytes.len() / 2,
                TransportOp::Fill(_, count) => *count,
                TransportOp::Window(_) => 0,
            })
            .sum()
    }

    /// Every content burst, in order
    pub fn frames(&self) -> Vec<&[u8]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TransportOp::Pixels(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl FrameTransport for RecordingTransport {
    type Error = Infallible;

    async fn set_window(&mut self, window: Window) -> Result<(), Self::Error> {
        self.ops.push(TransportOp::Window(window));
        Ok(())
    }

    async fn write_pixels(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.ops.push(TransportOp::Pixels(bytes.to_vec()));
        Ok(())
    }

    async fn fill(&mut self, color: WireColor, count: usize) -> Result<(), Self::Error> {
        self.ops.push(TransportOp::Fill(color, count));
        Ok(())
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    pub fn advance(&self, us: u64) {
        self.now.set(self.now.get() + us);
    }
}

impl Clock for ManualClock {
    fn now_us(&self) -> u64 {
        self.now.get()
    }
}
