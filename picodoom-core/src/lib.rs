//! Board-agnostic core logic for the PicoDoom firmware
//!
//! This crate contains everything that does not depend on a specific
//! microcontroller or panel:
//!
//! - Pixel format conversion (RGB888 to the panel's wire format)
//! - The two-surface frame pipeline shared between the cores
//! - Letterbox layout and frame presentation over a transport trait
//! - Frame rate measurement
//! - Button debouncing and game key mapping
//! - Board configuration types and parser
//! - The placeholder demo scene used when no game data is loaded

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod demo;
pub mod display;
pub mod input;
pub mod pipeline;
pub mod pixel;
pub mod surface;
pub mod traits;

#[cfg(test)]
mod testing;

pub use pipeline::{Consumer, FramePipeline, Producer, SwapError};
pub use pixel::{convert, convert_indexed, PaletteCache, WireColor};
pub use surface::Surface;
