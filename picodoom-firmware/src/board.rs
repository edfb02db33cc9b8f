//! Board definition: Raspberry Pi Pico + Pimoroni Pico Display Pack 2.0
//!
//! Pin map:
//! - SPI0 SCK GP18, MOSI GP19 (TX only, DMA channel 0)
//! - Panel DC GP16, CS GP17, RESET GP21, backlight GP20
//! - Buttons A/B/X/Y on GP12-15, active low with pull-ups
//! - On-board LED GP25

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};

use picodoom_core::display::PanelLayout;
use picodoom_core::pixel::WireColor;
use picodoom_core::{Consumer, FramePipeline, Producer};
use picodoom_drivers::panel::St7789;

/// Render width of the game
pub const SURFACE_WIDTH: usize = 320;

/// Render height of the game
pub const SURFACE_HEIGHT: usize = 200;

pub type Pipeline = FramePipeline<SURFACE_WIDTH, SURFACE_HEIGHT>;
pub type GameProducer = Producer<'static, SURFACE_WIDTH, SURFACE_HEIGHT>;
pub type DisplayConsumer = Consumer<'static, SURFACE_WIDTH, SURFACE_HEIGHT>;

/// ST7789 on SPI0 with DC, CS, RESET and backlight lines
pub type Panel = St7789<
    Spi<'static, SPI0, Async>,
    Output<'static>,
    Output<'static>,
    Output<'static>,
    Output<'static>,
>;

/// Layout used when the configured panel geometry is rejected
pub const DEFAULT_LAYOUT: PanelLayout = match PanelLayout::new(
    320,
    240,
    SURFACE_WIDTH as u16,
    SURFACE_HEIGHT as u16,
    WireColor::BLACK,
) {
    Ok(layout) => layout,
    Err(_) => panic!("default panel layout must be valid"),
};

/// Base address of the execute-in-place flash window
pub const XIP_BASE: usize = 0x1000_0000;

/// Flash fitted to the Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
