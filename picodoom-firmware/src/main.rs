//! PicoDoom - Dual-core Display Pipeline Firmware
//!
//! Core 0 runs the game and renders 320x200 frames into one of two
//! framebuffers. Core 1 streams the other framebuffer to a 320x240 ST7789
//! panel over SPI, letterboxed, then hands it back.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Executor;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::spi::{self, Spi};
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use picodoom_core::demo::DemoScene;
use picodoom_core::display::PanelLayout;
use picodoom_core::input::DebounceTiming;
use picodoom_core::FramePipeline;
use picodoom_drivers::panel::{PanelConfig, St7789};

use crate::board::{Pipeline, DEFAULT_LAYOUT, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::tasks::GameConfig;

mod board;
mod clock;
mod config;
mod tasks;
mod wad;

/// Both framebuffers plus coordination state
static PIPELINE: ConstStaticCell<Pipeline> = ConstStaticCell::new(FramePipeline::new());

static CORE1_STACK: ConstStaticCell<Stack<4096>> = ConstStaticCell::new(Stack::new());
static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("PicoDoom firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    config::log(&config);

    let pipeline: &'static Pipeline = PIPELINE.take();
    let Some((mut producer, consumer)) = pipeline.split() else {
        defmt::panic!("Frame pipeline already split");
    };
    info!(
        "Frame pipeline: 2 x {}x{} surfaces",
        SURFACE_WIDTH, SURFACE_HEIGHT
    );

    // Game data is optional; the demo scene runs without it
    let mut scene = DemoScene::new();
    match wad::load(&config.wad) {
        Some(wad) => {
            wad::log_summary(&wad);
            match wad.palette() {
                Some(palette) => {
                    producer.update_palette(palette);
                    scene.enable_palette();
                    info!("PLAYPAL loaded into palette cache");
                }
                None => warn!("WAD has no PLAYPAL lump"),
            }
        }
        None => warn!("Running without game data"),
    }

    // Display link
    let display = config.display;
    let mut spi_config = spi::Config::default();
    spi_config.frequency = display.spi_frequency_hz;
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, spi_config);

    let panel = St7789::new(
        spi,
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::High),
        Output::new(p.PIN_21, Level::High),
        Output::new(p.PIN_20, Level::Low),
        PanelConfig {
            madctl: display.madctl,
            invert: display.invert,
        },
    );

    let layout = match PanelLayout::new(
        display.panel_width,
        display.panel_height,
        SURFACE_WIDTH as u16,
        SURFACE_HEIGHT as u16,
        display.border(),
    ) {
        Ok(layout) => layout,
        Err(e) => {
            error!(
                "Panel {}x{} rejected: {}, using 320x240",
                display.panel_width, display.panel_height, e
            );
            DEFAULT_LAYOUT
        }
    };

    // Core 1: display only
    let backlight = display.backlight;
    spawn_core1(p.CORE1, CORE1_STACK.take(), move || {
        let executor1 = EXECUTOR1.init(Executor::new());
        executor1.run(|spawner| {
            unwrap!(spawner.spawn(tasks::display_task(panel, consumer, layout, backlight)));
        })
    });
    info!("Core 1 launched");

    // Core 0: game loop and heartbeat
    let buttons = [
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
        Input::new(p.PIN_15, Pull::Up),
    ];
    let led = Output::new(p.PIN_25, Level::Low);
    let game_config = GameConfig {
        timing: DebounceTiming {
            debounce_ms: config.input.debounce_ms,
            hold_ms: config.input.hold_ms,
        },
        status_interval_ms: config.status.interval_ms,
    };

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        unwrap!(spawner.spawn(tasks::heartbeat_task(led)));
        unwrap!(spawner.spawn(tasks::game_task(producer, scene, buttons, game_config)));
    })
}
