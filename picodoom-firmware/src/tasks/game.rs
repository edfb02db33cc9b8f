//! Game task (core 0)
//!
//! Polls the buttons, advances the demo scene, renders into the producer
//! surface and hands it to the display core. Pacing comes from the pipeline:
//! the loop waits for the previous frame to reach the panel before swapping.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};

use picodoom_core::demo::DemoScene;
use picodoom_core::input::{DebounceTiming, InputHandler};

use crate::board::GameProducer;

/// Settings for the game loop
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    pub timing: DebounceTiming,
    /// Interval between status lines
    pub status_interval_ms: u32,
}

#[embassy_executor::task]
pub async fn game_task(
    mut producer: GameProducer,
    mut scene: DemoScene,
    buttons: [Input<'static>; 4],
    config: GameConfig,
) {
    info!("Game task started on core 0");

    let mut input = InputHandler::new(config.timing);
    let status_interval = Duration::from_millis(config.status_interval_ms as u64);
    let start = Instant::now();
    let mut last_status = start;

    loop {
        let now_ms = start.elapsed().as_millis() as u32;
        input.poll(now_ms, buttons.each_ref().map(|b| b.is_low()));

        let previous = scene.pattern();
        scene.update(&input.game_input());
        if scene.pattern() != previous {
            info!("Pattern: {}", scene.pattern().name());
        }

        {
            let mut surface = producer.draw_surface().await;
            let palette = surface.palette();
            scene.render(&mut *surface, palette);
        }

        producer.wait_for_reuse().await;
        if let Err(e) = producer.present_frame() {
            warn!("Swap refused: {}", e);
        }

        if last_status.elapsed() >= status_interval {
            last_status = Instant::now();
            info!(
                "{} | {} fps | {} frames shown",
                scene.describe().as_str(),
                producer.frame_rate(),
                producer.frames_presented()
            );
            debug!("{}", input.describe().as_str());
        }

        // Let the heartbeat run even when the panel keeps up with us
        yield_now().await;
    }
}
