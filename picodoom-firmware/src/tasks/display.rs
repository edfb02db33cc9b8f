//! Display task (core 1)
//!
//! Brings up the panel, then streams every swapped frame to it forever.

use defmt::*;
use embassy_time::Delay;

use picodoom_core::display::PanelLayout;

use crate::board::{DisplayConsumer, Panel};
use crate::clock::UptimeClock;

#[embassy_executor::task]
pub async fn display_task(
    mut panel: Panel,
    mut consumer: DisplayConsumer,
    layout: PanelLayout,
    backlight: u8,
) {
    info!("Display task started on core 1");

    // Keep going on failure: the pipeline must still drain or core 0 stalls
    match panel.init(&mut Delay).await {
        Ok(()) => info!("ST7789 initialized"),
        Err(e) => error!("ST7789 init failed: {}", e),
    }
    if let Err(e) = panel.set_backlight(backlight) {
        warn!("Backlight control failed: {}", e);
    }

    let letterbox = layout.letterbox();
    info!(
        "Letterbox: {} rows top, {} content, {} bottom",
        letterbox.top, letterbox.content, letterbox.bottom
    );

    let clock = UptimeClock;
    loop {
        match consumer.present_next(&mut panel, &layout, &clock).await {
            Ok(presented) => {
                trace!(
                    "Frame {} presented from surface {}",
                    presented.frame,
                    presented.surface
                );
                if let Some(fps) = presented.frame_rate {
                    debug!("Panel refresh: {} fps", fps);
                }
            }
            Err(e) => error!("Frame transfer failed: {}", e),
        }
    }
}
