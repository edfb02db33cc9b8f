//! Heartbeat LED

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

/// LED toggle interval in milliseconds
pub const HEARTBEAT_INTERVAL_MS: u64 = 500;

/// Blink the on-board LED so a hung core 0 is visible
#[embassy_executor::task]
pub async fn heartbeat_task(mut led: Output<'static>) {
    info!("Heartbeat task started");

    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_INTERVAL_MS));
    loop {
        ticker.next().await;
        led.toggle();
    }
}
