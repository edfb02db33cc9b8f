//! Pipeline clock backed by the embassy time driver

use embassy_time::Instant;
use picodoom_core::traits::Clock;

/// Microseconds since boot
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
