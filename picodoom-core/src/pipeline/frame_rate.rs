//! Output rate measurement

/// Length of one measurement window in microseconds
pub const WINDOW_US: u64 = 1_000_000;

/// Counts presented frames over one-second windows
#[derive(Debug, Clone, Default)]
pub struct FrameRateMonitor {
    window_start: Option<u64>,
    count: u32,
    last_rate: f32,
}

impl FrameRateMonitor {
    pub const fn new() -> Self {
        Self {
            window_start: None,
            count: 0,
            last_rate: 0.0,
        }
    }

    /// Start a fresh window at `now_us`, discarding the current count
    pub fn restart(&mut self, now_us: u64) {
        self.window_start = Some(now_us);
        self.count = 0;
    }

    /// Open the first window if none is running yet
    pub fn begin(&mut self, now_us: u64) {
        if self.window_start.is_none() {
            self.restart(now_us);
        }
    }

    /// Count one frame completed at `now_us`
    ///
    /// Returns the new rate when the running window has reached one second.
    pub fn record(&mut self, now_us: u64) -> Option<f32> {
        let start = *self.window_start.get_or_insert(now_us);
        self.count += 1;

        let elapsed = now_us.saturating_sub(start);
        if elapsed < WINDOW_US {
            return None;
        }

        let rate = (self.count as f64 * WINDOW_US as f64 / elapsed as f64) as f32;
        self.last_rate = rate;
        self.restart(now_us);
        Some(rate)
    }

    /// Frames counted in the running window
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Last published rate, zero before the first full window
    pub fn last_rate(&self) -> f32 {
        self.last_rate
    }
}
