//! Monotonic time source

/// Monotonic microsecond clock
///
/// The firmware backs this with `embassy_time::Instant`; tests use a
/// synthetic counter.
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin
    fn now_us(&self) -> u64;
}
