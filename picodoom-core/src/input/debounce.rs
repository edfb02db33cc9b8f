//! Per-button debounce and hold detection

/// Debounce timing in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceTiming {
    /// Minimum time between opposite edges
    pub debounce_ms: u32,
    /// Continuous press time before a button counts as held
    pub hold_ms: u32,
}

impl Default for DebounceTiming {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            hold_ms: 500,
        }
    }
}

/// State of one physical button
///
/// Fed one raw sample per poll. A press edge is accepted only if more than
/// `debounce_ms` passed since the last accepted release, and a release edge
/// only if more than `debounce_ms` passed since the last accepted press.
/// Rejected edges are swallowed until the next opposite edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDebouncer {
    raw: bool,
    pressed: bool,
    held: bool,
    press_ms: u32,
    release_ms: Option<u32>,
}

impl ButtonDebouncer {
    pub const fn new() -> Self {
        Self {
            raw: false,
            pressed: false,
            held: false,
            press_ms: 0,
            release_ms: None,
        }
    }

    /// Feed one sample; `raw` is true while the button is physically down
    pub fn update(&mut self, raw: bool, now_ms: u32, timing: &DebounceTiming) {
        match (raw, self.raw) {
            (true, false) => {
                let settled = self
                    .release_ms
                    .is_none_or(|at| now_ms.wrapping_sub(at) > timing.debounce_ms);
                if settled {
                    self.pressed = true;
                    self.held = false;
                    self.press_ms = now_ms;
                }
            }
            (false, true) => {
                if now_ms.wrapping_sub(self.press_ms) > timing.debounce_ms {
                    self.pressed = false;
                    self.held = false;
                    self.release_ms = Some(now_ms);
                }
            }
            (true, true) => {
                if self.pressed && now_ms.wrapping_sub(self.press_ms) > timing.hold_ms {
                    self.held = true;
                }
            }
            (false, false) => {}
        }
        self.raw = raw;
    }

    /// Debounced pressed state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Pressed continuously for longer than the hold time
    pub fn is_held(&self) -> bool {
        self.held
    }
}
