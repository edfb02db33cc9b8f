//! Button combinations to game keys

use core::fmt::Write;

use heapless::String;

use super::debounce::{ButtonDebouncer, DebounceTiming};

/// Physical buttons on the display board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    A,
    B,
    X,
    Y,
}

impl Button {
    /// All buttons in sampling order
    pub const ALL: [Button; 4] = [Button::A, Button::B, Button::X, Button::Y];

    /// GPIO the button is wired to (active low)
    pub const fn gpio(self) -> u8 {
        match self {
            Button::A => 12,
            Button::B => 13,
            Button::X => 14,
            Button::Y => 15,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameKey {
    Fire,
    Use,
    WeaponUp,
    WeaponDown,
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Map,
    Menu,
}

impl GameKey {
    /// Number of game keys
    pub const COUNT: usize = 12;

    const fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame movement and action flags handed to the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameInput {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    pub activate: bool,
    /// Edge: weapon-up went down this poll
    pub weapon_next: bool,
    /// Edge: weapon-down went down this poll
    pub weapon_prev: bool,
}

type KeyStates = [bool; GameKey::COUNT];

/// Debounces the four buttons and maps them to game keys
///
/// Call [`poll`](Self::poll) once per game tick, then query. Combinations
/// take priority over single buttons, in this order: all four (menu),
/// X+Y (map), A+B (forward), A+Y (backward), B+X (strafe left),
/// B+Y (strafe right).
#[derive(Debug, Clone)]
pub struct InputHandler {
    timing: DebounceTiming,
    buttons: [ButtonDebouncer; 4],
    keys: KeyStates,
    prev_keys: KeyStates,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(DebounceTiming::default())
    }
}

impl InputHandler {
    pub const fn new(timing: DebounceTiming) -> Self {
        Self {
            timing,
            buttons: [ButtonDebouncer::new(); 4],
            keys: [false; GameKey::COUNT],
            prev_keys: [false; GameKey::COUNT],
        }
    }

    /// Sample all buttons and recompute the key map
    ///
    /// `raw[i]` is true while [`Button::ALL`]`[i]` is physically pressed.
    pub fn poll(&mut self, now_ms: u32, raw: [bool; 4]) {
        for (button, sample) in self.buttons.iter_mut().zip(raw) {
            button.update(sample, now_ms, &self.timing);
        }
        self.prev_keys = self.keys;
        self.keys = self.map_keys();
    }

    fn map_keys(&self) -> KeyStates {
        let mut keys = [false; GameKey::COUNT];
        let [a, b, x, y] = self.buttons.map(|button| button.is_pressed());
        let hold_x = self.buttons[Button::X.index()].is_held();
        let hold_y = self.buttons[Button::Y.index()].is_held();

        let combo = if a && b && x && y {
            Some(GameKey::Menu)
        } else if x && y {
            Some(GameKey::Map)
        } else if a && b {
            Some(GameKey::Forward)
        } else if a && y {
            Some(GameKey::Backward)
        } else if b && x {
            Some(GameKey::StrafeLeft)
        } else if b && y {
            Some(GameKey::StrafeRight)
        } else {
            None
        };

        match combo {
            Some(key) => keys[key.index()] = true,
            None => {
                keys[GameKey::Fire.index()] = a;
                keys[GameKey::Use.index()] = b;
                keys[GameKey::WeaponUp.index()] = x && !hold_x;
                keys[GameKey::WeaponDown.index()] = y && !hold_y;
                keys[GameKey::TurnLeft.index()] = hold_x;
                keys[GameKey::TurnRight.index()] = hold_y;
            }
        }
        keys
    }

    /// Key is active after the last poll
    pub fn is_down(&self, key: GameKey) -> bool {
        self.keys[key.index()]
    }

    /// Key became active on the last poll
    pub fn pressed(&self, key: GameKey) -> bool {
        self.keys[key.index()] && !self.prev_keys[key.index()]
    }

    /// Key became inactive on the last poll
    pub fn released(&self, key: GameKey) -> bool {
        !self.keys[key.index()] && self.prev_keys[key.index()]
    }

    /// Debounced state of one button
    pub fn is_button_down(&self, button: Button) -> bool {
        self.buttons[button.index()].is_pressed()
    }

    /// Both buttons are down
    pub fn is_combo(&self, first: Button, second: Button) -> bool {
        self.is_button_down(first) && self.is_button_down(second)
    }

    /// Snapshot for the game tick
    pub fn game_input(&self) -> GameInput {
        GameInput {
            forward: self.is_down(GameKey::Forward),
            backward: self.is_down(GameKey::Backward),
            strafe_left: self.is_down(GameKey::StrafeLeft),
            strafe_right: self.is_down(GameKey::StrafeRight),
            turn_left: self.is_down(GameKey::TurnLeft),
            turn_right: self.is_down(GameKey::TurnRight),
            fire: self.is_down(GameKey::Fire),
            activate: self.is_down(GameKey::Use),
            weapon_next: self.pressed(GameKey::WeaponUp),
            weapon_prev: self.pressed(GameKey::WeaponDown),
        }
    }

    /// One-line summary of buttons and the main keys, for logging
    pub fn describe(&self) -> String<64> {
        let mut line = String::new();
        let _ = write!(
            line,
            "Buttons: A={} B={} X={} Y={} | Keys: FWD={} FIRE={} USE={}",
            self.is_button_down(Button::A) as u8,
            self.is_button_down(Button::B) as u8,
            self.is_button_down(Button::X) as u8,
            self.is_button_down(Button::Y) as u8,
            self.is_down(GameKey::Forward) as u8,
            self.is_down(GameKey::Fire) as u8,
            self.is_down(GameKey::Use) as u8,
        );
        line
    }
}
