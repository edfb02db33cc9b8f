//! Button input
//!
//! Four active-low buttons are debounced individually and then mapped to
//! game keys, with two-button combinations standing in for the movement keys
//! the board does not have.

pub mod debounce;
pub mod keymap;

pub use debounce::{ButtonDebouncer, DebounceTiming};
pub use keymap::{Button, GameInput, GameKey, InputHandler};
