//! Frame presentation
//!
//! Letterbox geometry and the sequence of windowed writes that puts one
//! surface on the panel.

pub mod layout;
pub mod present;

pub use layout::{LayoutError, Letterbox, PanelLayout};
pub use present::write_frame;
