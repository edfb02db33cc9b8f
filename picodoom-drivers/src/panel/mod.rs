//! Display panel drivers

pub mod st7789;

pub use st7789::{PanelConfig, PanelError, St7789};
