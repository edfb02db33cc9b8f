//! Hardware abstraction traits
//!
//! These traits define the interface between the pipeline logic and
//! hardware-specific implementations.

pub mod clock;
pub mod transport;

pub use clock::Clock;
pub use transport::{FrameTransport, Window};
