//! Embassy async tasks
//!
//! The display task runs alone on core 1; the game and heartbeat tasks
//! share core 0. They communicate only through the frame pipeline.

pub mod display;
pub mod game;
pub mod heartbeat;

pub use display::display_task;
pub use game::{game_task, GameConfig};
pub use heartbeat::heartbeat_task;
