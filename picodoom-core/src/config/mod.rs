//! Board configuration
//!
//! The firmware embeds `board.toml` and parses it at boot with
//! [`parse_config`]; the build script checks the same file with a full TOML
//! parser so syntax errors surface at compile time.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError};
pub use types::*;
