//! WAD container reader
//!
//! A WAD is a flat archive of named lumps. The reader borrows the whole
//! container (typically memory-mapped flash) and never copies or allocates.
//!
//! # Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! header (12 bytes)
//! ┌────────────┬────────────┬──────────────────┐
//! │ magic      │ lump count │ directory offset │
//! │ IWAD/PWAD  │ u32        │ u32              │
//! └────────────┴────────────┴──────────────────┘
//!
//! directory entry (16 bytes, `lump count` of them at `directory offset`)
//! ┌─────────────┬──────────┬──────────────────────┐
//! │ file offset │ size     │ name, NUL padded     │
//! │ u32         │ u32      │ 8 bytes              │
//! └─────────────┴──────────┴──────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod lump;
pub mod wad;

pub use lump::{LumpEntry, LumpName, LUMP_NAME_LEN};
pub use wad::{Wad, WadError, WadKind, DIRECTORY_ENTRY_LEN, HEADER_LEN, PLAYPAL_LEN};
