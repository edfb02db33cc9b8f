//! Game data in flash
//!
//! The `.wad` file is flashed to a fixed offset and read in place through
//! the XIP window; nothing is copied to RAM.

use defmt::*;

use picodoom_core::config::WadConfig;
use picodoom_wad::Wad;

use crate::board::{FLASH_SIZE, XIP_BASE};

/// Directory entries printed at boot
const SUMMARY_LUMPS: usize = 20;

/// Map and parse the game data
///
/// Returns `None` (after logging why) when loading is disabled, the region
/// does not fit in flash, or the container is malformed.
pub fn load(config: &WadConfig) -> Option<Wad<'static>> {
    let data = map_flash(config)?;
    match Wad::parse(data) {
        Ok(wad) => Some(wad),
        Err(e) => {
            warn!("No usable WAD at flash offset {=u32:#x}: {}", config.flash_offset, e);
            None
        }
    }
}

fn map_flash(config: &WadConfig) -> Option<&'static [u8]> {
    if config.max_len == 0 {
        info!("WAD loading disabled");
        return None;
    }

    let offset = config.flash_offset as usize;
    let len = config.max_len as usize;
    if offset.checked_add(len).is_none_or(|end| end > FLASH_SIZE) {
        warn!("WAD region {=usize:#x}+{=usize:#x} exceeds flash", offset, len);
        return None;
    }

    // SAFETY: the range lies inside the XIP-mapped flash, which stays mapped
    // and is never written while the firmware runs.
    Some(unsafe { core::slice::from_raw_parts((XIP_BASE + offset) as *const u8, len) })
}

/// Log the container kind and the first directory entries
pub fn log_summary(wad: &Wad<'_>) {
    info!(
        "WAD: {} with {} lumps, {} bytes mapped",
        wad.kind().as_str(),
        wad.len(),
        wad.data_size()
    );
    for entry in wad.lumps().take(SUMMARY_LUMPS) {
        info!(
            "  [{=usize}] {} - {} bytes @ {=u32:#x}",
            entry.index, entry.name, entry.size, entry.offset
        );
    }
    if wad.len() > SUMMARY_LUMPS {
        info!("  ... and {} more lumps", wad.len() - SUMMARY_LUMPS);
    }
}
