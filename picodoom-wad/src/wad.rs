//! Header and directory parsing

use crate::lump::{LumpEntry, LumpName, LUMP_NAME_LEN};

/// Header size in bytes
pub const HEADER_LEN: usize = 12;

/// Directory entry size in bytes
pub const DIRECTORY_ENTRY_LEN: usize = 16;

/// Bytes of `PLAYPAL` that make up the first palette (256 RGB triples)
pub const PLAYPAL_LEN: usize = 768;

/// Container errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WadError {
    /// Buffer shorter than the header
    TooShort,
    /// Magic is neither `IWAD` nor `PWAD`
    BadMagic,
    /// Directory runs past the end of the buffer
    DirectoryOutOfBounds,
    /// Lump data runs past the end of the buffer
    LumpOutOfBounds,
}

/// Container flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WadKind {
    /// Main game data
    Iwad,
    /// Patch data
    Pwad,
}

impl WadKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            WadKind::Iwad => "IWAD",
            WadKind::Pwad => "PWAD",
        }
    }
}

/// A validated container borrowing its bytes
#[derive(Debug, Clone, Copy)]
pub struct Wad<'a> {
    data: &'a [u8],
    kind: WadKind,
    lump_count: usize,
    directory: &'a [u8],
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let field = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([field[0], field[1], field[2], field[3]]))
}

impl<'a> Wad<'a> {
    /// Validate the header and directory
    ///
    /// Lump bounds are checked lazily by [`read`](Self::read).
    pub fn parse(data: &'a [u8]) -> Result<Self, WadError> {
        if data.len() < HEADER_LEN {
            return Err(WadError::TooShort);
        }

        let kind = match &data[..4] {
            b"IWAD" => WadKind::Iwad,
            b"PWAD" => WadKind::Pwad,
            _ => return Err(WadError::BadMagic),
        };

        let lump_count = read_u32(data, 4).ok_or(WadError::TooShort)? as usize;
        let directory_offset = read_u32(data, 8).ok_or(WadError::TooShort)? as usize;

        let directory_end = lump_count
            .checked_mul(DIRECTORY_ENTRY_LEN)
            .and_then(|len| len.checked_add(directory_offset))
            .ok_or(WadError::DirectoryOutOfBounds)?;
        let directory = data
            .get(directory_offset..directory_end)
            .ok_or(WadError::DirectoryOutOfBounds)?;

        Ok(Self {
            data,
            kind,
            lump_count,
            directory,
        })
    }

    pub fn kind(&self) -> WadKind {
        self.kind
    }

    /// Number of directory entries
    pub fn len(&self) -> usize {
        self.lump_count
    }

    pub fn is_empty(&self) -> bool {
        self.lump_count == 0
    }

    /// Size of the whole container in bytes
    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    /// Directory entry at `index`
    pub fn lump(&self, index: usize) -> Option<LumpEntry> {
        let start = index.checked_mul(DIRECTORY_ENTRY_LEN)?;
        let raw = self
            .directory
            .get(start..start.checked_add(DIRECTORY_ENTRY_LEN)?)?;

        let mut name = [0u8; LUMP_NAME_LEN];
        name.copy_from_slice(&raw[8..]);

        Some(LumpEntry {
            index,
            offset: read_u32(raw, 0)?,
            size: read_u32(raw, 4)?,
            name: LumpName::from_raw(name),
        })
    }

    /// All directory entries in order
    pub fn lumps(&self) -> impl Iterator<Item = LumpEntry> + '_ {
        (0..self.lump_count).filter_map(|index| self.lump(index))
    }

    /// First entry named `name` (case-sensitive)
    pub fn find(&self, name: &str) -> Option<LumpEntry> {
        self.lumps().find(|entry| entry.name.matches(name))
    }

    /// Data of a lump
    pub fn read(&self, entry: &LumpEntry) -> Result<&'a [u8], WadError> {
        let start = entry.offset as usize;
        let end = start
            .checked_add(entry.size as usize)
            .ok_or(WadError::LumpOutOfBounds)?;
        self.data.get(start..end).ok_or(WadError::LumpOutOfBounds)
    }

    /// First palette from `PLAYPAL`, if present and complete
    pub fn palette(&self) -> Option<&'a [u8; PLAYPAL_LEN]> {
        let entry = self.find("PLAYPAL")?;
        let data = self.read(&entry).ok()?;
        data.get(..PLAYPAL_LEN)?.try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec;

    /// Build a container with lump data first and the directory last
    fn build(magic: &[u8; 4], lumps: &[(&str, &[u8])]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(magic);
        data.extend_from_slice(&(lumps.len() as u32).to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());

        let mut directory = Vec::new();
        for (name, body) in lumps {
            directory.extend_from_slice(&(data.len() as u32).to_le_bytes());
            directory.extend_from_slice(&(body.len() as u32).to_le_bytes());
            let mut raw = [0u8; LUMP_NAME_LEN];
            raw[..name.len()].copy_from_slice(name.as_bytes());
            directory.extend_from_slice(&raw);
            data.extend_from_slice(body);
        }

        let directory_offset = data.len() as u32;
        data[8..12].copy_from_slice(&directory_offset.to_le_bytes());
        data.extend_from_slice(&directory);
        data
    }

    #[test]
    fn test_parse_and_find() {
        let data = build(b"IWAD", &[("E1M1", b"map"), ("THINGS", b"0123456789")]);
        let wad = Wad::parse(&data).unwrap();

        assert_eq!(wad.kind(), WadKind::Iwad);
        assert_eq!(wad.len(), 2);
        assert_eq!(wad.data_size(), data.len());

        let things = wad.find("THINGS").unwrap();
        assert_eq!(things.index, 1);
        assert_eq!(things.size, 10);
        assert_eq!(wad.read(&things).unwrap(), b"0123456789");

        assert!(wad.find("things").is_none());
        assert!(wad.find("E1M").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let data = build(b"PWAD", &[("DUP", b"first"), ("DUP", b"second")]);
        let wad = Wad::parse(&data).unwrap();
        assert_eq!(wad.kind(), WadKind::Pwad);
        let entry = wad.find("DUP").unwrap();
        assert_eq!(wad.read(&entry).unwrap(), b"first");
    }

    #[test]
    fn test_empty_directory() {
        let data = build(b"PWAD", &[]);
        let wad = Wad::parse(&data).unwrap();
        assert!(wad.is_empty());
        assert_eq!(wad.lumps().count(), 0);
        assert!(wad.find("ANY").is_none());
    }

    #[test]
    fn test_short_buffer() {
        assert_eq!(Wad::parse(b"IWAD\x01\0\0\0").unwrap_err(), WadError::TooShort);
        assert_eq!(Wad::parse(&[]).unwrap_err(), WadError::TooShort);
    }

    #[test]
    fn test_bad_magic() {
        let mut data = build(b"IWAD", &[("A", b"x")]);
        data[0] = b'J';
        assert_eq!(Wad::parse(&data).unwrap_err(), WadError::BadMagic);
    }

    #[test]
    fn test_directory_past_end() {
        let mut data = build(b"IWAD", &[("A", b"x")]);
        // Claim one more entry than the buffer holds
        data[4..8].copy_from_slice(&2u32.to_le_bytes());
        assert_eq!(Wad::parse(&data).unwrap_err(), WadError::DirectoryOutOfBounds);

        // Offset and count that overflow when multiplied and added
        let mut data = build(b"IWAD", &[]);
        data[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
        data[8..12].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(Wad::parse(&data).unwrap_err(), WadError::DirectoryOutOfBounds);
    }

    #[test]
    fn test_lump_past_end() {
        let mut data = build(b"IWAD", &[("BIG", b"abcd")]);
        let entry_size = data.len() - DIRECTORY_ENTRY_LEN + 4;
        data[entry_size..entry_size + 4].copy_from_slice(&1000u32.to_le_bytes());

        let wad = Wad::parse(&data).unwrap();
        let entry = wad.find("BIG").unwrap();
        assert_eq!(wad.read(&entry), Err(WadError::LumpOutOfBounds));
    }

    #[test]
    fn test_palette() {
        let mut playpal = [0u8; PLAYPAL_LEN + 6];
        playpal[0] = 0x12;
        playpal[PLAYPAL_LEN - 1] = 0x34;
        let data = build(b"IWAD", &[("PLAYPAL", &playpal)]);
        let wad = Wad::parse(&data).unwrap();

        let palette = wad.palette().unwrap();
        assert_eq!(palette[0], 0x12);
        assert_eq!(palette[PLAYPAL_LEN - 1], 0x34);

        let data = build(b"IWAD", &[("PLAYPAL", &[0u8; 12])]);
        assert!(Wad::parse(&data).unwrap().palette().is_none());
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            if let Ok(wad) = Wad::parse(&data) {
                prop_assert_eq!(wad.lumps().count(), wad.len());
                for entry in wad.lumps() {
                    let _ = wad.read(&entry);
                }
            }
        }

        #[test]
        fn prop_valid_header_with_garbage_directory(
            count in 0u32..8,
            offset in 0u32..64,
            tail in proptest::collection::vec(any::<u8>(), 0..128),
        ) {
            let mut data = Vec::new();
            data.extend_from_slice(b"PWAD");
            data.extend_from_slice(&count.to_le_bytes());
            data.extend_from_slice(&offset.to_le_bytes());
            data.extend_from_slice(&tail);

            let fits = offset as usize + count as usize * DIRECTORY_ENTRY_LEN <= data.len();
            match Wad::parse(&data) {
                Ok(wad) => prop_assert!(fits && wad.len() == count as usize),
                Err(err) => prop_assert!(!fits && err == WadError::DirectoryOutOfBounds),
            }
        }
    }
}
