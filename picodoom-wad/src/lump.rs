//! Directory entries

use core::fmt;

/// Length of a lump name field
pub const LUMP_NAME_LEN: usize = 8;

/// A raw lump name, NUL padded to 8 bytes
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LumpName([u8; LUMP_NAME_LEN]);

impl LumpName {
    pub const fn from_raw(raw: [u8; LUMP_NAME_LEN]) -> Self {
        Self(raw)
    }

    /// Name bytes up to the first NUL
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.0.iter().position(|b| *b == 0).unwrap_or(LUMP_NAME_LEN);
        &self.0[..len]
    }

    /// Name as text, or `"?"` if it is not valid UTF-8
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("?")
    }

    /// Exact, case-sensitive comparison
    pub fn matches(&self, name: &str) -> bool {
        self.as_bytes() == name.as_bytes()
    }
}

impl fmt::Debug for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LumpName {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// One directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LumpEntry {
    /// Position in the directory
    pub index: usize,
    /// Byte offset of the lump data in the container
    pub offset: u32,
    /// Lump size in bytes
    pub size: u32,
    pub name: LumpName,
}
