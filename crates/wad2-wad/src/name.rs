//! Lump names.
//!
//! The directory stores each name in a 16-byte field that is not guaranteed
//! to be NUL-terminated and may carry leftover bytes after the terminator.

use std::fmt;

/// Width of the on-disk name field.
pub const NAME_LEN: usize = 16;

/// Canonicalize a raw name field in place.
///
/// Everything up to the first NUL is kept as-is and every byte from the
/// terminator onwards is zeroed. A field without a terminator is left
/// untouched. No case folding is applied.
///
/// Bytes are only ever written at or after the position being examined, so
/// the operation is safe on the field's own storage and running it twice
/// changes nothing. Returns the name length.
pub fn canonicalize_name(name: &mut [u8; NAME_LEN]) -> usize {
    let len = name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    name[len..].fill(0);
    len
}

/// A canonical, bounded lump name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LumpName {
    bytes: [u8; NAME_LEN],
    len: u8,
}

impl LumpName {
    /// Build a canonical name from a raw directory field.
    pub fn from_raw(mut raw: [u8; NAME_LEN]) -> Self {
        let len = canonicalize_name(&mut raw);
        Self {
            bytes: raw,
            len: len as u8,
        }
    }

    /// The name bytes without padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// The full zero-padded field as stored back into the archive.
    #[inline]
    pub fn padded(&self) -> &[u8; NAME_LEN] {
        &self.bytes
    }

    /// The name as a string, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LumpName({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl PartialEq<str> for LumpName {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for LumpName {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LumpName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
