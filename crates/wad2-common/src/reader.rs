//! Binary reader for bounds-checked parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! archive records from a byte slice without copying it.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader over a borrowed byte slice.
///
/// Reads past the end of the slice fail with [`Error::UnexpectedEof`] and
/// leave the position unchanged.
///
/// # Example
///
/// ```
/// use wad2_common::BinaryReader;
///
/// let data = b"WAD2\x03\x00\x00\x00";
/// let mut reader = BinaryReader::new(data);
///
/// reader.expect_magic(b"WAD2").unwrap();
/// assert_eq!(reader.read_bytes(4).unwrap(), b"WAD2");
/// assert_eq!(reader.read_bytes(4).unwrap(), &[3, 0, 0, 0]);
/// assert!(reader.read_bytes(1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a new reader starting at a specific position.
    ///
    /// The position is not validated here; the first read reports it.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        self.position
            .checked_add(count)
            .and_then(|end| self.data.get(self.position..end))
            .ok_or(Error::UnexpectedEof {
                needed: count,
                available: self.data.len().saturating_sub(self.position),
            })
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a struct using zerocopy.
    ///
    /// Structs read this way are expected to carry their own byte order
    /// (zerocopy's `little_endian` field types), so no conversion happens here.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
        })
    }

    /// Check for specific magic bytes at the current position.
    ///
    /// The position is left where it was, so the record holding the magic
    /// can still be read whole.
    pub fn expect_magic(&self, expected: &[u8]) -> Result<()> {
        let actual = self.peek_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::InvalidMagic {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }
}
