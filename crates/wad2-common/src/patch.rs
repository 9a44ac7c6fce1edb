//! Validated sub-slices of a buffer.
//!
//! Offsets and counts inside an archive come from the file itself and cannot
//! be trusted. Every access that starts from such an offset goes through
//! these helpers so an out-of-range value turns into an error instead of a
//! panic.

use crate::{Error, Result};

/// Compute `offset + count * size` with overflow checking.
#[inline]
pub fn span_end(offset: usize, count: usize, size: usize) -> Option<usize> {
    count.checked_mul(size)?.checked_add(offset)
}

/// Borrow `len` bytes at `offset`, or fail if they do not fit.
#[inline]
pub fn region(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    match offset.checked_add(len) {
        Some(end) if end <= data.len() => Ok(&data[offset..end]),
        _ => Err(Error::OutOfBounds {
            offset,
            len,
            available: data.len(),
        }),
    }
}

/// Mutably borrow `len` bytes at `offset`, or fail if they do not fit.
#[inline]
pub fn region_mut(data: &mut [u8], offset: usize, len: usize) -> Result<&mut [u8]> {
    let available = data.len();
    match offset.checked_add(len) {
        Some(end) if end <= available => Ok(&mut data[offset..end]),
        _ => Err(Error::OutOfBounds {
            offset,
            len,
            available,
        }),
    }
}
