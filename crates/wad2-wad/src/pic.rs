//! Picture lumps.
//!
//! A `qpic` payload starts with its width and height in archive byte order,
//! followed by one palette index per pixel, row by row.

use wad2_common::{region, BinaryReader};
use zerocopy::byteorder::{LittleEndian, I32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::lump::{Compression, LumpInfo};
use crate::{Error, Result};

/// Picture header as stored in the archive.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawPicHeader {
    pub width: I32<LittleEndian>,
    pub height: I32<LittleEndian>,
}

impl RawPicHeader {
    /// Size of the header on disk.
    pub const SIZE: usize = 8;
}

/// A normalized picture borrowed from its archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Picture<'a> {
    pub width: u32,
    pub height: u32,
    /// `width * height` palette indices.
    pub pixels: &'a [u8],
}

impl<'a> Picture<'a> {
    /// Interpret the payload of a picture lump.
    ///
    /// Both the header and the full pixel block must lie inside `data`.
    pub fn parse(data: &'a [u8], lump: &LumpInfo) -> Result<Self> {
        let name = || lump.name.to_string();

        if !lump.is_picture() {
            return Err(Error::NotAPicture(name()));
        }
        if lump.compression != Compression::None {
            return Err(Error::CompressedPicture {
                name: name(),
                method: lump.compression.as_u8(),
            });
        }

        let filepos = lump.filepos as usize;
        let out_of_bounds = |needed: usize| Error::PictureOutOfBounds {
            name: name(),
            filepos: lump.filepos,
            needed,
            available: data.len(),
        };

        let header_bytes =
            region(data, filepos, RawPicHeader::SIZE).map_err(|_| out_of_bounds(RawPicHeader::SIZE))?;
        let header: RawPicHeader = BinaryReader::new(header_bytes).read_struct()?;

        let (width, height) = (header.width.get(), header.height.get());
        if width < 0 || height < 0 {
            return Err(Error::NegativeDimensions {
                name: name(),
                width,
                height,
            });
        }

        let pixel_count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| out_of_bounds(usize::MAX))?;
        let pixels = region(data, filepos + RawPicHeader::SIZE, pixel_count)
            .map_err(|_| out_of_bounds(RawPicHeader::SIZE.saturating_add(pixel_count)))?;

        Ok(Self {
            width: width as u32,
            height: height as u32,
            pixels,
        })
    }

    /// One row of palette indices.
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let width = self.width as usize;
        let start = y as usize * width;
        self.pixels.get(start..start + width)
    }

    /// Palette index at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width {
            return None;
        }
        self.row(y).map(|row| row[x as usize])
    }
}
