//! WAD2 header.

use wad2_common::endian::host_to_little;
use wad2_common::BinaryReader;
use zerocopy::byteorder::{LittleEndian, I32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::{Error, Result, WAD2_MAGIC};

/// Archive header at offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct WadHeader {
    /// Format signature, `WAD2`.
    pub identification: [u8; 4],
    /// Number of directory records.
    pub numlumps: I32<LittleEndian>,
    /// Byte offset of the directory from the start of the file.
    pub infotableofs: I32<LittleEndian>,
}

impl WadHeader {
    /// Size of the header on disk.
    pub const SIZE: usize = 12;

    /// Read and validate the header at the start of `data`.
    ///
    /// `archive` only names the file in diagnostics.
    pub fn parse(data: &[u8], archive: &str) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::TruncatedHeader {
                archive: archive.to_string(),
                len: data.len(),
            });
        }

        let mut reader = BinaryReader::new(data);
        reader
            .expect_magic(&WAD2_MAGIC)
            .map_err(|err| match err {
                wad2_common::Error::InvalidMagic { actual, .. } => Error::InvalidMagic {
                    archive: archive.to_string(),
                    actual: <[u8; 4]>::try_from(actual.as_slice()).unwrap_or_default(),
                },
                other => other.into(),
            })?;

        reader.read_struct().map_err(Into::into)
    }

    /// Entry count exactly as its bits sit in the file.
    #[inline]
    pub fn raw_numlumps(&self) -> i32 {
        host_to_little(self.numlumps.get())
    }

    /// Directory offset exactly as its bits sit in the file.
    #[inline]
    pub fn raw_infotableofs(&self) -> i32 {
        host_to_little(self.infotableofs.get())
    }

    /// Entry count in host order.
    pub fn lump_count(&self) -> Result<usize> {
        non_negative("numlumps", self.numlumps.get())
    }

    /// Directory offset in host order.
    pub fn directory_offset(&self) -> Result<usize> {
        non_negative("infotableofs", self.infotableofs.get())
    }
}

pub(crate) fn non_negative(field: &'static str, value: i32) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::NegativeField { field, value })
}
