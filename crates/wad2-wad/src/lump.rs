//! Lump directory records.

use zerocopy::byteorder::{LittleEndian, I32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::header::non_negative;
use crate::name::{LumpName, NAME_LEN};
use crate::Result;

/// Directory record as stored in the archive.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct RawLumpInfo {
    /// Offset of the payload from the start of the file.
    pub filepos: I32<LittleEndian>,
    /// Payload size on disk.
    pub disksize: I32<LittleEndian>,
    /// Payload size once decompressed.
    pub size: I32<LittleEndian>,
    pub lump_type: u8,
    pub compression: u8,
    pub pad: [u8; 2],
    /// Name field, not necessarily terminated.
    pub name: [u8; NAME_LEN],
}

impl RawLumpInfo {
    /// Size of a directory record on disk.
    pub const SIZE: usize = 32;

    /// Offset of the name field within a record.
    pub const NAME_OFFSET: usize = 16;
}

/// Lump type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LumpType {
    None,
    Label,
    /// 256-entry RGB palette. Shares its tag with the first grab type.
    Palette,
    QTex,
    /// Picture: width, height, then `width * height` pixels.
    QPic,
    Sound,
    MipTex,
    /// Any tag without a known meaning.
    Other(u8),
}

impl LumpType {
    pub const TYP_NONE: u8 = 0;
    pub const TYP_LABEL: u8 = 1;
    /// First of the grab types (64 + grab command number).
    pub const TYP_LUMPY: u8 = 64;
    pub const TYP_PALETTE: u8 = 64;
    pub const TYP_QTEX: u8 = 65;
    pub const TYP_QPIC: u8 = 66;
    pub const TYP_SOUND: u8 = 67;
    pub const TYP_MIPTEX: u8 = 68;

    /// Tag value as stored on disk.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::None => Self::TYP_NONE,
            Self::Label => Self::TYP_LABEL,
            Self::Palette => Self::TYP_PALETTE,
            Self::QTex => Self::TYP_QTEX,
            Self::QPic => Self::TYP_QPIC,
            Self::Sound => Self::TYP_SOUND,
            Self::MipTex => Self::TYP_MIPTEX,
            Self::Other(tag) => tag,
        }
    }

    /// Short label for listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Label => "label",
            Self::Palette => "palette",
            Self::QTex => "qtex",
            Self::QPic => "qpic",
            Self::Sound => "sound",
            Self::MipTex => "miptex",
            Self::Other(_) => "other",
        }
    }
}

impl From<u8> for LumpType {
    fn from(tag: u8) -> Self {
        match tag {
            Self::TYP_NONE => Self::None,
            Self::TYP_LABEL => Self::Label,
            Self::TYP_PALETTE => Self::Palette,
            Self::TYP_QTEX => Self::QTex,
            Self::TYP_QPIC => Self::QPic,
            Self::TYP_SOUND => Self::Sound,
            Self::TYP_MIPTEX => Self::MipTex,
            other => Self::Other(other),
        }
    }
}

/// Compression tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Compression {
    None,
    Lzss,
    Other(u8),
}

impl Compression {
    pub const CMP_NONE: u8 = 0;
    pub const CMP_LZSS: u8 = 1;

    pub fn as_u8(self) -> u8 {
        match self {
            Self::None => Self::CMP_NONE,
            Self::Lzss => Self::CMP_LZSS,
            Self::Other(tag) => tag,
        }
    }
}

impl From<u8> for Compression {
    fn from(tag: u8) -> Self {
        match tag {
            Self::CMP_NONE => Self::None,
            Self::CMP_LZSS => Self::Lzss,
            other => Self::Other(other),
        }
    }
}

/// A normalized directory entry.
///
/// Numeric fields are in host order and the name is canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LumpInfo {
    /// Position in the directory.
    pub index: usize,
    /// Offset of the payload from the start of the file.
    pub filepos: u32,
    /// Payload size on disk.
    pub disksize: u32,
    /// Payload size once decompressed.
    pub size: u32,
    pub lump_type: LumpType,
    pub compression: Compression,
    pub name: LumpName,
}

impl LumpInfo {
    /// Decode a raw record.
    pub fn from_raw(index: usize, raw: &RawLumpInfo) -> Result<Self> {
        Ok(Self {
            index,
            filepos: non_negative("filepos", raw.filepos.get())? as u32,
            disksize: non_negative("disksize", raw.disksize.get())? as u32,
            size: non_negative("size", raw.size.get())? as u32,
            lump_type: LumpType::from(raw.lump_type),
            compression: Compression::from(raw.compression),
            name: LumpName::from_raw(raw.name),
        })
    }

    #[inline]
    pub fn is_picture(&self) -> bool {
        self.lump_type == LumpType::QPic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn raw(filepos: i32, disksize: i32, size: i32, lump_type: u8, name: &[u8]) -> RawLumpInfo {
        let mut field = [0u8; NAME_LEN];
        field[..name.len()].copy_from_slice(name);
        RawLumpInfo {
            filepos: I32::new(filepos),
            disksize: I32::new(disksize),
            size: I32::new(size),
            lump_type,
            compression: Compression::CMP_NONE,
            pad: [0; 2],
            name: field,
        }
    }

    #[test]
    fn test_record_layout() {
        assert_eq!(std::mem::size_of::<RawLumpInfo>(), RawLumpInfo::SIZE);

        let record = raw(0x0102_0304, 0, 0, 0, b"ABC");
        let bytes = record.as_bytes();
        assert_eq!(&bytes[..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(
            &bytes[RawLumpInfo::NAME_OFFSET..RawLumpInfo::NAME_OFFSET + 3],
            b"ABC"
        );
    }

    #[test]
    fn test_from_raw() {
        let info = LumpInfo::from_raw(4, &raw(1024, 776, 776, LumpType::TYP_QPIC, b"DISC")).unwrap();

        assert_eq!(info.index, 4);
        assert_eq!(info.filepos, 1024);
        assert_eq!(info.disksize, 776);
        assert_eq!(info.size, 776);
        assert_eq!(info.lump_type, LumpType::QPic);
        assert_eq!(info.compression, Compression::None);
        assert_eq!(info.name, "DISC");
        assert!(info.is_picture());
    }

    #[test]
    fn test_negative_filepos() {
        match LumpInfo::from_raw(0, &raw(-4, 0, 0, 0, b"X")) {
            Err(Error::NegativeField {
                field: "filepos",
                value: -4,
            }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(LumpType::from(64), LumpType::Palette);
        assert_eq!(LumpType::from(68), LumpType::MipTex);
        assert_eq!(LumpType::from(99), LumpType::Other(99));
        for tag in [0u8, 1, 64, 65, 66, 67, 68, 12] {
            assert_eq!(LumpType::from(tag).as_u8(), tag);
        }
        assert_eq!(Compression::from(1), Compression::Lzss);
        assert_eq!(Compression::from(7).as_u8(), 7);
    }
}
