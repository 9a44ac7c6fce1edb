//! Lump directory parsing and normalization.

use tracing::{debug, trace, warn};
use wad2_common::{region_mut, span_end, BinaryReader};

use crate::header::WadHeader;
use crate::lump::{Compression, LumpInfo, RawLumpInfo};
use crate::pic::Picture;
use crate::{Error, Result};

/// Parse the directory described by `header` and normalize it.
///
/// Every record is decoded into host order and its name field is rewritten
/// in place with the canonical, zero-padded name. Payload extents of every
/// lump and the header and pixels of every picture lump are checked against
/// the buffer. Numeric fields in `data` keep their archive byte order, so
/// running this again over the same buffer returns the same directory and
/// leaves the buffer as it was.
pub fn normalize(data: &mut [u8], header: &WadHeader) -> Result<Vec<LumpInfo>> {
    let count = header.lump_count()?;
    let offset = header.directory_offset()?;

    match span_end(offset, count, RawLumpInfo::SIZE) {
        Some(end) if end <= data.len() => {}
        _ => {
            return Err(Error::DirectoryOutOfBounds {
                offset,
                count,
                available: data.len(),
            })
        }
    }

    debug!(count, offset, "parsing lump directory");

    let lumps = parse_records(data, offset, count)?;

    for lump in &lumps {
        let field = offset + lump.index * RawLumpInfo::SIZE + RawLumpInfo::NAME_OFFSET;
        region_mut(data, field, lump.name.padded().len())?.copy_from_slice(lump.name.padded());
    }

    let data = &*data;
    for lump in &lumps {
        check_payload(data, lump)?;
        if lump.is_picture() {
            let pic = Picture::parse(data, lump)?;
            trace!(name = %lump.name, width = pic.width, height = pic.height, "picture");
        }
    }

    Ok(lumps)
}

fn parse_records(data: &[u8], offset: usize, count: usize) -> Result<Vec<LumpInfo>> {
    let mut reader = BinaryReader::new_at(data, offset);
    let mut lumps = Vec::with_capacity(count);

    for index in 0..count {
        let raw: RawLumpInfo = reader.read_struct()?;
        let lump = LumpInfo::from_raw(index, &raw)?;

        trace!(
            index,
            name = %lump.name,
            filepos = lump.filepos,
            size = lump.size,
            lump_type = lump.lump_type.as_u8(),
            "lump"
        );

        if lump.compression == Compression::None && lump.disksize != lump.size {
            warn!(
                name = %lump.name,
                disksize = lump.disksize,
                size = lump.size,
                "uncompressed lump with differing disk and memory sizes"
            );
        }

        lumps.push(lump);
    }

    Ok(lumps)
}

fn check_payload(data: &[u8], lump: &LumpInfo) -> Result<()> {
    match (lump.filepos as usize).checked_add(lump.disksize as usize) {
        Some(end) if end <= data.len() => Ok(()),
        _ => Err(Error::LumpOutOfBounds {
            name: lump.name.to_string(),
            filepos: lump.filepos,
            len: lump.disksize,
            available: data.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lump::LumpType;
    use crate::testing::WadBuilder;

    fn parse(mut data: Vec<u8>) -> (Vec<u8>, Result<Vec<LumpInfo>>) {
        let header = WadHeader::parse(&data, "test.wad").unwrap();
        let result = normalize(&mut data, &header);
        (data, result)
    }

    #[test]
    fn test_yields_every_record() {
        let data = WadBuilder::new()
            .lump("PALETTE", LumpType::TYP_PALETTE, &[7u8; 768])
            .lump("CONCHARS", LumpType::TYP_MIPTEX, &[1u8; 64])
            .lump("COLORMAP", LumpType::TYP_NONE, &[2u8; 32])
            .build();
        let (_, lumps) = parse(data);
        let lumps = lumps.unwrap();

        assert_eq!(lumps.len(), 3);
        assert_eq!(lumps[0].name, "PALETTE");
        assert_eq!(lumps[0].filepos, 12);
        assert_eq!(lumps[0].size, 768);
        assert_eq!(lumps[1].filepos, 12 + 768);
        assert_eq!(lumps[1].size, 64);
        assert_eq!(lumps[2].filepos, 12 + 768 + 64);
        assert_eq!(lumps[2].lump_type, LumpType::None);
        assert_eq!(
            lumps.iter().map(|l| l.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_names_rewritten_in_place() {
        let data = WadBuilder::new()
            .raw_name_lump(*b"WEAPON0\0garbage!", LumpType::TYP_NONE, &[0u8; 4])
            .build();
        let table = data.len() - RawLumpInfo::SIZE;
        let (data, lumps) = parse(data);

        assert_eq!(lumps.unwrap()[0].name, "WEAPON0");
        let field = &data[table + RawLumpInfo::NAME_OFFSET..table + RawLumpInfo::SIZE];
        assert_eq!(field, b"WEAPON0\0\0\0\0\0\0\0\0\0");
    }

    #[test]
    fn test_pixels_untouched() {
        let pixels: Vec<u8> = (0..64u32 * 32).map(|i| (i * 7) as u8).collect();
        let original = WadBuilder::new().picture("BACKTILE", 64, 32, &pixels).build();
        let (data, lumps) = parse(original.clone());
        let lump = lumps.unwrap()[0];

        let pic = Picture::parse(&data, &lump).unwrap();
        assert_eq!((pic.width, pic.height), (64, 32));
        assert_eq!(pic.pixels, &pixels[..]);
        let payload = lump.filepos as usize..(lump.filepos + lump.disksize) as usize;
        assert_eq!(&data[payload.clone()], &original[payload]);
    }

    #[test]
    fn test_normalize_twice_is_noop() {
        let data = WadBuilder::new()
            .raw_name_lump(*b"A\0zzzzzzzzzzzzzz", LumpType::TYP_NONE, &[1, 2, 3])
            .picture("DISC", 2, 2, &[9, 8, 7, 6])
            .build();
        let (mut once, first) = parse(data);
        let first = first.unwrap();
        let snapshot = once.clone();

        let header = WadHeader::parse(&once, "test.wad").unwrap();
        let second = normalize(&mut once, &header).unwrap();

        assert_eq!(first, second);
        assert_eq!(once, snapshot);
    }

    #[test]
    fn test_directory_past_end() {
        let mut data = WadBuilder::new().lump("A", 0, &[0u8; 4]).build();
        data[4..8].copy_from_slice(&5i32.to_le_bytes());
        let (_, result) = parse(data);

        assert!(matches!(
            result,
            Err(Error::DirectoryOutOfBounds { count: 5, .. })
        ));
    }

    #[test]
    fn test_directory_offset_past_end() {
        let mut data = WadBuilder::new().build();
        data[4..8].copy_from_slice(&1i32.to_le_bytes());
        data[8..12].copy_from_slice(&i32::MAX.to_le_bytes());
        let (_, result) = parse(data);

        assert!(matches!(result, Err(Error::DirectoryOutOfBounds { .. })));
    }

    #[test]
    fn test_empty_directory() {
        let (_, lumps) = parse(WadBuilder::new().build());
        assert!(lumps.unwrap().is_empty());
    }

    #[test]
    fn test_lump_payload_past_end() {
        let mut data = WadBuilder::new().lump("BIG", 0, &[0u8; 4]).build();
        let table = data.len() - RawLumpInfo::SIZE;
        data[table + 4..table + 8].copy_from_slice(&4096i32.to_le_bytes());
        let (_, result) = parse(data);

        match result {
            Err(Error::LumpOutOfBounds { name, len: 4096, .. }) => assert_eq!(name, "BIG"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_picture_filepos_past_end() {
        let mut data = WadBuilder::new().picture("DISC", 1, 1, &[0]).build();
        let table = data.len() - RawLumpInfo::SIZE;
        let len = data.len() as i32;
        data[table..table + 4].copy_from_slice(&(len - 4).to_le_bytes());
        data[table + 4..table + 8].copy_from_slice(&0i32.to_le_bytes());
        let (_, result) = parse(data);

        assert!(matches!(result, Err(Error::PictureOutOfBounds { .. })));
    }
}
