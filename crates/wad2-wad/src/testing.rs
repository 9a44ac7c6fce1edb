//! In-memory WAD2 images for tests.

use crate::lump::{LumpType, RawLumpInfo};
use crate::name::NAME_LEN;
use crate::WAD2_MAGIC;

struct Entry {
    name: [u8; NAME_LEN],
    lump_type: u8,
    payload: Vec<u8>,
}

/// Lays out payloads right after the header and the directory after them.
pub(crate) struct WadBuilder {
    magic: [u8; 4],
    entries: Vec<Entry>,
}

impl WadBuilder {
    pub(crate) fn new() -> Self {
        Self {
            magic: WAD2_MAGIC,
            entries: Vec::new(),
        }
    }

    pub(crate) fn magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    pub(crate) fn lump(self, name: &str, lump_type: u8, payload: &[u8]) -> Self {
        let mut field = [0u8; NAME_LEN];
        field[..name.len()].copy_from_slice(name.as_bytes());
        self.raw_name_lump(field, lump_type, payload)
    }

    pub(crate) fn raw_name_lump(mut self, name: [u8; NAME_LEN], lump_type: u8, payload: &[u8]) -> Self {
        self.entries.push(Entry {
            name,
            lump_type,
            payload: payload.to_vec(),
        });
        self
    }

    pub(crate) fn picture(self, name: &str, width: i32, height: i32, pixels: &[u8]) -> Self {
        let mut payload = width.to_le_bytes().to_vec();
        payload.extend_from_slice(&height.to_le_bytes());
        payload.extend_from_slice(pixels);
        self.lump(name, LumpType::TYP_QPIC, &payload)
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut data = vec![0u8; 12];
        let mut records = Vec::with_capacity(self.entries.len() * RawLumpInfo::SIZE);

        for entry in &self.entries {
            let filepos = data.len() as i32;
            let size = entry.payload.len() as i32;
            data.extend_from_slice(&entry.payload);

            records.extend_from_slice(&filepos.to_le_bytes());
            records.extend_from_slice(&size.to_le_bytes());
            records.extend_from_slice(&size.to_le_bytes());
            records.extend_from_slice(&[entry.lump_type, 0, 0, 0]);
            records.extend_from_slice(&entry.name);
        }

        let infotableofs = data.len() as i32;
        data.extend_from_slice(&records);

        data[0..4].copy_from_slice(&self.magic);
        data[4..8].copy_from_slice(&(self.entries.len() as i32).to_le_bytes());
        data[8..12].copy_from_slice(&infotableofs.to_le_bytes());
        data
    }
}
