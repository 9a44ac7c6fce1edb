//! WAD2 archive.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use wad2_common::region;

use crate::directory;
use crate::header::WadHeader;
use crate::loader::{LoadError, Loader};
use crate::lump::LumpInfo;
use crate::pic::Picture;
use crate::{Error, Result};

/// A loaded and normalized WAD2 archive.
///
/// Owns the complete file contents. The directory and every picture have
/// been validated against the buffer by the time a `WadArchive` exists, and
/// all views it hands out borrow from it.
pub struct WadArchive {
    /// Complete file contents, names canonicalized in place
    data: Vec<u8>,
    /// Archive name used in diagnostics
    name: String,
    header: WadHeader,
    lumps: Vec<LumpInfo>,
}

impl WadArchive {
    /// Validate and normalize an archive already held in memory.
    pub fn from_bytes(name: impl Into<String>, mut data: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let header = WadHeader::parse(&data, &name)?;
        let lumps = directory::normalize(&mut data, &header)?;

        debug!(archive = %name, bytes = data.len(), lumps = lumps.len(), "archive ready");

        Ok(Self {
            data,
            name,
            header,
            lumps,
        })
    }

    /// Read and normalize an archive file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {
                name: path.display().to_string(),
                base_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            },
            _ => LoadError::Unreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Self::from_bytes(name, data)
    }

    /// Resolve `name` through a loader and normalize the result.
    pub fn load<L: Loader + ?Sized>(loader: &L, name: &str) -> Result<Self> {
        let data = loader.load(name)?;
        Self::from_bytes(name, data)
    }

    /// Get the archive name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn header(&self) -> &WadHeader {
        &self.header
    }

    /// The normalized directory, in file order.
    #[inline]
    pub fn lumps(&self) -> &[LumpInfo] {
        &self.lumps
    }

    /// Get the number of lumps.
    #[inline]
    pub fn lump_count(&self) -> usize {
        self.lumps.len()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, LumpInfo> {
        self.lumps.iter()
    }

    /// Get a lump by directory index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&LumpInfo> {
        self.lumps.get(index)
    }

    /// Raw payload bytes of a lump (`disksize` bytes at `filepos`).
    pub fn lump_data(&self, lump: &LumpInfo) -> Result<&[u8]> {
        region(&self.data, lump.filepos as usize, lump.disksize as usize).map_err(|_| {
            Error::LumpOutOfBounds {
                name: lump.name.to_string(),
                filepos: lump.filepos,
                len: lump.disksize,
                available: self.data.len(),
            }
        })
    }

    /// The picture stored in a `qpic` lump.
    pub fn picture(&self, lump: &LumpInfo) -> Result<Picture<'_>> {
        Picture::parse(&self.data, lump)
    }

    /// Every picture lump with its picture.
    pub fn pictures(&self) -> impl Iterator<Item = (&LumpInfo, Picture<'_>)> + '_ {
        self.lumps
            .iter()
            .filter(|lump| lump.is_picture())
            // every picture was validated when the archive was loaded
            .filter_map(move |lump| self.picture(lump).ok().map(|pic| (lump, pic)))
    }

    /// Run directory normalization again over the owned buffer.
    ///
    /// Normalization is idempotent, so this leaves both the buffer and the
    /// directory unchanged.
    pub fn normalize(&mut self) -> Result<()> {
        self.lumps = directory::normalize(&mut self.data, &self.header)?;
        Ok(())
    }

    /// The whole archive buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Give up the archive and return its buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl std::fmt::Debug for WadArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WadArchive")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .field("lumps", &self.lumps.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a WadArchive {
    type Item = &'a LumpInfo;
    type IntoIter = std::slice::Iter<'a, LumpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
