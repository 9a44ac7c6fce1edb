//! Error types for the WAD2 crate.

use thiserror::Error;

use crate::loader::LoadError;

/// Errors that can occur when loading a WAD2 archive.
///
/// Every variant is fatal for the load that produced it: no partially
/// normalized archive is ever handed out.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] wad2_common::Error),

    /// The archive could not be found or read.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The buffer cannot even hold a header.
    #[error("wad file {archive} is too short for a header ({len} bytes)")]
    TruncatedHeader { archive: String, len: usize },

    /// The first four bytes are not `WAD2`.
    #[error("wad file {archive} doesn't have WAD2 id (found {actual:?})")]
    InvalidMagic { archive: String, actual: [u8; 4] },

    /// A count, offset or size read from the archive is negative.
    #[error("{field} is negative: {value}")]
    NegativeField { field: &'static str, value: i32 },

    /// The lump directory does not fit inside the buffer.
    #[error("directory of {count} lumps at offset {offset} runs past the end of a {available}-byte buffer")]
    DirectoryOutOfBounds {
        offset: usize,
        count: usize,
        available: usize,
    },

    /// A lump's payload does not fit inside the buffer.
    #[error("lump {name} payload {filepos}+{len} runs past the end of a {available}-byte buffer")]
    LumpOutOfBounds {
        name: String,
        filepos: u32,
        len: u32,
        available: usize,
    },

    /// A picture header or its pixels do not fit inside the buffer.
    #[error("picture {name} at {filepos} needs {needed} bytes but only {available} are available")]
    PictureOutOfBounds {
        name: String,
        filepos: u32,
        needed: usize,
        available: usize,
    },

    /// A picture declares a negative width or height.
    #[error("picture {name} has negative dimensions {width}x{height}")]
    NegativeDimensions {
        name: String,
        width: i32,
        height: i32,
    },

    /// A picture lump is stored compressed and cannot be interpreted.
    #[error("picture {name} uses unsupported compression {method}")]
    CompressedPicture { name: String, method: u8 },

    /// The lump is not a picture.
    #[error("lump {0} is not a picture")]
    NotAPicture(String),
}

/// Result type for WAD2 operations.
pub type Result<T> = std::result::Result<T, Error>;
