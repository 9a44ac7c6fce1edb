//! WAD2 archive loader.
//!
//! WAD2 is the lump archive Quake ships its 2D graphics in (`gfx.wad`). An
//! archive is a 12-byte header, the lump payloads, and a directory of 32-byte
//! records, all little-endian.
//!
//! Loading an archive:
//!
//! - validates the `WAD2` signature
//! - decodes every directory record into host byte order
//! - canonicalizes each lump name in place (truncate at the first NUL, zero
//!   the rest of the field)
//! - checks every lump payload, and every `qpic` header and pixel block,
//!   against the buffer
//!
//! Any violation fails the whole load.
//!
//! # Example
//!
//! ```no_run
//! use wad2_wad::{FsLoader, WadArchive, DEFAULT_WAD_NAME};
//!
//! let archive = WadArchive::load(&FsLoader::new("/opt/quake"), DEFAULT_WAD_NAME)?;
//!
//! for lump in archive.iter() {
//!     println!("{:<16} {:>8} {}", lump.name, lump.size, lump.lump_type.label());
//! }
//!
//! for (lump, pic) in archive.pictures() {
//!     println!("{}: {}x{}", lump.name, pic.width, pic.height);
//! }
//! # Ok::<(), wad2_wad::Error>(())
//! ```

mod archive;
mod directory;
mod error;
mod header;
mod loader;
mod lump;
mod name;
mod pic;
mod slot;

#[cfg(test)]
mod testing;

pub use archive::WadArchive;
pub use directory::normalize;
pub use error::{Error, Result};
pub use header::WadHeader;
pub use loader::{FsLoader, LoadError, Loader, MemoryLoader};
pub use lump::{Compression, LumpInfo, LumpType, RawLumpInfo};
pub use name::{canonicalize_name, LumpName, NAME_LEN};
pub use pic::{Picture, RawPicHeader};
pub use slot::WadSlot;

/// WAD2 file magic bytes.
pub const WAD2_MAGIC: [u8; 4] = *b"WAD2";

/// Archive the game loads its 2D graphics from.
pub const DEFAULT_WAD_NAME: &str = "gfx.wad";

/// Game directory searched ahead of the base directory.
pub const DEFAULT_GAME_DIR: &str = "id1";
