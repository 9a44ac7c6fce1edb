//! wad2 - WAD2 archive loading library.
//!
//! This crate provides a unified interface to the wad2 crates.
//!
//! # Crates
//!
//! - [`wad2_common`] - Common utilities (bounds-checked reading, byte order)
//! - [`wad2_wad`] - WAD2 header, directory, names and pictures
//!
//! # Example
//!
//! ```no_run
//! use wad2::prelude::*;
//!
//! let mut slot = WadSlot::new();
//! let archive = slot.load(&FsLoader::new("."), DEFAULT_WAD_NAME)?;
//!
//! println!("{} lumps", archive.lump_count());
//! # Ok::<(), wad2::wad::Error>(())
//! ```

// Re-export all sub-crates
pub use wad2_common as common;
pub use wad2_wad as wad;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use wad2_common::BinaryReader;
    pub use wad2_wad::{
        Compression, FsLoader, Loader, LumpInfo, LumpName, LumpType, MemoryLoader, Picture,
        WadArchive, WadSlot, DEFAULT_GAME_DIR, DEFAULT_WAD_NAME,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
