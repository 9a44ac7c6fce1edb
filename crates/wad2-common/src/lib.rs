//! Common utilities for wad2.
//!
//! This crate provides the low-level pieces the format crates build on:
//!
//! - [`BinaryReader`] - Bounds-checked cursor over a byte slice
//! - [`region`] / [`region_mut`] - Validated sub-slices for offsets read from a file
//! - [`endian`] - Archive (little-endian) to host byte-order conversion

mod error;
mod patch;
mod reader;

pub mod endian;

pub use error::{Error, Result};
pub use patch::{region, region_mut, span_end};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};
