//! Reloadable archive holder.

use tracing::debug;

use crate::archive::WadArchive;
use crate::loader::Loader;
use crate::Result;

/// Holds at most one loaded archive.
///
/// Loading releases whatever archive is currently held before the new one
/// is read, so at no point are two archive buffers alive in the slot, and a
/// failed load leaves the slot empty.
#[derive(Debug, Default)]
pub struct WadSlot {
    current: Option<WadArchive>,
}

impl WadSlot {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Release the current archive, then load `name` and install it.
    pub fn load<L: Loader + ?Sized>(&mut self, loader: &L, name: &str) -> Result<&WadArchive> {
        self.release();
        let archive = WadArchive::load(loader, name)?;
        Ok(self.current.insert(archive))
    }

    /// Drop the current archive, if any.
    pub fn release(&mut self) {
        if let Some(old) = self.current.take() {
            debug!(archive = old.name(), "releasing archive");
        }
    }

    /// Take ownership of the current archive, leaving the slot empty.
    pub fn take(&mut self) -> Option<WadArchive> {
        self.current.take()
    }

    #[inline]
    pub fn archive(&self) -> Option<&WadArchive> {
        self.current.as_ref()
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }
}
