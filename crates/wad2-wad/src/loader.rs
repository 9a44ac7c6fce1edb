//! Reading archives into memory.
//!
//! The loader is the seam between the archive and wherever its bytes live.
//! [`FsLoader`] searches a game installation on disk; [`MemoryLoader`] serves
//! buffers that are already in memory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::DEFAULT_GAME_DIR;

/// Why an archive could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No search directory contains the file.
    #[error(
        "couldn't load {name}: basedir is {}, check that it has a game subdirectory containing {name}",
        base_dir.display()
    )]
    NotFound { name: String, base_dir: PathBuf },

    /// The file exists but could not be read.
    #[error("couldn't read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Produces the full contents of a named archive as an owned buffer.
pub trait Loader {
    fn load(&self, name: &str) -> Result<Vec<u8>, LoadError>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> Result<Vec<u8>, LoadError>,
{
    fn load(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        self(name)
    }
}

/// Searches a base directory and its game subdirectories.
#[derive(Debug, Clone)]
pub struct FsLoader {
    base_dir: PathBuf,
    search_dirs: Vec<PathBuf>,
}

impl FsLoader {
    /// Search `<base_dir>/id1` first, then `base_dir` itself.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let search_dirs = vec![base_dir.join(DEFAULT_GAME_DIR), base_dir.clone()];
        Self {
            base_dir,
            search_dirs,
        }
    }

    /// Search `game` ahead of the directories already configured.
    pub fn with_game_dir<P: AsRef<Path>>(mut self, game: P) -> Self {
        let dir = self.base_dir.join(game);
        self.search_dirs.retain(|d| *d != dir);
        self.search_dirs.insert(0, dir);
        self
    }

    #[inline]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directories searched, highest priority first.
    #[inline]
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }
}

impl Loader for FsLoader {
    fn load(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        for dir in &self.search_dirs {
            let path = dir.join(name);
            match fs::read(&path) {
                Ok(data) => {
                    debug!(path = %path.display(), bytes = data.len(), "loaded archive");
                    return Ok(data);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(LoadError::Unreadable { path, source }),
            }
        }

        Err(LoadError::NotFound {
            name: name.to_string(),
            base_dir: self.base_dir.clone(),
        })
    }
}

/// Serves archives from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a named buffer.
    pub fn insert(&mut self, name: impl Into<String>, data: Vec<u8>) -> &mut Self {
        self.files.insert(name.into(), data);
        self
    }

    pub fn with(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.insert(name, data);
        self
    }
}

impl Loader for MemoryLoader {
    fn load(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                name: name.to_string(),
                base_dir: PathBuf::new(),
            })
    }
}
