//! Snapshot storage for the editor's source text
//!
//! A single slot holds the most recently edited source text across all
//! languages. It is read once when a session starts and written on every edit.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::debug;

/// Errors that occur while reading or writing the snapshot slot
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read snapshot at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write snapshot at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot store is unavailable")]
    Unavailable,
}

/// Single-slot store for the most recent source text
pub trait SnapshotStore: Send + Sync {
    /// Read the stored text; `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored text
    fn save(&self, text: &str) -> Result<(), StorageError>;
}

/// Snapshot slot backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                debug!(path = ?self.path, len = text.len(), "loaded snapshot");
                Ok(Some(text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, text: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        fs::write(&self.path, text).map_err(write_err)?;
        debug!(path = ?self.path, len = text.len(), "saved snapshot");
        Ok(())
    }
}

/// Process-local snapshot slot
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a snapshot
    pub fn with_snapshot(text: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(text.into())),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let slot = self.slot.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(slot.clone())
    }

    fn save(&self, text: &str) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().map_err(|_| StorageError::Unavailable)?;
        *slot = Some(text.to_owned());
        Ok(())
    }
}
