//! Snapshot storage module
//!
//! This module provides persistent snapshot storage using the system's
//! standard cache directory. Data is serialized to JSON format for
//! storage, one file per snapshot.

use serde::{Deserialize, Serialize};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to determine cache directory location
    #[error("Failed to determine cache directory location")]
    CacheDirectoryNotFound,

    /// Failed to create or access cache directory
    #[error("Failed to create cache directory at {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read snapshot data
    #[error("Failed to read snapshot file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write snapshot data
    #[error("Failed to write snapshot file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to deserialize snapshot data
    #[error("Failed to deserialize snapshot file {path}: {source}")]
    DeserializationFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize data for storage
    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// A single persisted snapshot of serializable data.
///
/// Each store owns one JSON file named after the snapshot. `name` is
/// used as the file stem verbatim, so callers pick plain identifiers
/// like `"movies"`.
pub struct SnapshotStore<T> {
    /// The file this snapshot is stored in
    path: PathBuf,
    /// Phantom data for the generic type
    _phantom: PhantomData<T>,
}

impl<T> SnapshotStore<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    /// Opens or creates a snapshot store with the given name in the
    /// system's standard cache directory.
    pub fn open(name: &str) -> Result<Self, SnapshotError> {
        let proj_dirs = crate::project_dirs().ok_or(SnapshotError::CacheDirectoryNotFound)?;
        Self::open_in(proj_dirs.cache_dir(), name)
    }

    /// Opens or creates a snapshot store in an explicit directory.
    pub fn open_in(dir: impl AsRef<Path>, name: &str) -> Result<Self, SnapshotError> {
        let dir = dir.as_ref();

        fs::create_dir_all(dir).map_err(|e| SnapshotError::DirectoryCreationFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            path: dir.join(format!("{name}.json")),
            _phantom: PhantomData,
        })
    }

    /// Loads the snapshot, or `None` if none has been stored yet.
    ///
    /// A snapshot that exists but cannot be read or deserialized is an
    /// error; callers decide whether that is fatal.
    pub fn load(&self) -> Result<Option<T>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| SnapshotError::ReadFailed {
            path: self.path.clone(),
            source: e,
        })?;

        let data =
            serde_json::from_str(&content).map_err(|e| SnapshotError::DeserializationFailed {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(Some(data))
    }

    /// Stores data, replacing any previous snapshot.
    pub fn store(&self, data: &T) -> Result<(), SnapshotError> {
        let content = serde_json::to_string(data)?;

        fs::write(&self.path, content).map_err(|e| SnapshotError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}
