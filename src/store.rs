//! Persisted user state: favorites and recently played
//!
//! The store owns both collections and their backing directory. State is
//! loaded once when the store opens and written through on every
//! mutation, so a mutation's effect is visible to any later read and to
//! any later run. Missing or unparsable state files load as empty; only
//! write failures surface as errors.

use crate::catalog::Movie;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FAVORITES_FILE: &str = "favorites.json";
const RECENTLY_PLAYED_FILE: &str = "recently_played.json";

/// Maximum number of entries kept in the recently-played list.
const RECENTLY_PLAYED_LIMIT: usize = 5;

/// Errors that can occur while persisting user state
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to determine data directory location
    #[error("Failed to determine data directory location")]
    DataDirectoryNotFound,

    /// Failed to create or access the data directory
    #[error("Failed to create data directory at {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a state file
    #[error("Failed to write state file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize state for storage
    #[error("Failed to serialize state: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Persisted per-user state: the favorites set and the recently-played
/// list, both keyed by movie file id.
pub struct UserStateStore {
    dir: PathBuf,
    favorites: Vec<String>,
    recently_played: Vec<String>,
}

impl UserStateStore {
    /// Opens the store in the system's standard data directory.
    pub fn open() -> Result<Self, StoreError> {
        let proj_dirs = crate::project_dirs().ok_or(StoreError::DataDirectoryNotFound)?;
        Self::open_at(proj_dirs.data_dir())
    }

    /// Opens the store in an explicit directory.
    pub fn open_at(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir).map_err(|e| StoreError::DirectoryCreationFailed {
            path: dir.clone(),
            source: e,
        })?;

        let favorites = load_ids(&dir.join(FAVORITES_FILE));
        let recently_played = load_ids(&dir.join(RECENTLY_PLAYED_FILE));

        Ok(Self {
            dir,
            favorites,
            recently_played,
        })
    }

    /// Toggles the favorite state of an id and persists the result.
    ///
    /// Returns whether the id is a favorite after the call.
    pub fn toggle_favorite(&mut self, file_id: &str) -> Result<bool, StoreError> {
        match self.favorites.iter().position(|id| id == file_id) {
            Some(index) => {
                self.favorites.remove(index);
            }
            None => self.favorites.push(file_id.to_string()),
        }
        self.persist(FAVORITES_FILE, &self.favorites)?;
        Ok(self.is_favorite(file_id))
    }

    pub fn is_favorite(&self, file_id: &str) -> bool {
        self.favorites.iter().any(|id| id == file_id)
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Records a play: the id moves to the front of the recently-played
    /// list (never duplicated) and the list is truncated to its limit.
    pub fn record_play(&mut self, file_id: &str) -> Result<(), StoreError> {
        self.recently_played.retain(|id| id != file_id);
        self.recently_played.insert(0, file_id.to_string());
        self.recently_played.truncate(RECENTLY_PLAYED_LIMIT);
        self.persist(RECENTLY_PLAYED_FILE, &self.recently_played)
    }

    /// Recently-played ids, most recent first.
    pub fn recently_played(&self) -> &[String] {
        &self.recently_played
    }

    fn persist(&self, file: &str, ids: &[String]) -> Result<(), StoreError> {
        let path = self.dir.join(file);
        let content = serde_json::to_string(ids)?;
        fs::write(&path, content).map_err(|e| StoreError::WriteFailed { path, source: e })
    }
}

/// Loads an id array, treating absent or corrupt files as "no prior
/// state".
fn load_ids(path: &Path) -> Vec<String> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Favorite movies in catalog order.
pub fn resolve_favorites<'a>(store: &UserStateStore, movies: &'a [Movie]) -> Vec<&'a Movie> {
    movies
        .iter()
        .filter(|movie| store.is_favorite(&movie.file_id))
        .collect()
}

/// Recently-played movies in stored order, most recent first.
///
/// Ids with no matching movie in the current catalog are skipped from
/// the view but deliberately kept in storage: a later catalog load may
/// resolve them again.
pub fn resolve_recently_played<'a>(store: &UserStateStore, movies: &'a [Movie]) -> Vec<&'a Movie> {
    store
        .recently_played()
        .iter()
        .filter_map(|id| movies.iter().find(|movie| &movie.file_id == id))
        .collect()
}
