//! Snapshot-backed catalog source
//!
//! This module provides a wrapper for catalog sources that records the
//! last successfully fetched rows and serves them when the network is
//! unavailable, keeping the catalog browsable offline.

use super::rows::{EpisodeRow, MovieRow};
use super::{CatalogSource, SourceError};
use crate::snapshot::{SnapshotError, SnapshotStore};

/// A catalog source wrapper with offline fallback.
///
/// Fetches are network-first: a successful fetch overwrites the stored
/// snapshot (best effort, a failed write never fails the fetch), and a
/// failed fetch falls back to the snapshot if one exists. When neither
/// is available the original fetch error surfaces. Each catalog side
/// falls back independently.
pub struct SnapshotSource<S>
where
    S: CatalogSource,
{
    /// The underlying catalog source
    source: S,
    /// Snapshot of the last good movie rows
    movies: SnapshotStore<Vec<MovieRow>>,
    /// Snapshot of the last good episode rows
    episodes: SnapshotStore<Vec<EpisodeRow>>,
}

impl<S> SnapshotSource<S>
where
    S: CatalogSource,
{
    /// Wraps the given source with snapshots in the platform cache
    /// directory.
    pub fn open(source: S) -> Result<Self, SnapshotError> {
        Ok(Self {
            source,
            movies: SnapshotStore::open("movies")?,
            episodes: SnapshotStore::open("episodes")?,
        })
    }

    /// Wraps the given source with explicitly provided snapshot stores.
    pub fn with_stores(
        source: S,
        movies: SnapshotStore<Vec<MovieRow>>,
        episodes: SnapshotStore<Vec<EpisodeRow>>,
    ) -> Self {
        Self {
            source,
            movies,
            episodes,
        }
    }
}

impl<S> CatalogSource for SnapshotSource<S>
where
    S: CatalogSource,
{
    fn fetch_movie_rows(&self) -> Result<Vec<MovieRow>, SourceError> {
        match self.source.fetch_movie_rows() {
            Ok(rows) => {
                let _ = self.movies.store(&rows);
                Ok(rows)
            }
            Err(err) => match self.movies.load() {
                Ok(Some(rows)) => Ok(rows),
                // No usable snapshot: surface the fetch error
                _ => Err(err),
            },
        }
    }

    fn fetch_episode_rows(&self) -> Result<Vec<EpisodeRow>, SourceError> {
        match self.source.fetch_episode_rows() {
            Ok(rows) => {
                let _ = self.episodes.store(&rows);
                Ok(rows)
            }
            Err(err) => match self.episodes.load() {
                Ok(Some(rows)) => Ok(rows),
                _ => Err(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSource {
        movies: Option<Vec<MovieRow>>,
        episodes: Option<Vec<EpisodeRow>>,
    }

    impl FakeSource {
        fn failing() -> Self {
            Self {
                movies: None,
                episodes: None,
            }
        }

        fn serving(movies: Vec<MovieRow>) -> Self {
            Self {
                movies: Some(movies),
                episodes: Some(Vec::new()),
            }
        }
    }

    impl CatalogSource for FakeSource {
        fn fetch_movie_rows(&self) -> Result<Vec<MovieRow>, SourceError> {
            self.movies
                .clone()
                .ok_or_else(|| SourceError::Request("connection refused".to_string()))
        }

        fn fetch_episode_rows(&self) -> Result<Vec<EpisodeRow>, SourceError> {
            self.episodes
                .clone()
                .ok_or_else(|| SourceError::Request("connection refused".to_string()))
        }
    }

    fn movie_row(title: &str) -> MovieRow {
        MovieRow {
            title: Some(title.to_string()),
            description: None,
            poster: None,
            genre: None,
            language: None,
            file_id: Some("f1".to_string()),
        }
    }

    fn stores_in(
        dir: &std::path::Path,
    ) -> (SnapshotStore<Vec<MovieRow>>, SnapshotStore<Vec<EpisodeRow>>) {
        (
            SnapshotStore::open_in(dir, "movies").unwrap(),
            SnapshotStore::open_in(dir, "episodes").unwrap(),
        )
    }

    #[test]
    fn successful_fetch_records_a_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let (movies, episodes) = stores_in(dir.path());
        let source = SnapshotSource::with_stores(
            FakeSource::serving(vec![movie_row("Stored")]),
            movies,
            episodes,
        );

        source.fetch_movie_rows().unwrap();

        let (movies, episodes) = stores_in(dir.path());
        let offline = SnapshotSource::with_stores(FakeSource::failing(), movies, episodes);
        let rows = offline.fetch_movie_rows().unwrap();
        assert_eq!(rows[0].title.as_deref(), Some("Stored"));
    }

    #[test]
    fn failed_fetch_without_snapshot_surfaces_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let (movies, episodes) = stores_in(dir.path());
        let source = SnapshotSource::with_stores(FakeSource::failing(), movies, episodes);

        assert!(source.fetch_movie_rows().is_err());
    }

    #[test]
    fn catalog_sides_fall_back_independently() {
        let dir = tempfile::tempdir().unwrap();
        let (movies, episodes) = stores_in(dir.path());
        let source = SnapshotSource::with_stores(
            FakeSource::serving(vec![movie_row("Stored")]),
            movies,
            episodes,
        );
        source.fetch_movie_rows().unwrap();
        // The episode side never fetched successfully

        let (movies, episodes) = stores_in(dir.path());
        let offline = SnapshotSource::with_stores(FakeSource::failing(), movies, episodes);
        assert!(offline.fetch_movie_rows().is_ok());
        assert!(offline.fetch_episode_rows().is_err());
    }

    #[test]
    fn later_fetch_overwrites_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let (movies, episodes) = stores_in(dir.path());
        let source =
            SnapshotSource::with_stores(FakeSource::serving(vec![movie_row("Old")]), movies, episodes);
        source.fetch_movie_rows().unwrap();

        let (movies, episodes) = stores_in(dir.path());
        let source =
            SnapshotSource::with_stores(FakeSource::serving(vec![movie_row("New")]), movies, episodes);
        source.fetch_movie_rows().unwrap();

        let (movies, episodes) = stores_in(dir.path());
        let offline = SnapshotSource::with_stores(FakeSource::failing(), movies, episodes);
        let rows = offline.fetch_movie_rows().unwrap();
        assert_eq!(rows[0].title.as_deref(), Some("New"));
    }
}
