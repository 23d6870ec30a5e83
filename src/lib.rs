//! DriveFlix - Browse a spreadsheet-backed movie and web-series catalog
//!
//! This library provides the core functionality for loading the catalog
//! from its spreadsheet endpoints, searching and filtering it, and
//! keeping per-user state (favorites, recently played) on disk.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod playback;
pub mod snapshot;
pub mod store;

use catalog::{CatalogSource, Episode, Movie, Series, ingest_movies, ingest_series};

// Re-export error types
pub use catalog::SourceError;
pub use snapshot::SnapshotError;
pub use store::StoreError;

use thiserror::Error;

/// Progress event emitted while loading the catalog
///
/// These events allow library users to track progress and provide
/// feedback while the two catalog sides load.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Fetching the movie rows
    FetchingMovies,

    /// Movies fetched and ingested
    MoviesLoaded { count: usize },

    /// Fetching the web-series episode rows
    FetchingSeries,

    /// Series fetched and grouped
    SeriesLoaded { count: usize },
}

/// Top-level error type for DriveFlix operations
#[derive(Debug, Error)]
pub enum DriveflixError {
    /// Error while fetching catalog rows
    #[error("Catalog source error: {0}")]
    Source(#[from] SourceError),

    /// Error while persisting user state
    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    /// Error while accessing snapshot storage
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// One load of the catalog.
///
/// The two sides load independently: a failure on one side never
/// discards the other. Each side is either the ingested collection or
/// the error that prevented its load.
#[derive(Debug)]
pub struct Catalog {
    pub movies: Result<Vec<Movie>, SourceError>,
    pub series: Result<Vec<Series>, SourceError>,
}

impl Catalog {
    /// The loaded movies, or an empty slice when that side failed.
    pub fn movies(&self) -> &[Movie] {
        self.movies.as_deref().unwrap_or_default()
    }

    /// The loaded series, or an empty slice when that side failed.
    pub fn series(&self) -> &[Series] {
        self.series.as_deref().unwrap_or_default()
    }

    /// Looks up a movie by file id.
    pub fn find_movie(&self, file_id: &str) -> Option<&Movie> {
        self.movies().iter().find(|movie| movie.file_id == file_id)
    }

    /// Looks up an episode by file id across all series and seasons.
    pub fn find_episode(&self, file_id: &str) -> Option<&Episode> {
        self.series()
            .iter()
            .flat_map(|series| series.seasons.iter())
            .flat_map(|season| season.episodes.iter())
            .find(|episode| episode.file_id == file_id)
    }

    /// The newest movies: the tail of the list in source row order.
    pub fn latest_movies(&self, count: usize) -> &[Movie] {
        let movies = self.movies();
        &movies[movies.len().saturating_sub(count)..]
    }
}

/// Loads both catalog sides from the given source.
///
/// The movie and series fetches are independent; one side failing never
/// blocks or fails the other. Progress events are emitted through the
/// provided callback, allowing library users to display status or
/// remain silent.
///
/// # Examples
///
/// ```no_run
/// use driveflix::catalog::{OpensheetSource, SnapshotSource};
/// use driveflix::config::Config;
/// use driveflix::{ProgressEvent, load_catalog};
///
/// let config = Config::load();
/// let source = SnapshotSource::open(OpensheetSource::new(&config)).unwrap();
///
/// let catalog = load_catalog(&source, |event| {
///     if let ProgressEvent::MoviesLoaded { count } = event {
///         println!("{count} movie(s) loaded");
///     }
/// });
///
/// for series in catalog.series() {
///     println!("{} ({} seasons)", series.title, series.seasons.len());
/// }
/// ```
pub fn load_catalog<S, F>(source: &S, mut progress_callback: F) -> Catalog
where
    S: CatalogSource,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::FetchingMovies);
    let movies = source.fetch_movie_rows().map(ingest_movies);
    if let Ok(movies) = &movies {
        progress_callback(ProgressEvent::MoviesLoaded {
            count: movies.len(),
        });
    }

    progress_callback(ProgressEvent::FetchingSeries);
    let series = source.fetch_episode_rows().map(ingest_series);
    if let Ok(series) = &series {
        progress_callback(ProgressEvent::SeriesLoaded {
            count: series.len(),
        });
    }

    Catalog { movies, series }
}

/// Standard per-user directories for this application.
pub(crate) fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "driveflix", "driveflix")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EpisodeRow, MovieRow};

    struct FakeSource {
        movies: Result<Vec<MovieRow>, ()>,
        episodes: Result<Vec<EpisodeRow>, ()>,
    }

    impl CatalogSource for FakeSource {
        fn fetch_movie_rows(&self) -> Result<Vec<MovieRow>, SourceError> {
            self.movies
                .clone()
                .map_err(|()| SourceError::Http { status: 500 })
        }

        fn fetch_episode_rows(&self) -> Result<Vec<EpisodeRow>, SourceError> {
            self.episodes
                .clone()
                .map_err(|()| SourceError::Http { status: 500 })
        }
    }

    fn movie_row(title: &str, file_id: &str) -> MovieRow {
        MovieRow {
            title: Some(title.to_string()),
            description: None,
            poster: None,
            genre: None,
            language: None,
            file_id: Some(file_id.to_string()),
        }
    }

    fn episode_row(title: &str, season: &str, episode_title: &str, file_id: &str) -> EpisodeRow {
        EpisodeRow {
            title: Some(title.to_string()),
            description: None,
            poster: None,
            genre: None,
            language: None,
            season: Some(season.to_string()),
            episode_title: Some(episode_title.to_string()),
            file_id: Some(file_id.to_string()),
        }
    }

    #[test]
    fn one_side_failing_does_not_fail_the_other() {
        let source = FakeSource {
            movies: Err(()),
            episodes: Ok(vec![episode_row("Show", "1", "Pilot", "e1")]),
        };

        let catalog = load_catalog(&source, |_| {});

        assert!(catalog.movies.is_err());
        assert_eq!(catalog.series().len(), 1);
        assert!(catalog.movies().is_empty());
    }

    #[test]
    fn progress_events_report_loaded_counts() {
        let source = FakeSource {
            movies: Ok(vec![movie_row("A", "f1"), movie_row("B", "f2")]),
            episodes: Err(()),
        };

        let mut events = Vec::new();
        load_catalog(&source, |event| events.push(event));

        assert!(matches!(
            events.as_slice(),
            [
                ProgressEvent::FetchingMovies,
                ProgressEvent::MoviesLoaded { count: 2 },
                ProgressEvent::FetchingSeries,
            ]
        ));
    }

    #[test]
    fn find_movie_and_episode_look_up_by_file_id() {
        let source = FakeSource {
            movies: Ok(vec![movie_row("A", "f1")]),
            episodes: Ok(vec![episode_row("Show", "1", "Pilot", "e1")]),
        };

        let catalog = load_catalog(&source, |_| {});

        assert_eq!(catalog.find_movie("f1").map(|m| m.title.as_str()), Some("A"));
        assert!(catalog.find_movie("e1").is_none());
        assert_eq!(
            catalog.find_episode("e1").map(|e| e.title.as_str()),
            Some("Pilot")
        );
    }

    #[test]
    fn latest_movies_returns_the_catalog_tail() {
        let source = FakeSource {
            movies: Ok(vec![
                movie_row("A", "f1"),
                movie_row("B", "f2"),
                movie_row("C", "f3"),
                movie_row("D", "f4"),
            ]),
            episodes: Ok(Vec::new()),
        };

        let catalog = load_catalog(&source, |_| {});

        let titles: Vec<&str> = catalog
            .latest_movies(3)
            .iter()
            .map(|movie| movie.title.as_str())
            .collect();
        assert_eq!(titles, vec!["B", "C", "D"]);

        // Asking for more than exists yields everything
        assert_eq!(catalog.latest_movies(10).len(), 4);
    }
}
