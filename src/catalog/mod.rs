/// Data structures and traits for the movie and web-series catalog.
///
/// This module provides the in-memory catalog model (movies, series,
/// seasons, episodes), the raw row types served by the data source, and
/// the ingestion transforms that shape one into the other.
mod ingest;
mod opensheet;
mod rows;
mod snapshot_source;

pub use ingest::{PLACEHOLDER_POSTER, ingest_movies, ingest_series};
pub use opensheet::OpensheetSource;
pub use rows::{EpisodeRow, MovieRow};
pub use snapshot_source::SnapshotSource;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while fetching catalog rows.
///
/// Each catalog side (movies, web series) fails independently; an error
/// here is scoped to the fetch that produced it.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Request to the data source failed
    #[error("Request failed: {0}")]
    Request(String),

    /// The data source answered with a non-success status
    #[error("Data source returned HTTP {status}")]
    Http { status: u16 },

    /// Failed to parse the data source's JSON response
    #[error("Failed to parse data source response: {0}")]
    Parse(String),
}

/// A single movie in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Display title
    pub title: String,
    /// Description, empty when the source row carried none
    pub description: String,
    /// Genre tags in display order (first tag is the primary one)
    pub genres: Vec<String>,
    /// Language tags in display order
    pub languages: Vec<String>,
    /// Absolute poster URL, or the placeholder when absent/invalid
    pub poster_url: String,
    /// Identifier used for favorites, recently-played and playback URLs
    pub file_id: String,
}

/// A web series with its seasons, grouped from flat episode rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Display title; also the grouping key for episode rows
    pub title: String,
    /// Description taken from the first row seen for this series
    pub description: String,
    /// Genre tags in display order
    pub genres: Vec<String>,
    /// Language tags in display order
    pub languages: Vec<String>,
    /// Absolute poster URL, or the placeholder when absent/invalid
    pub poster_url: String,
    /// Seasons sorted ascending by season number
    pub seasons: Vec<Season>,
}

/// One season of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    /// The season number as served by the source
    pub number: SeasonNumber,
    /// Episodes in source row order
    pub episodes: Vec<Episode>,
}

/// One episode of a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode title
    pub title: String,
    /// Identifier used to build playback URLs
    pub file_id: String,
}

/// A season number as served by the spreadsheet.
///
/// The source serves every field as a string, so this keeps the raw
/// token as the grouping key and orders numerically where possible:
/// tokens that parse as integers sort numerically and come first,
/// everything else falls back to lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonNumber(String);

impl SeasonNumber {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn as_int(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for SeasonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for SeasonNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_int(), other.as_int()) {
            // Tie-break on the raw token so the order stays total
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for SeasonNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Trait for sources that can fetch raw catalog rows.
///
/// Implementors retrieve the two row arrays the catalog is built from.
/// The two fetches are independent: callers must be able to ingest one
/// catalog side even when the other fails.
pub trait CatalogSource {
    /// Fetches the raw movie rows.
    fn fetch_movie_rows(&self) -> Result<Vec<MovieRow>, SourceError>;

    /// Fetches the raw web-series episode rows.
    fn fetch_episode_rows(&self) -> Result<Vec<EpisodeRow>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_numbers_sort_numerically() {
        let mut numbers = vec![
            SeasonNumber::new("10"),
            SeasonNumber::new("2"),
            SeasonNumber::new("1"),
        ];
        numbers.sort();
        assert_eq!(
            numbers,
            vec![
                SeasonNumber::new("1"),
                SeasonNumber::new("2"),
                SeasonNumber::new("10"),
            ]
        );
    }

    #[test]
    fn non_numeric_season_numbers_sort_after_numeric_ones() {
        let mut numbers = vec![
            SeasonNumber::new("Specials"),
            SeasonNumber::new("3"),
            SeasonNumber::new("Extras"),
        ];
        numbers.sort();
        assert_eq!(
            numbers,
            vec![
                SeasonNumber::new("3"),
                SeasonNumber::new("Extras"),
                SeasonNumber::new("Specials"),
            ]
        );
    }

    #[test]
    fn season_number_ordering_tolerates_whitespace() {
        assert!(SeasonNumber::new(" 2") < SeasonNumber::new("10"));
    }
}
