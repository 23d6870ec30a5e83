/// Opensheet catalog source implementation.
use super::rows::{EpisodeRow, MovieRow};
use super::{CatalogSource, SourceError};
use crate::config::Config;

/// Catalog source backed by two opensheet JSON endpoints, one serving
/// movie rows and one serving web-series episode rows.
///
/// Requests resolve or fail on the transport's own schedule; no timeout
/// or retry is layered on top.
pub struct OpensheetSource {
    client: reqwest::blocking::Client,
    movies_url: String,
    series_url: String,
}

impl OpensheetSource {
    /// Creates a source pointing at the configured endpoints.
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            movies_url: config.movies_url.clone(),
            series_url: config.series_url.clone(),
        }
    }

    fn fetch_rows<T>(&self, url: &str) -> Result<Vec<T>, SourceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SourceError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Http {
                status: response.status().as_u16(),
            });
        }

        response.json().map_err(|e| SourceError::Parse(e.to_string()))
    }
}

impl CatalogSource for OpensheetSource {
    fn fetch_movie_rows(&self) -> Result<Vec<MovieRow>, SourceError> {
        self.fetch_rows(&self.movies_url)
    }

    fn fetch_episode_rows(&self) -> Result<Vec<EpisodeRow>, SourceError> {
        self.fetch_rows(&self.series_url)
    }
}
