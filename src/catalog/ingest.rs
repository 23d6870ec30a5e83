/// Pure transforms from raw rows into the catalog model.
///
/// Ingestion never fails: rows missing their identity fields are dropped
/// whole, and malformed optional fields fall back to defaults. Fetch
/// errors are the source's concern, not this module's.
use super::rows::{EpisodeRow, MovieRow};
use super::{Episode, Movie, Season, SeasonNumber, Series};
use std::collections::HashMap;
use url::Url;

/// Poster substituted when a row carries no poster or one that is not an
/// absolute URL.
pub const PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/300x450/1e1e1e/ffffff?text=No+Poster";

/// Shapes raw movie rows into movies.
///
/// A row without a title or file id is dropped whole; it never produces
/// a partial entity. All other fields are normalized: genre and language
/// lists are split on commas, posters are validated against the
/// placeholder fallback, and a missing description becomes empty.
pub fn ingest_movies(rows: Vec<MovieRow>) -> Vec<Movie> {
    rows.into_iter()
        .filter_map(|row| {
            let title = present(row.title)?;
            let file_id = present(row.file_id)?;

            Some(Movie {
                title,
                description: row.description.unwrap_or_default(),
                genres: split_list(row.genre.as_deref()),
                languages: split_list(row.language.as_deref()),
                poster_url: validate_poster(row.poster),
                file_id,
            })
        })
        .collect()
}

/// Groups flat episode rows into series with sorted seasons.
///
/// Rows are grouped by exact title equality; the first row seen for a
/// series wins its description, poster, genres and languages. Within a
/// series, seasons are keyed by the raw season token and episodes keep
/// arrival order (duplicates included). Rows may arrive in any order:
/// only the final season sequence is sorted, ascending by season number.
///
/// A row missing its title, season, episode title or file id is dropped
/// whole.
pub fn ingest_series(rows: Vec<EpisodeRow>) -> Vec<Series> {
    // Explicit insertion-order map: series emit in first-seen order.
    let mut order: Vec<String> = Vec::new();
    let mut builders: HashMap<String, SeriesBuilder> = HashMap::new();

    for row in rows {
        let Some(title) = present(row.title) else {
            continue;
        };
        let Some(season) = present(row.season) else {
            continue;
        };
        let Some(episode_title) = present(row.episode_title) else {
            continue;
        };
        let Some(file_id) = present(row.file_id) else {
            continue;
        };

        let builder = builders.entry(title.clone()).or_insert_with(|| {
            order.push(title);
            SeriesBuilder {
                description: row.description.unwrap_or_default(),
                genres: split_list(row.genre.as_deref()),
                languages: split_list(row.language.as_deref()),
                poster_url: validate_poster(row.poster),
                seasons: Vec::new(),
            }
        });

        builder.push_episode(
            SeasonNumber::new(season),
            Episode {
                title: episode_title,
                file_id,
            },
        );
    }

    order
        .into_iter()
        .filter_map(|title| {
            builders
                .remove(&title)
                .map(|builder| builder.into_series(title))
        })
        .collect()
}

struct SeriesBuilder {
    description: String,
    genres: Vec<String>,
    languages: Vec<String>,
    poster_url: String,
    seasons: Vec<Season>,
}

impl SeriesBuilder {
    fn push_episode(&mut self, number: SeasonNumber, episode: Episode) {
        match self
            .seasons
            .iter_mut()
            .find(|season| season.number == number)
        {
            Some(season) => season.episodes.push(episode),
            None => self.seasons.push(Season {
                number,
                episodes: vec![episode],
            }),
        }
    }

    fn into_series(mut self, title: String) -> Series {
        // Stable sort: equal season tokens keep first-seen order
        self.seasons.sort_by(|a, b| a.number.cmp(&b.number));
        Series {
            title,
            description: self.description,
            genres: self.genres,
            languages: self.languages,
            poster_url: self.poster_url,
            seasons: self.seasons,
        }
    }
}

/// A field counts as present only when it is non-empty.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Splits a comma-separated source string into trimmed, non-empty tokens.
fn split_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(value) => value
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Accepts a poster only if it parses as an absolute URL.
fn validate_poster(raw: Option<String>) -> String {
    raw.filter(|poster| Url::parse(poster).is_ok())
        .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string())
}
