//! Pure search and filter engine over the movie catalog.
//!
//! Filtering only covers movies; series browsing has no search or
//! filter. That mirrors the data source's shape and is a documented
//! limitation, not an omission.

use crate::catalog::Movie;
use std::collections::BTreeSet;

/// A filter query. The default query matches every movie.
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    /// Case-insensitive text matched against title or description
    pub text: String,
    /// Exact genre token a movie must carry, if selected
    pub genre: Option<String>,
    /// Exact language token a movie must carry, if selected
    pub language: Option<String>,
}

/// Filters movies by the query, preserving input order.
///
/// A movie passes only when all three predicates pass: the text matches
/// title or description (case-insensitive substring, empty text matches
/// everything), and the selected genre and language are each either
/// unselected or exactly present among the movie's tokens.
pub fn filter_movies<'a>(movies: &'a [Movie], query: &FilterQuery) -> Vec<&'a Movie> {
    let needle = query.text.to_lowercase();

    movies
        .iter()
        .filter(|movie| {
            matches_text(movie, &needle)
                && matches_selection(&movie.genres, query.genre.as_deref())
                && matches_selection(&movie.languages, query.language.as_deref())
        })
        .collect()
}

fn matches_text(movie: &Movie, needle: &str) -> bool {
    movie.title.to_lowercase().contains(needle)
        || movie.description.to_lowercase().contains(needle)
}

fn matches_selection(tokens: &[String], selected: Option<&str>) -> bool {
    match selected {
        None | Some("") => true,
        Some(value) => tokens.iter().any(|token| token == value),
    }
}

/// Distinct genre tokens across the catalog, sorted.
pub fn collect_genres(movies: &[Movie]) -> Vec<String> {
    collect_tokens(movies.iter().flat_map(|movie| movie.genres.iter()))
}

/// Distinct language tokens across the catalog, sorted.
pub fn collect_languages(movies: &[Movie]) -> Vec<String> {
    collect_tokens(movies.iter().flat_map(|movie| movie.languages.iter()))
}

fn collect_tokens<'a>(tokens: impl Iterator<Item = &'a String>) -> Vec<String> {
    let unique: BTreeSet<&String> = tokens.filter(|token| !token.is_empty()).collect();
    unique.into_iter().cloned().collect()
}
