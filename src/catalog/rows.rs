/// Raw row types served by the spreadsheet endpoints.
///
/// These structures mirror the JSON arrays returned by the data source.
/// Field presence is not guaranteed, so everything is optional here;
/// ingestion decides what a complete row requires. Rows also serialize,
/// which is what the snapshot layer persists.
use serde::{Deserialize, Serialize};

/// One row from the movies endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRow {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    /// Comma-separated genre list
    #[serde(default)]
    pub genre: Option<String>,
    /// Comma-separated language list
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, rename = "fileId")]
    pub file_id: Option<String>,
}

/// One row from the web-series endpoint. Each row is a single episode;
/// series-level fields repeat on every row of the same series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRow {
    /// Series title; the grouping key
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Season token; the sheet serves strings but numbers are tolerated
    #[serde(default, deserialize_with = "season_token")]
    pub season: Option<String>,
    #[serde(default, rename = "episodeTitle")]
    pub episode_title: Option<String>,
    #[serde(default, rename = "fileId")]
    pub file_id: Option<String>,
}

/// Accepts the season field as either a JSON string or a JSON number;
/// anything else counts as absent.
fn season_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn movie_row_deserializes_sheet_fields() {
        let row: MovieRow = serde_json::from_value(json!({
            "title": "Inception",
            "description": "A thief who steals corporate secrets.",
            "poster": "https://example.com/inception.jpg",
            "genre": "Sci-Fi, Thriller",
            "language": "English",
            "fileId": "abc123"
        }))
        .unwrap();

        assert_eq!(row.title.as_deref(), Some("Inception"));
        assert_eq!(row.file_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let row: MovieRow = serde_json::from_value(json!({ "title": "Bare" })).unwrap();
        assert!(row.description.is_none());
        assert!(row.file_id.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let row: MovieRow = serde_json::from_value(json!({
            "title": "Extra",
            "rowNumber": 17
        }))
        .unwrap();
        assert_eq!(row.title.as_deref(), Some("Extra"));
    }

    #[test]
    fn episode_row_season_accepts_string_and_number() {
        let from_string: EpisodeRow = serde_json::from_value(json!({
            "title": "Show",
            "season": "2",
            "episodeTitle": "Pilot",
            "fileId": "f1"
        }))
        .unwrap();
        let from_number: EpisodeRow = serde_json::from_value(json!({
            "title": "Show",
            "season": 2,
            "episodeTitle": "Pilot",
            "fileId": "f1"
        }))
        .unwrap();

        assert_eq!(from_string.season.as_deref(), Some("2"));
        assert_eq!(from_number.season.as_deref(), Some("2"));
    }

    #[test]
    fn rows_round_trip_through_json() {
        let row = EpisodeRow {
            title: Some("Show".to_string()),
            description: None,
            poster: None,
            genre: Some("Drama".to_string()),
            language: None,
            season: Some("1".to_string()),
            episode_title: Some("Pilot".to_string()),
            file_id: Some("f1".to_string()),
        };

        let encoded = serde_json::to_string(&row).unwrap();
        let decoded: EpisodeRow = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.episode_title.as_deref(), Some("Pilot"));
        assert_eq!(decoded.season.as_deref(), Some("1"));
    }
}
