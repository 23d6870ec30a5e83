//! Endpoint configuration
//!
//! The two catalog endpoints default to the deployment's opensheet URLs
//! and can be overridden with a `config.json` in the platform config
//! directory. Configuration follows the same degraded-not-fatal posture
//! as the rest of the app: a missing or unparsable file yields the
//! defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "config.json";

const DEFAULT_MOVIES_URL: &str =
    "https://opensheet.elk.sh/1vOt2lrRXqEnX8m9AclIAtBP67Wwn7kLqj0htmjVQWEw/movies";
const DEFAULT_SERIES_URL: &str =
    "https://opensheet.elk.sh/1vOt2lrRXqEnX8m9AclIAtBP67Wwn7kLqj0htmjVQWEw/webseries";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint serving the movie rows
    #[serde(default = "default_movies_url")]
    pub movies_url: String,
    /// Endpoint serving the web-series episode rows
    #[serde(default = "default_series_url")]
    pub series_url: String,
}

fn default_movies_url() -> String {
    DEFAULT_MOVIES_URL.to_string()
}

fn default_series_url() -> String {
    DEFAULT_SERIES_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movies_url: default_movies_url(),
            series_url: default_series_url(),
        }
    }
}

impl Config {
    /// Loads the configuration from the platform config directory,
    /// falling back to the defaults.
    pub fn load() -> Self {
        let Some(proj_dirs) = crate::project_dirs() else {
            return Self::default();
        };
        Self::load_from(&proj_dirs.config_dir().join(CONFIG_FILE))
    }

    fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }
}
