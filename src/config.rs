use std::path::PathBuf;

use tracing::debug;

/// Default number of rows on the leaderboard.
pub const DEFAULT_TOP_RESULTS_LIMIT: usize = 20;

const DEFAULT_DATABASE_URL: &str = "sqlite://scorehub.db";
const DEFAULT_PREFERENCES_PATH: &str = "scorehub_prefs.json";

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub preferences_path: PathBuf,
    pub top_results_limit: usize,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let top_results_limit = lookup("SCOREHUB_TOP_RESULTS_LIMIT")
            .and_then(|s| s.parse().ok())
            .filter(|limit: &usize| *limit > 0)
            .unwrap_or(DEFAULT_TOP_RESULTS_LIMIT);

        let config = Self {
            database_url: lookup("SCOREHUB_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            preferences_path: lookup("SCOREHUB_PREFERENCES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFERENCES_PATH)),
            top_results_limit,
        };

        debug!(
            database_url = %config.database_url,
            preferences_path = %config.preferences_path.display(),
            top_results_limit = config.top_results_limit,
            "Loaded configuration"
        );

        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
