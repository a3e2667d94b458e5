use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::codec::TableOptions;
use crate::constants::columns::DEFAULT_DELIMITER;
use crate::constants::fetch::DEFAULT_TIMEOUT_SECS;
use crate::constants::resources::{
    DEFAULT_NEGATIVES_PATH, DEFAULT_POSITIVES_PATH, DEFAULT_STOP_WORDS_PATH, ENV_FETCH_TIMEOUT_SECS,
    ENV_NEGATIVES, ENV_POSITIVES, ENV_STOP_WORDS,
};

/// Where the curated tables live and how to read them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceConfig {
    /// Positives table: a filesystem path or an `http(s)://` URL.
    pub positives_path: String,
    /// Negatives table: a filesystem path or an `http(s)://` URL.
    pub negatives_path: String,
    /// Stop-word table (always local, it is rewritten in place).
    pub stop_words_path: PathBuf,
    /// Cell delimiter of the synonym tables.
    pub delimiter: char,
    /// Timeout for remote table fetches.
    pub fetch_timeout: Duration,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            positives_path: DEFAULT_POSITIVES_PATH.to_string(),
            negatives_path: DEFAULT_NEGATIVES_PATH.to_string(),
            stop_words_path: PathBuf::from(DEFAULT_STOP_WORDS_PATH),
            delimiter: DEFAULT_DELIMITER,
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ResourceConfig {
    /// Defaults overridden by the `BIOSYNONYMS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(value) = lookup(ENV_POSITIVES) {
            config.positives_path = value;
        }
        if let Some(value) = lookup(ENV_NEGATIVES) {
            config.negatives_path = value;
        }
        if let Some(value) = lookup(ENV_STOP_WORDS) {
            config.stop_words_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_FETCH_TIMEOUT_SECS) {
            match value.trim().parse::<u64>() {
                Ok(secs) => config.fetch_timeout = Duration::from_secs(secs),
                Err(_) => warn!(
                    "[biosynonyms] ignoring {ENV_FETCH_TIMEOUT_SECS}={value:?}; expected whole seconds"
                ),
            }
        }
        config
    }

    /// Use `location` (path or URL) for the positives table.
    pub fn with_positives(mut self, location: impl Into<String>) -> Self {
        self.positives_path = location.into();
        self
    }

    /// Use `location` (path or URL) for the negatives table.
    pub fn with_negatives(mut self, location: impl Into<String>) -> Self {
        self.negatives_path = location.into();
        self
    }

    /// Use `path` for the stop-word table.
    pub fn with_stop_words(mut self, path: impl Into<PathBuf>) -> Self {
        self.stop_words_path = path.into();
        self
    }

    /// Override the timeout for remote tables.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Codec options derived from this configuration.
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            delimiter: self.delimiter,
            fetch_timeout: self.fetch_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_bundled_data() {
        let config = ResourceConfig::default();
        assert_eq!(config.positives_path, "data/positives.tsv");
        assert_eq!(config.negatives_path, "data/negatives.tsv");
        assert_eq!(config.stop_words_path, PathBuf::from("data/unentities.tsv"));
        assert_eq!(config.delimiter, '\t');
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
    }

    #[test]
    fn environment_overrides_defaults() {
        let env: HashMap<&str, &str> = [
            (ENV_POSITIVES, "https://example.org/positives.tsv"),
            (ENV_STOP_WORDS, "/tmp/stop.tsv"),
            (ENV_FETCH_TIMEOUT_SECS, "5"),
            (ENV_NEGATIVES, "  "),
        ]
        .into_iter()
        .collect();
        let config = ResourceConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()));
        assert_eq!(config.positives_path, "https://example.org/positives.tsv");
        assert_eq!(config.negatives_path, DEFAULT_NEGATIVES_PATH);
        assert_eq!(config.stop_words_path, PathBuf::from("/tmp/stop.tsv"));
        assert_eq!(config.table_options().fetch_timeout, Duration::from_secs(5));
    }

    #[test]
    fn unparsable_timeout_keeps_default() {
        let config = ResourceConfig::from_lookup(|key| {
            (key == ENV_FETCH_TIMEOUT_SECS).then(|| "soon".to_string())
        });
        assert_eq!(config.fetch_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
