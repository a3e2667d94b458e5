//! Where tables come from: local files or plain HTTP(S) GETs.

/// Filesystem reads and whole-file rewrites.
pub mod fs;
/// Blocking HTTP retrieval.
pub mod http;

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::fetch::REMOTE_SCHEMES;
use crate::errors::SynonymError;

/// Resolved location of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableSource {
    /// Path on the local filesystem.
    Local(PathBuf),
    /// `http://` or `https://` URL.
    Remote(String),
}

impl TableSource {
    /// Classify a location string: URLs with an HTTP scheme are remote, anything else is a path.
    pub fn resolve(location: &str) -> Self {
        if REMOTE_SCHEMES
            .iter()
            .any(|scheme| location.starts_with(scheme))
        {
            TableSource::Remote(location.to_string())
        } else {
            TableSource::Local(PathBuf::from(location))
        }
    }

    /// Read the whole table as text.
    pub fn read_to_string(&self, timeout: Duration) -> Result<String, SynonymError> {
        match self {
            TableSource::Local(path) => fs::read_text(path),
            TableSource::Remote(url) => http::fetch_text(url, timeout),
        }
    }
}

impl From<PathBuf> for TableSource {
    fn from(path: PathBuf) -> Self {
        TableSource::Local(path)
    }
}

impl From<&std::path::Path> for TableSource {
    fn from(path: &std::path::Path) -> Self {
        TableSource::Local(path.to_path_buf())
    }
}

impl From<&str> for TableSource {
    fn from(location: &str) -> Self {
        TableSource::resolve(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_distinguishes_urls_from_paths() {
        assert_eq!(
            TableSource::resolve("https://example.org/positives.tsv"),
            TableSource::Remote("https://example.org/positives.tsv".into())
        );
        assert_eq!(
            TableSource::resolve("http://localhost/x.tsv"),
            TableSource::Remote("http://localhost/x.tsv".into())
        );
        assert_eq!(
            TableSource::resolve("data/positives.tsv"),
            TableSource::Local(PathBuf::from("data/positives.tsv"))
        );
        assert_eq!(
            TableSource::resolve("ftp://example.org/x.tsv"),
            TableSource::Local(PathBuf::from("ftp://example.org/x.tsv"))
        );
    }
}
