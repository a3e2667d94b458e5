//! Strings known not to be named entities.
//!
//! Stored as a two-column table (`text`, `curator_orcid`) where the curator
//! column holds the bare ORCID identifier.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use crate::codec::read_rows;
use crate::constants::columns::{DEFAULT_DELIMITER, STOP_WORD_COLUMNS};
use crate::constants::vocabulary::ORCID_PREFIX;
use crate::errors::SynonymError;
use crate::reference::Reference;
use crate::transport::fs::{read_text, write_whole};
use crate::utils::{breaks_cell, casefold};

/// A false-positive string and the curator who flagged it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StopWordEntry {
    /// The string to ignore.
    pub text: String,
    /// Curator ORCID.
    pub contributor: Reference,
}

impl StopWordEntry {
    /// Create an entry without validating it.
    pub fn new(text: impl Into<String>, contributor: Reference) -> Self {
        Self {
            text: text.into(),
            contributor,
        }
    }

    /// Parse a table row; the curator cell may be a bare ORCID or an `orcid:` CURIE.
    pub fn from_cells(text: &str, curator: &str) -> Result<Self, SynonymError> {
        let contributor = if curator.contains(':') {
            Reference::from_curie(curator)?
        } else {
            Reference::new(ORCID_PREFIX, curator)
        };
        let entry = Self::new(text, contributor);
        entry.validate()?;
        Ok(entry)
    }

    /// Check the text is a single clean cell and the curator is an ORCID.
    pub fn validate(&self) -> Result<(), SynonymError> {
        if self.text.is_empty() || self.text.trim() != self.text {
            return Err(SynonymError::invalid(
                &self.text,
                "stop word must be non-empty and carry no surrounding whitespace",
            ));
        }
        if breaks_cell(&self.text, DEFAULT_DELIMITER) {
            return Err(SynonymError::invalid(
                &self.text,
                "stop word may not contain tabs or line breaks",
            ));
        }
        if self.contributor.prefix != ORCID_PREFIX {
            return Err(SynonymError::invalid(
                &self.text,
                format!("curator '{}' is not an {ORCID_PREFIX} identifier", self.contributor),
            ));
        }
        Ok(())
    }
}

/// Stop words unique by case-insensitive text, kept in canonical order.
#[derive(Clone, Debug, Default)]
pub struct StopWordStore {
    entries: BTreeMap<(String, String), StopWordEntry>,
    folded: HashSet<String>,
}

impl StopWordStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; returns `false` when its text already exists case-insensitively.
    pub fn insert(&mut self, entry: StopWordEntry) -> bool {
        let folded = casefold(&entry.text);
        if !self.folded.insert(folded.clone()) {
            return false;
        }
        self.entries.insert((folded, entry.text.clone()), entry);
        true
    }

    /// Case-insensitive membership.
    pub fn contains(&self, text: &str) -> bool {
        self.folded.contains(&casefold(text))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in case-insensitive text order.
    pub fn iter(&self) -> impl Iterator<Item = &StopWordEntry> + '_ {
        self.entries.values()
    }

    /// Table text with header, one row per entry.
    pub fn render(&self) -> String {
        let mut out = STOP_WORD_COLUMNS.join("\t");
        out.push('\n');
        for entry in self.iter() {
            out.push_str(&entry.text);
            out.push(DEFAULT_DELIMITER);
            out.push_str(&entry.contributor.identifier);
            out.push('\n');
        }
        out
    }
}

impl FromIterator<StopWordEntry> for StopWordStore {
    fn from_iter<I: IntoIterator<Item = StopWordEntry>>(iter: I) -> Self {
        let mut store = Self::new();
        for entry in iter {
            store.insert(entry);
        }
        store
    }
}

/// Read every stop-word entry from `path`.
pub fn read_stop_word_entries(path: &Path) -> Result<Vec<StopWordEntry>, SynonymError> {
    let table = read_rows(&read_text(path)?, DEFAULT_DELIMITER)?;
    let [text_column, curator_column] = STOP_WORD_COLUMNS;
    table
        .rows
        .iter()
        .map(|(_, row)| {
            let cell = |key: &str| row.get(key).map(String::as_str).unwrap_or_default();
            StopWordEntry::from_cells(cell(text_column), cell(curator_column))
        })
        .collect()
}

/// Load the set of stop-word texts, case preserved.
pub fn load_stop_words(path: &Path) -> Result<HashSet<String>, SynonymError> {
    let table = read_rows(&read_text(path)?, DEFAULT_DELIMITER)?;
    let text_column = STOP_WORD_COLUMNS[0];
    Ok(table
        .rows
        .into_iter()
        .filter_map(|(_, mut row)| row.swap_remove(text_column))
        .filter(|text| !text.is_empty())
        .collect())
}

/// Rewrite the stop-word table at `path` from `entries`, sorted case-insensitively.
///
/// Case-insensitive duplicates after the first are dropped with a warning.
/// Returns the number of dropped entries.
pub fn write_stop_words<I>(path: &Path, entries: I) -> Result<usize, SynonymError>
where
    I: IntoIterator<Item = StopWordEntry>,
{
    let mut store = StopWordStore::new();
    let mut dropped = 0usize;
    for entry in entries {
        entry.validate()?;
        let text = entry.text.clone();
        if !store.insert(entry) {
            warn!("[biosynonyms] dropping case-insensitive duplicate stop word '{text}'");
            dropped += 1;
        }
    }
    write_whole(path, store.render().as_bytes())?;
    info!(
        "[biosynonyms] wrote {} stop words -> {}",
        store.len(),
        path.display()
    );
    Ok(dropped)
}
