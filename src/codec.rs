//! Delimited-text codec for the positives and negatives tables.
//!
//! Reading is header-driven: each data line becomes a [`Row`] keyed by the
//! header cells, then a [`SynonymRecord`] via [`SynonymRecord::from_row`].
//! Writing always emits the canonical order given by [`sort_key`]; callers
//! never need to sort first.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::constants::columns::{DEFAULT_DELIMITER, NEGATIVE_COLUMNS, POSITIVE_COLUMNS};
use crate::constants::fetch::DEFAULT_TIMEOUT_SECS;
use crate::errors::SynonymError;
use crate::record::SynonymRecord;
use crate::reference::Reference;
use crate::transport::TableSource;
use crate::transport::fs::write_whole;
use crate::types::Row;
use crate::utils::casefold;

/// Column set of a persisted synonym table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableLayout {
    /// Full 11-column layout of curated synonyms.
    Positive,
    /// Reduced 5-column layout of known-wrong synonyms.
    Negative,
}

impl TableLayout {
    /// Column names in persisted order.
    pub const fn columns(&self) -> &'static [&'static str] {
        match self {
            TableLayout::Positive => &POSITIVE_COLUMNS,
            TableLayout::Negative => &NEGATIVE_COLUMNS,
        }
    }

    /// Match a header against the known layouts.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Option<Self> {
        [TableLayout::Positive, TableLayout::Negative]
            .into_iter()
            .find(|layout| {
                let columns = layout.columns();
                columns.len() == header.len()
                    && columns
                        .iter()
                        .zip(header)
                        .all(|(expected, found)| *expected == AsRef::<str>::as_ref(found))
            })
    }
}

/// Read options for [`parse_table_with`].
#[derive(Clone, Debug)]
pub struct TableOptions {
    /// Cell delimiter.
    pub delimiter: char,
    /// Timeout for remote sources.
    pub fetch_timeout: Duration,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Header cells plus numbered data rows of one table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Header cells as read.
    pub header: Vec<String>,
    /// `(1-based line number, row)` for every non-blank data line.
    pub rows: Vec<(usize, Row)>,
}

/// Canonical ordering key over the first two cells of a row.
///
/// Case-insensitive text first, then raw text, then the same for the CURIE.
pub fn sort_key(text: &str, curie: &str) -> (String, String, String, String) {
    (
        casefold(text),
        text.to_string(),
        casefold(curie),
        curie.to_string(),
    )
}

/// Load a table from a path or URL with default options.
pub fn parse_table(
    source: impl Into<TableSource>,
    delimiter: Option<char>,
    names: Option<&HashMap<Reference, String>>,
) -> Result<Vec<SynonymRecord>, SynonymError> {
    let mut options = TableOptions::default();
    if let Some(delimiter) = delimiter {
        options.delimiter = delimiter;
    }
    parse_table_with(source, &options, names)
}

/// Load a table from a path or URL.
///
/// Any malformed row aborts the whole load.
pub fn parse_table_with(
    source: impl Into<TableSource>,
    options: &TableOptions,
    names: Option<&HashMap<Reference, String>>,
) -> Result<Vec<SynonymRecord>, SynonymError> {
    let source = source.into();
    let text = source.read_to_string(options.fetch_timeout)?;
    let records = read_table(&text, options.delimiter, names)?;
    info!(
        "[biosynonyms] loaded {} synonym records from {:?}",
        records.len(),
        source
    );
    Ok(records)
}

/// Parse in-memory table text into records.
pub fn read_table(
    text: &str,
    delimiter: char,
    names: Option<&HashMap<Reference, String>>,
) -> Result<Vec<SynonymRecord>, SynonymError> {
    read_rows(text, delimiter)?
        .rows
        .iter()
        .map(|(_, row)| SynonymRecord::from_row(row, names))
        .collect()
}

/// Split table text into a header and header-keyed rows.
///
/// Blank lines and lines whose cells are all empty are skipped. A line with
/// more cells than the header is a [`SynonymError::MalformedRow`]; missing
/// trailing cells are simply absent from the row.
pub fn read_rows(text: &str, delimiter: char) -> Result<RawTable, SynonymError> {
    let mut lines = text.lines().enumerate();
    let Some((_, header_line)) = lines.next() else {
        return Ok(RawTable::default());
    };
    let header: Vec<String> = header_line
        .trim_start_matches('\u{feff}')
        .split(delimiter)
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line_number = idx + 1;
        let cells: Vec<&str> = line.split(delimiter).collect();
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        if cells.len() > header.len() {
            return Err(SynonymError::MalformedRow {
                line: line_number,
                expected: header.len(),
                found: cells.len(),
            });
        }
        let row: Row = header
            .iter()
            .zip(cells)
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();
        rows.push((line_number, row));
    }
    Ok(RawTable { header, rows })
}

/// Render records as table text in canonical order.
///
/// Every record is validated first, so invalid input never yields output.
pub fn render_table(
    records: &[SynonymRecord],
    layout: TableLayout,
    delimiter: char,
) -> Result<String, SynonymError> {
    for record in records {
        record.validate()?;
    }

    let mut sorted: Vec<&SynonymRecord> = records.iter().collect();
    sorted.sort_by_cached_key(|record| sort_key(&record.text, &record.curie()));

    let separator = delimiter.to_string();
    let mut out = layout.columns().join(separator.as_str());
    out.push('\n');
    for record in sorted {
        let row = record.to_row();
        let cells: Vec<&str> = layout
            .columns()
            .iter()
            .map(|column| row.get(*column).map(String::as_str).unwrap_or_default())
            .collect();
        out.push_str(&cells.join(separator.as_str()));
        out.push('\n');
    }
    Ok(out)
}

/// Write records to `destination` as a whole-file rewrite in canonical order.
pub fn write_table(
    records: &[SynonymRecord],
    destination: &Path,
    layout: TableLayout,
) -> Result<(), SynonymError> {
    let text = render_table(records, layout, DEFAULT_DELIMITER)?;
    write_whole(destination, text.as_bytes())?;
    info!(
        "[biosynonyms] wrote {} synonym records -> {}",
        records.len(),
        destination.display()
    );
    Ok(())
}
