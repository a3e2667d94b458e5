//! Integrity checks and canonical re-sorting of the persisted tables.
//!
//! Linting works on raw lines and reports every problem in a file at once,
//! each with its line number.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::codec::{TableLayout, parse_table, sort_key, write_table};
use crate::constants::columns::{
    CONTRIBUTOR, DEFAULT_DELIMITER, NAME, PREDICATE, STOP_WORD_COLUMNS, TEXT,
};
use crate::errors::SynonymError;
use crate::ontology::PrefixAuthority;
use crate::record::SynonymRecord;
use crate::reference::Reference;
use crate::stopwords::{StopWordEntry, read_stop_word_entries, write_stop_words};
use crate::transport::fs::read_text;
use crate::types::{LintMessage, Row};
use crate::utils::casefold;

/// One problem found on one line of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LintIssue {
    /// 1-based line number; the header is line 1.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// All issues found in one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LintReport {
    /// File the issues were found in.
    pub path: PathBuf,
    /// Issues in line order.
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    /// True when no issues were found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues formatted as `path:line: message`.
    pub fn messages(&self) -> Vec<LintMessage> {
        self.issues
            .iter()
            .map(|issue| format!("{}:{}: {}", self.path.display(), issue.line, issue.message))
            .collect()
    }

    /// `Ok` when clean, otherwise [`SynonymError::Lint`] carrying every message.
    pub fn into_result(self) -> Result<(), SynonymError> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(SynonymError::Lint {
                issues: self.messages(),
            })
        }
    }
}

/// Checks references against a prefix authority, caching compiled patterns.
struct ReferenceChecker<'a> {
    authority: &'a dyn PrefixAuthority,
    patterns: HashMap<String, Option<Regex>>,
}

impl<'a> ReferenceChecker<'a> {
    fn new(authority: &'a dyn PrefixAuthority) -> Self {
        Self {
            authority,
            patterns: HashMap::new(),
        }
    }

    fn check(&mut self, reference: &Reference) -> Option<String> {
        let Some(canonical) = self.authority.normalize_prefix(&reference.prefix) else {
            return Some(format!("unknown prefix '{}'", reference.prefix));
        };
        if canonical != reference.prefix {
            return Some(format!(
                "prefix '{}' should be written as '{canonical}'",
                reference.prefix
            ));
        }
        let authority = self.authority;
        let pattern = self
            .patterns
            .entry(canonical)
            .or_insert_with_key(|prefix| {
                let source = authority.lookup(prefix)?.pattern?;
                match Regex::new(&source) {
                    Ok(regex) => Some(regex),
                    Err(err) => {
                        warn!("[biosynonyms] ignoring invalid pattern for {prefix}: {err}");
                        None
                    }
                }
            });
        match pattern {
            Some(regex) if !regex.is_match(&reference.identifier) => Some(format!(
                "identifier '{}' does not match the {} pattern {}",
                reference.identifier,
                reference.prefix,
                regex.as_str()
            )),
            _ => None,
        }
    }
}

fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .skip(1)
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn header_issue(text: &str, expected: &[&str]) -> Option<LintIssue> {
    let header: Vec<&str> = text
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches('\u{feff}')
        .split(DEFAULT_DELIMITER)
        .collect();
    (header != expected).then(|| LintIssue {
        line: 1,
        message: format!(
            "header should be '{}'",
            expected.join(DEFAULT_DELIMITER.to_string().as_str())
        ),
    })
}

/// Lint synonym-table text against `layout`.
pub fn lint_table_text(
    text: &str,
    layout: TableLayout,
    authority: &dyn PrefixAuthority,
) -> Vec<LintIssue> {
    let columns = layout.columns();
    if let Some(issue) = header_issue(text, columns) {
        return vec![issue];
    }

    let mut checker = ReferenceChecker::new(authority);
    let mut issues = Vec::new();
    let mut seen: HashMap<(String, String), usize> = HashMap::new();
    let mut previous_key: Option<(String, String, String, String)> = None;

    for (line, raw) in data_lines(text) {
        let mut report = |message: String| issues.push(LintIssue { line, message });
        let cells: Vec<&str> = raw.split(DEFAULT_DELIMITER).collect();
        if cells.len() != columns.len() {
            report(format!(
                "expected {} cells, found {}",
                columns.len(),
                cells.len()
            ));
            continue;
        }
        let row: Row = columns
            .iter()
            .zip(&cells)
            .map(|(column, cell)| (column.to_string(), cell.to_string()))
            .collect();
        let text_cell = row[TEXT].as_str();
        let curie_cell = cells[1];

        if text_cell.trim() != text_cell {
            report(format!("text '{text_cell}' has surrounding whitespace"));
        }
        if layout == TableLayout::Positive && row[NAME].is_empty() {
            report("name is empty".to_string());
        }
        if layout == TableLayout::Positive && row[PREDICATE].is_empty() {
            report("predicate is empty".to_string());
        }
        if row.get(CONTRIBUTOR).is_none_or(String::is_empty) {
            report("contributor is empty".to_string());
        }
        match SynonymRecord::from_row(&row, None) {
            Ok(record) => {
                let mut references = vec![&record.reference.reference];
                references.extend(&record.provenance);
                references.extend(record.contributor.as_ref());
                for reference in references {
                    if let Some(message) = checker.check(reference) {
                        report(message);
                    }
                }
            }
            Err(err) => report(err.to_string()),
        }

        let key = sort_key(text_cell, curie_cell);
        if previous_key.as_ref().is_some_and(|previous| *previous > key) {
            report("row is out of canonical order; run `biosynonyms sort`".to_string());
        }
        previous_key = Some(key);

        let pair = (text_cell.to_string(), curie_cell.to_string());
        if let Some(first) = seen.get(&pair) {
            report(format!("duplicate of line {first}"));
        } else {
            seen.insert(pair, line);
        }
    }
    issues
}

/// Lint the synonym table at `path`.
pub fn lint_table(
    path: &Path,
    layout: TableLayout,
    authority: &dyn PrefixAuthority,
) -> Result<LintReport, SynonymError> {
    let issues = lint_table_text(&read_text(path)?, layout, authority);
    Ok(LintReport {
        path: path.to_path_buf(),
        issues,
    })
}

/// Lint stop-word table text.
pub fn lint_stop_words_text(text: &str, authority: &dyn PrefixAuthority) -> Vec<LintIssue> {
    if let Some(issue) = header_issue(text, &STOP_WORD_COLUMNS) {
        return vec![issue];
    }

    let mut checker = ReferenceChecker::new(authority);
    let mut issues = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut previous_key: Option<(String, String)> = None;

    for (line, raw) in data_lines(text) {
        let mut report = |message: String| issues.push(LintIssue { line, message });
        let cells: Vec<&str> = raw.split(DEFAULT_DELIMITER).collect();
        let [text_cell, curator_cell] = cells.as_slice() else {
            report(format!("expected 2 cells, found {}", cells.len()));
            continue;
        };
        match StopWordEntry::from_cells(text_cell, curator_cell) {
            Ok(entry) => {
                if let Some(message) = checker.check(&entry.contributor) {
                    report(message);
                }
            }
            Err(err) => report(err.to_string()),
        }

        let folded = casefold(text_cell);
        let key = (folded.clone(), text_cell.to_string());
        if previous_key.as_ref().is_some_and(|previous| *previous > key) {
            report("row is out of canonical order; run `biosynonyms sort`".to_string());
        }
        previous_key = Some(key);

        if let Some(first) = seen.get(&folded) {
            report(format!("case-insensitive duplicate of line {first}"));
        } else {
            seen.insert(folded, line);
        }
    }
    issues
}

/// Lint the stop-word table at `path`.
pub fn lint_stop_words(
    path: &Path,
    authority: &dyn PrefixAuthority,
) -> Result<LintReport, SynonymError> {
    let issues = lint_stop_words_text(&read_text(path)?, authority);
    Ok(LintReport {
        path: path.to_path_buf(),
        issues,
    })
}

/// Rewrite the synonym table at `path` in canonical order. Returns the row count.
pub fn sort_table(path: &Path, layout: TableLayout) -> Result<usize, SynonymError> {
    let records = parse_table(path, None, None)?;
    write_table(&records, path, layout)?;
    info!("[biosynonyms] sorted {} -> {} rows", path.display(), records.len());
    Ok(records.len())
}

/// Rewrite the stop-word table at `path` in canonical order. Returns the row count.
pub fn sort_stop_words(path: &Path) -> Result<usize, SynonymError> {
    let entries = read_stop_word_entries(path)?;
    let total = entries.len();
    let dropped = write_stop_words(path, entries)?;
    Ok(total - dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::InMemoryPrefixAuthority;
    use tempfile::tempdir;

    const HEADER: &str =
        "text\tcurie\tname\tpredicate\ttype\tprovenance\tcontributor\tdate\tlanguage\tcomment\tsource";

    fn table(rows: &[&str]) -> String {
        let mut text = format!("{HEADER}\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    fn lint(rows: &[&str]) -> Vec<LintIssue> {
        lint_table_text(
            &table(rows),
            TableLayout::Positive,
            &InMemoryPrefixAuthority::bundled(),
        )
    }

    #[test]
    fn clean_table_has_no_issues() {
        let issues = lint(&[
            "CCR4-NOT\tsgd:S000000019\tCCR4\toboInOwl:hasRelatedSynonym\t\tpubmed:2\torcid:0000-0003-4423-4370\t2023-01-02\ten\t\t",
            "YAL021C\tsgd:S000000019\tCCR4\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t",
        ]);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn reports_row_level_problems_with_line_numbers() {
        let issues = lint(&[
            "a\thgnc:1\tA\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t",
            "bb\tHGNC:1\tB\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t",
            "cc\thgnc:abc\tC\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t",
            "dd\thgnc:2\t\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t",
            "ee\tnope:2\tE\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t",
            "ff\thgnc:3\tF",
            "gg\thgnc:4\tG\t\t\t\torcid:0000-0003-4423-4370\t\t\t\t",
            "hh\thgnc:5\tH\toboInOwl:hasExactSynonym\t\t\t\t\t\t\t",
        ]);
        let lines: Vec<usize> = issues.iter().map(|issue| issue.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(issues[1].message.contains("should be written as 'hgnc'"));
        assert!(issues[2].message.contains("does not match"));
        assert_eq!(issues[3].message, "name is empty");
        assert!(issues[4].message.contains("unknown prefix"));
        assert!(issues[5].message.contains("expected 11 cells"));
        assert_eq!(issues[6].message, "predicate is empty");
        assert_eq!(issues[7].message, "contributor is empty");
    }

    #[test]
    fn reports_order_and_duplicates() {
        let row_b = "beta\thgnc:2\tB\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t";
        let row_a = "alpha\thgnc:1\tA\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t";
        let issues = lint(&[row_b, row_a, row_a]);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].line, 3);
        assert!(issues[0].message.contains("canonical order"));
        assert_eq!(issues[1].message, "duplicate of line 3");
    }

    #[test]
    fn wrong_header_is_a_single_issue() {
        let issues = lint_table_text(
            "text\tcurie\nabc\thgnc:1\n",
            TableLayout::Positive,
            &InMemoryPrefixAuthority::bundled(),
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 1);
    }

    #[test]
    fn stop_word_lint_flags_every_rule() {
        let text = "text\tcurator_orcid\n\
                    cells\t0000-0003-4423-4370\n\
                    ATP\t0000-0003-4423-4370\n\
                    Cells\t0000-0003-4423-4370\n\
                    protein \t0000-0003-4423-4370\n\
                    tissue\tnot-an-orcid\n\
                    x\ty\tz\n";
        let issues = lint_stop_words_text(text, &InMemoryPrefixAuthority::bundled());
        let lines: Vec<usize> = issues.iter().map(|issue| issue.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6, 7]);
        assert!(issues[0].message.contains("canonical order"));
        assert!(issues[1].message.contains("duplicate of line 2"));
        assert!(issues[3].message.contains("does not match"));
        assert!(issues[4].message.contains("expected 2 cells"));
    }

    #[test]
    fn sort_rewrites_into_lint_clean_order() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("positives.tsv");
        std::fs::write(
            &path,
            table(&[
                "beta\thgnc:2\tB\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t",
                "Alpha\thgnc:1\tA\toboInOwl:hasExactSynonym\t\t\torcid:0000-0003-4423-4370\t\t\t\t",
            ]),
        )
        .unwrap();
        let authority = InMemoryPrefixAuthority::bundled();
        assert!(!lint_table(&path, TableLayout::Positive, &authority).unwrap().is_clean());

        assert_eq!(sort_table(&path, TableLayout::Positive).unwrap(), 2);
        let report = lint_table(&path, TableLayout::Positive, &authority).unwrap();
        assert!(report.is_clean(), "{:?}", report.messages());

        let before = std::fs::read_to_string(&path).unwrap();
        sort_table(&path, TableLayout::Positive).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn sort_stop_words_dedups_and_orders() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("unentities.tsv");
        std::fs::write(
            &path,
            "text\tcurator_orcid\ncells\t0000-0003-4423-4370\nATP\t0000-0003-4423-4370\nCells\t0000-0003-4423-4370\n",
        )
        .unwrap();
        assert_eq!(sort_stop_words(&path).unwrap(), 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "text\tcurator_orcid\nATP\t0000-0003-4423-4370\ncells\t0000-0003-4423-4370\n"
        );
        let report = lint_stop_words(&path, &InMemoryPrefixAuthority::bundled()).unwrap();
        assert!(report.into_result().is_ok());
    }
}
