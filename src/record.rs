//! The curated synonym record and its row-level parsing and validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::columns::{
    COMMENT, CONTRIBUTOR, CURIE, DATE, DEFAULT_DELIMITER, LANGUAGE, LIST_DELIMITER, LIST_JOINER,
    NAME, PREDICATE, PROVENANCE, SOURCE, TEXT, TYPE,
};
use crate::constants::vocabulary::{OMO_PREFIX, ORCID_PREFIX};
use crate::errors::SynonymError;
use crate::reference::{NamedReference, Reference, parse_curie_list};
use crate::types::{Curie, LanguageCode, Row};
use crate::utils::breaks_cell;
use crate::vocabulary::SynonymPredicate;

/// Date format used in tables and serialized output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One curated synonym: a text, the entity it denotes, and how it was curated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymRecord {
    /// Literal surface form.
    pub text: String,
    /// Entity the text denotes.
    pub reference: NamedReference,
    /// Relation between entity and text.
    pub predicate: SynonymPredicate,
    /// Optional OMO synonym type (abbreviation, plural form, ...).
    pub synonym_type: Option<Reference>,
    /// Supporting citations, in curated order.
    pub provenance: Vec<Reference>,
    /// Curator ORCID.
    pub contributor: Option<Reference>,
    /// Two-letter language code; absent means unspecified.
    pub language: Option<LanguageCode>,
    /// Free-text curator note.
    pub comment: Option<String>,
    /// Free-text origin of the synonym.
    pub source: Option<String>,
    /// Curation date.
    pub date: Option<NaiveDate>,
}

impl SynonymRecord {
    /// Create a plain synonym with every optional field absent.
    pub fn new(text: impl Into<String>, reference: NamedReference) -> Self {
        Self {
            text: text.into(),
            reference,
            predicate: SynonymPredicate::default(),
            synonym_type: None,
            provenance: Vec::new(),
            contributor: None,
            language: None,
            comment: None,
            source: None,
            date: None,
        }
    }

    /// Set the predicate.
    pub fn with_predicate(mut self, predicate: SynonymPredicate) -> Self {
        self.predicate = predicate;
        self
    }

    /// Set the OMO synonym type.
    pub fn with_type(mut self, synonym_type: Reference) -> Self {
        self.synonym_type = Some(synonym_type);
        self
    }

    /// Replace the citations.
    pub fn with_provenance<I>(mut self, provenance: I) -> Self
    where
        I: IntoIterator<Item = Reference>,
    {
        self.provenance = provenance.into_iter().collect();
        self
    }

    /// Set the curator ORCID.
    pub fn with_contributor(mut self, contributor: Reference) -> Self {
        self.contributor = Some(contributor);
        self
    }

    /// Set the language code.
    pub fn with_language(mut self, language: impl Into<LanguageCode>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the curator comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the free-text source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the curation date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// CURIE of the denoted entity.
    pub fn curie(&self) -> Curie {
        self.reference.curie()
    }

    /// Display name of the denoted entity.
    pub fn name(&self) -> &str {
        &self.reference.name
    }

    /// Parse a header-keyed row into a validated record.
    ///
    /// The entity name comes from `names` when it has an entry for the
    /// reference, then from the row's `name` cell, then falls back to `text`.
    /// Empty cells are treated as absent.
    pub fn from_row(
        row: &Row,
        names: Option<&HashMap<Reference, String>>,
    ) -> Result<Self, SynonymError> {
        let cell = |key: &str| {
            row.get(key)
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        };

        let text = cell(TEXT).unwrap_or_default().to_string();
        let reference = Reference::from_curie(cell(CURIE).unwrap_or_default())?;
        let name = names
            .and_then(|names| names.get(&reference))
            .map(String::as_str)
            .or_else(|| cell(NAME))
            .unwrap_or(text.as_str())
            .to_string();

        let record = Self {
            reference: NamedReference::new(reference, name),
            predicate: cell(PREDICATE)
                .map(SynonymPredicate::parse)
                .transpose()?
                .unwrap_or_default(),
            synonym_type: cell(TYPE).map(Reference::from_curie).transpose()?,
            provenance: cell(PROVENANCE)
                .map(parse_curie_list)
                .transpose()?
                .unwrap_or_default(),
            contributor: cell(CONTRIBUTOR).map(Reference::from_curie).transpose()?,
            date: cell(DATE).map(parse_date).transpose()?,
            language: cell(LANGUAGE).map(str::to_string),
            comment: cell(COMMENT).map(str::to_string),
            source: cell(SOURCE).map(str::to_string),
            text,
        };
        record.validate()?;
        Ok(record)
    }

    /// Render every column of the positives layout, absent values as empty cells.
    pub fn to_row(&self) -> Row {
        let optional = |value: Option<&String>| value.cloned().unwrap_or_default();
        let mut row = Row::new();
        row.insert(TEXT.to_string(), self.text.clone());
        row.insert(CURIE.to_string(), self.curie());
        row.insert(NAME.to_string(), self.reference.name.clone());
        row.insert(PREDICATE.to_string(), self.predicate.curie().to_string());
        row.insert(
            TYPE.to_string(),
            self.synonym_type
                .as_ref()
                .map(Reference::curie)
                .unwrap_or_default(),
        );
        row.insert(
            PROVENANCE.to_string(),
            self.provenance
                .iter()
                .map(Reference::curie)
                .collect::<Vec<_>>()
                .join(LIST_JOINER),
        );
        row.insert(
            CONTRIBUTOR.to_string(),
            self.contributor
                .as_ref()
                .map(Reference::curie)
                .unwrap_or_default(),
        );
        row.insert(
            DATE.to_string(),
            self.date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        );
        row.insert(LANGUAGE.to_string(), optional(self.language.as_ref()));
        row.insert(COMMENT.to_string(), optional(self.comment.as_ref()));
        row.insert(SOURCE.to_string(), optional(self.source.as_ref()));
        row
    }

    /// Check the record invariants.
    ///
    /// Construction through `new`/`with_*` never fails; this is the single
    /// place that decides whether a record may be persisted.
    pub fn validate(&self) -> Result<(), SynonymError> {
        if self.text.chars().count() <= 1 {
            return Err(SynonymError::invalid(
                &self.text,
                "synonym text must be longer than one character",
            ));
        }
        let free_text = [
            Some(&self.text),
            Some(&self.reference.name),
            self.comment.as_ref(),
            self.source.as_ref(),
        ];
        if free_text
            .into_iter()
            .flatten()
            .any(|value| breaks_cell(value, DEFAULT_DELIMITER))
        {
            return Err(SynonymError::invalid(
                &self.text,
                "text fields may not contain tabs or line breaks",
            ));
        }
        if self.reference.name.is_empty() {
            return Err(SynonymError::invalid(
                &self.text,
                format!("{} has an empty name", self.reference.reference),
            ));
        }
        let references = std::iter::once(&self.reference.reference)
            .chain(self.synonym_type.as_ref())
            .chain(&self.provenance)
            .chain(self.contributor.as_ref());
        for reference in references {
            if !reparses(reference) {
                return Err(SynonymError::invalid(
                    &self.text,
                    format!("reference '{reference}' would not parse back from a table cell"),
                ));
            }
        }
        if let Some(citation) = self
            .provenance
            .iter()
            .find(|citation| citation.curie().contains(LIST_DELIMITER))
        {
            return Err(SynonymError::invalid(
                &self.text,
                format!("provenance '{citation}' contains the list delimiter '{LIST_DELIMITER}'"),
            ));
        }
        if let Some(synonym_type) = &self.synonym_type
            && synonym_type.prefix != OMO_PREFIX
        {
            return Err(SynonymError::invalid(
                &self.text,
                format!("synonym type '{synonym_type}' is not in the {OMO_PREFIX} namespace"),
            ));
        }
        if let Some(contributor) = &self.contributor
            && contributor.prefix != ORCID_PREFIX
        {
            return Err(SynonymError::invalid(
                &self.text,
                format!("contributor '{contributor}' is not an {ORCID_PREFIX} identifier"),
            ));
        }
        if let Some(language) = &self.language
            && !is_language_code(language)
        {
            return Err(SynonymError::invalid(
                &self.text,
                format!("language '{language}' is not a two-letter code"),
            ));
        }
        Ok(())
    }

    /// True when the record carries anything worth reifying as an axiom.
    pub fn has_annotations(&self) -> bool {
        self.contributor.is_some()
            || self.date.is_some()
            || self.source.is_some()
            || self.synonym_type.is_some()
            || !self.provenance.is_empty()
            || self.comment.is_some()
    }

    /// Quote the text and append its language tag.
    ///
    /// With `for_triple_syntax` the text is escaped for Turtle string literals;
    /// otherwise only quotes and backslashes are escaped, as in OWL functional syntax.
    pub fn render_literal(&self, for_triple_syntax: bool) -> String {
        let body = if for_triple_syntax {
            escape_turtle_string(&self.text)
        } else {
            self.text.replace('\\', "\\\\").replace('"', "\\\"")
        };
        match &self.language {
            Some(language) => format!("\"{body}\"@{language}"),
            None => format!("\"{body}\""),
        }
    }
}

/// Parse a `YYYY-MM-DD` cell.
pub fn parse_date(value: &str) -> Result<NaiveDate, SynonymError> {
    let malformed = || SynonymError::MalformedDate {
        value: value.to_string(),
    };
    if value.len() != 10 {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| malformed())
}

fn reparses(reference: &Reference) -> bool {
    Reference::from_curie(&reference.curie()).is_ok_and(|parsed| parsed == *reference)
}

fn is_language_code(value: &str) -> bool {
    value.len() == 2 && value.chars().all(|ch| ch.is_ascii_alphabetic())
}

/// Escape a string for use inside a double-quoted Turtle literal.
pub(crate) fn escape_turtle_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
