//! Lexical matcher term model and the record <-> term projection.
//!
//! The matcher's status vocabulary is coarser than the record model: a status
//! is derived from `(predicate, type)` through [`term_status`], and the
//! inverse [`predicate_for_status`] can only pick one representative
//! predicate per status. Converting a record to a term and back therefore
//! loses the synonym scope and type, except for primary names.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::constants::matcher::DEFAULT_TERM_SOURCE;
use crate::errors::SynonymError;
use crate::record::SynonymRecord;
use crate::reference::{NamedReference, Reference};
use crate::types::{Identifier, Prefix};
use crate::utils::normalize_term_text;
use crate::vocabulary::{SynonymPredicate, previous_name};

/// Status of a term in the matcher's index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermStatus {
    /// Hand-curated entry from the positives table.
    Curated,
    /// Primary name of the entity.
    Name,
    /// Any current synonym.
    Synonym,
    /// A name the entity used to have.
    FormerName,
}

impl TermStatus {
    /// Serialized status name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TermStatus::Curated => "curated",
            TermStatus::Name => "name",
            TermStatus::Synonym => "synonym",
            TermStatus::FormerName => "former_name",
        }
    }

    /// Ranking weight; higher statuses win ties between candidate matches.
    pub const fn weight(&self) -> f64 {
        match self {
            TermStatus::Curated => 1.0,
            TermStatus::Name => 0.9,
            TermStatus::Synonym => 0.8,
            TermStatus::FormerName => 0.7,
        }
    }
}

impl fmt::Display for TermStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a lexical matcher's index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherTerm {
    /// Normalized lookup key derived from `text`.
    pub norm_text: String,
    /// Surface form as curated.
    pub text: String,
    /// Namespace of the entity.
    pub prefix: Prefix,
    /// Local identifier of the entity.
    pub identifier: Identifier,
    /// Display name of the entity.
    pub name: String,
    /// Kind of name this term is.
    pub status: TermStatus,
    /// Resource the term came from.
    pub source: String,
}

impl MatcherTerm {
    /// Build a term for `reference`, deriving the normalized key from `text`.
    pub fn new(
        text: impl Into<String>,
        reference: &NamedReference,
        status: TermStatus,
        source: impl Into<String>,
    ) -> Self {
        let text = text.into();
        Self {
            norm_text: normalize_term_text(&text),
            text,
            prefix: reference.prefix().to_string(),
            identifier: reference.identifier().to_string(),
            name: reference.name.clone(),
            status,
            source: source.into(),
        }
    }

    /// CURIE of the entity.
    pub fn curie(&self) -> String {
        format!("{}:{}", self.prefix, self.identifier)
    }
}

/// Project a record's `(predicate, type)` onto the matcher's status vocabulary.
///
/// | predicate  | type          | status        |
/// |------------|---------------|---------------|
/// | has label  | any           | `name`        |
/// | other      | previous name | `former_name` |
/// | other      | anything else | `synonym`     |
pub fn term_status(predicate: SynonymPredicate, synonym_type: Option<&Reference>) -> TermStatus {
    match (predicate, synonym_type) {
        (SynonymPredicate::HasLabel, _) => TermStatus::Name,
        (_, Some(synonym_type)) if *synonym_type == previous_name() => TermStatus::FormerName,
        _ => TermStatus::Synonym,
    }
}

/// Partial inverse of [`term_status`]: the predicate a term's status maps back to.
pub fn predicate_for_status(status: TermStatus) -> SynonymPredicate {
    match status {
        TermStatus::Name => SynonymPredicate::HasLabel,
        TermStatus::Curated | TermStatus::Synonym | TermStatus::FormerName => {
            SynonymPredicate::HasRelatedSynonym
        }
    }
}

impl SynonymRecord {
    /// Convert to a matcher term; the entity must carry a name.
    pub fn to_matcher_term(&self) -> Result<MatcherTerm, SynonymError> {
        if self.reference.name.is_empty() {
            return Err(SynonymError::MissingName { curie: self.curie() });
        }
        Ok(MatcherTerm::new(
            self.text.clone(),
            &self.reference,
            term_status(self.predicate, self.synonym_type.as_ref()),
            self.source.as_deref().unwrap_or(DEFAULT_TERM_SOURCE),
        ))
    }

    /// Best-effort reconstruction from a matcher term.
    ///
    /// Only the text, entity, and a status-derived predicate survive; the
    /// synonym type and curation metadata are not recoverable.
    pub fn from_matcher_term(term: &MatcherTerm) -> Self {
        let reference = NamedReference::new(
            Reference::new(term.prefix.clone(), term.identifier.clone()),
            term.name.clone(),
        );
        let mut record = SynonymRecord::new(term.text.clone(), reference)
            .with_predicate(predicate_for_status(term.status));
        if term.source != DEFAULT_TERM_SOURCE {
            record.source = Some(term.source.clone());
        }
        record
    }
}

/// A candidate entity returned for a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    /// Term that matched.
    pub term: MatcherTerm,
    /// Match score in `(0, 1]`.
    pub score: f64,
}

impl ScoredMatch {
    /// Namespace of the matched entity.
    pub fn prefix(&self) -> &str {
        &self.term.prefix
    }

    /// Local identifier of the matched entity.
    pub fn identifier(&self) -> &str {
        &self.term.identifier
    }
}

/// Seam for lexical matching engines.
///
/// Engines are built once from a complete term list; there is no incremental
/// update.
pub trait LexicalMatcher {
    /// Build an index over `terms`.
    fn from_terms(terms: Vec<MatcherTerm>) -> Self
    where
        Self: Sized;
    /// Ranked candidate matches for free text, best first.
    fn get_matches(&self, text: &str) -> Vec<ScoredMatch>;
}

/// Exact lookup on normalized text, one match per entity.
///
/// Scores are the status weight, discounted slightly when the query differs
/// from the term text in anything other than normalization.
#[derive(Clone, Debug, Default)]
pub struct TermIndex {
    terms: HashMap<String, Vec<MatcherTerm>>,
}

/// Discount applied when the query only matches after normalization.
const INEXACT_DISCOUNT: f64 = 0.95;

impl TermIndex {
    /// Number of distinct normalized keys.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when no terms were indexed.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl LexicalMatcher for TermIndex {
    fn from_terms(terms: Vec<MatcherTerm>) -> Self {
        let mut index: HashMap<String, Vec<MatcherTerm>> = HashMap::new();
        for term in terms {
            index.entry(term.norm_text.clone()).or_default().push(term);
        }
        Self { terms: index }
    }

    fn get_matches(&self, text: &str) -> Vec<ScoredMatch> {
        let Some(candidates) = self.terms.get(&normalize_term_text(text)) else {
            return Vec::new();
        };

        let mut best: HashMap<(&str, &str), ScoredMatch> = HashMap::new();
        for term in candidates {
            let mut score = term.status.weight();
            if term.text != text.trim() {
                score *= INEXACT_DISCOUNT;
            }
            let key = (term.prefix.as_str(), term.identifier.as_str());
            let replace = best
                .get(&key)
                .map(|existing| score > existing.score)
                .unwrap_or(true);
            if replace {
                best.insert(
                    key,
                    ScoredMatch {
                        term: term.clone(),
                        score,
                    },
                );
            }
        }

        let mut matches: Vec<ScoredMatch> = best.into_values().collect();
        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.term.curie().cmp(&b.term.curie()))
        });
        matches
    }
}
