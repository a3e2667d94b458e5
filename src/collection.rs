//! Operations over a whole batch of synonym records.

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::errors::SynonymError;
use crate::matcher::{LexicalMatcher, MatcherTerm};
use crate::record::SynonymRecord;
use crate::reference::Reference;
use crate::types::Curie;

/// Records grouped by the entity they denote, in first-seen order.
pub type ReferenceGroups = IndexMap<Reference, Vec<SynonymRecord>>;

/// Stable grouping by reference.
///
/// Groups iterate in the order each reference first appears, and records keep
/// their input order within a group.
pub fn group_by_reference<I>(records: I) -> ReferenceGroups
where
    I: IntoIterator<Item = SynonymRecord>,
{
    let mut groups = ReferenceGroups::new();
    for record in records {
        groups
            .entry(record.reference.reference.clone())
            .or_default()
            .push(record);
    }
    groups
}

/// Convert every record to a matcher term, skipping records without a name.
pub fn matcher_terms(records: &[SynonymRecord]) -> Vec<MatcherTerm> {
    let mut skipped = 0usize;
    let terms: Vec<MatcherTerm> = records
        .iter()
        .filter_map(|record| match record.to_matcher_term() {
            Ok(term) => Some(term),
            Err(SynonymError::MissingName { curie }) => {
                skipped += 1;
                warn!("[biosynonyms] skipping unnamed record '{}' for {curie}", record.text);
                None
            }
            Err(err) => {
                warn!("[biosynonyms] skipping record '{}': {err}", record.text);
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        info!(
            "[biosynonyms] built {} matcher terms ({} skipped)",
            terms.len(),
            skipped
        );
    }
    terms
}

/// Build a lexical matcher from scratch over `records`.
pub fn build_matcher<M: LexicalMatcher>(records: &[SynonymRecord]) -> M {
    M::from_terms(matcher_terms(records))
}

/// `(text, curie)` pairs that occur more than once, with their counts.
///
/// Returned in first-seen order; an empty result means the collection is unique.
pub fn duplicate_keys(records: &[SynonymRecord]) -> Vec<((String, Curie), usize)> {
    let mut counts: IndexMap<(String, Curie), usize> = IndexMap::new();
    for record in records {
        *counts
            .entry((record.text.clone(), record.curie()))
            .or_default() += 1;
    }
    counts.into_iter().filter(|(_, count)| *count > 1).collect()
}

/// Entity display names keyed by reference, first non-empty name wins.
pub fn names_by_reference(records: &[SynonymRecord]) -> HashMap<Reference, String> {
    let mut names = HashMap::new();
    for record in records {
        if record.reference.name.is_empty() {
            continue;
        }
        names
            .entry(record.reference.reference.clone())
            .or_insert_with(|| record.reference.name.clone());
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::TermIndex;
    use crate::reference::NamedReference;
    use crate::vocabulary::SynonymPredicate;

    fn record(text: &str, curie: &str, name: &str) -> SynonymRecord {
        SynonymRecord::new(text, NamedReference::from_curie(curie, name).unwrap())
    }

    #[test]
    fn grouping_preserves_first_seen_order() {
        let groups = group_by_reference(vec![
            record("b1", "x:2", "B"),
            record("a1", "x:1", "A"),
            record("b2", "x:2", "B"),
            record("a2", "x:1", "A"),
        ]);
        let keys: Vec<String> = groups.keys().map(Reference::curie).collect();
        assert_eq!(keys, vec!["x:2", "x:1"]);
        let texts: Vec<&str> = groups[&Reference::new("x", "2")]
            .iter()
            .map(|record| record.text.as_str())
            .collect();
        assert_eq!(texts, vec!["b1", "b2"]);
    }

    #[test]
    fn build_matcher_skips_unnamed_records() {
        let records = vec![
            record("YAL021C", "sgd:S000000019", "CCR4")
                .with_predicate(SynonymPredicate::HasExactSynonym),
            record("nameless", "x:1", ""),
        ];
        assert_eq!(matcher_terms(&records).len(), 1);

        let matcher: TermIndex = build_matcher(&records);
        let matches = matcher.get_matches("YAL021C");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].prefix(), "sgd");
        assert!(matcher.get_matches("nameless").is_empty());
    }

    #[test]
    fn duplicate_keys_reports_repeated_pairs() {
        let records = vec![
            record("abc", "x:1", "A"),
            record("abc", "x:2", "B"),
            record("abc", "x:1", "A"),
            record("ABC", "x:1", "A"),
        ];
        assert_eq!(
            duplicate_keys(&records),
            vec![(("abc".to_string(), "x:1".to_string()), 2)]
        );
        assert!(duplicate_keys(&records[..2]).is_empty());
    }

    #[test]
    fn names_by_reference_keeps_first_non_empty_name() {
        let records = vec![
            record("abc", "x:1", ""),
            record("abd", "x:1", "First"),
            record("abe", "x:1", "Second"),
        ];
        let names = names_by_reference(&records);
        assert_eq!(names[&Reference::new("x", "1")], "First");
    }
}
