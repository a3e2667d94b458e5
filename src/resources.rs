//! Loaders for the curated tables named by a [`ResourceConfig`].

use std::collections::HashSet;

use crate::codec::parse_table_with;
use crate::collection::{build_matcher, matcher_terms};
use crate::config::ResourceConfig;
use crate::errors::SynonymError;
use crate::matcher::{LexicalMatcher, MatcherTerm, TermIndex};
use crate::record::SynonymRecord;
use crate::stopwords::{StopWordEntry, load_stop_words, write_stop_words};
use crate::transport::TableSource;

/// Curated positive synonyms.
pub fn get_positive_synonyms(config: &ResourceConfig) -> Result<Vec<SynonymRecord>, SynonymError> {
    parse_table_with(
        TableSource::resolve(&config.positives_path),
        &config.table_options(),
        None,
    )
}

/// Curated negative synonyms (texts known not to denote their entity).
pub fn get_negative_synonyms(config: &ResourceConfig) -> Result<Vec<SynonymRecord>, SynonymError> {
    parse_table_with(
        TableSource::resolve(&config.negatives_path),
        &config.table_options(),
        None,
    )
}

/// Strings known not to be named entities.
pub fn load_unentities(config: &ResourceConfig) -> Result<HashSet<String>, SynonymError> {
    load_stop_words(&config.stop_words_path)
}

/// Replace the stop-word table with `entries`. Returns the number of
/// case-insensitive duplicates dropped.
pub fn write_unentities<I>(config: &ResourceConfig, entries: I) -> Result<usize, SynonymError>
where
    I: IntoIterator<Item = StopWordEntry>,
{
    write_stop_words(&config.stop_words_path, entries)
}

/// Matcher terms for every positive synonym.
pub fn get_matcher_terms(config: &ResourceConfig) -> Result<Vec<MatcherTerm>, SynonymError> {
    Ok(matcher_terms(&get_positive_synonyms(config)?))
}

/// Built-in grounder over the positive synonyms.
pub fn get_grounder(config: &ResourceConfig) -> Result<TermIndex, SynonymError> {
    make_grounder(config)
}

/// Any [`LexicalMatcher`] built over the positive synonyms.
pub fn make_grounder<M: LexicalMatcher>(config: &ResourceConfig) -> Result<M, SynonymError> {
    Ok(build_matcher(&get_positive_synonyms(config)?))
}
