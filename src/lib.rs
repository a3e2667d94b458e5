#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runner behind the `biosynonyms` binary.
pub mod cli;
/// Delimited-text codec for the synonym tables.
pub mod codec;
/// Grouping, matcher construction, and uniqueness checks over record batches.
pub mod collection;
/// Resource locations and read options.
pub mod config;
/// Centralized constants: columns, vocabulary, defaults.
pub mod constants;
/// Table integrity checks and canonical re-sorting.
pub mod lint;
/// Lexical matcher terms and the built-in term index.
pub mod matcher;
/// Ontology header metadata.
pub mod metadata;
/// OWL/Turtle export and prefix resolution.
pub mod ontology;
/// Synonym records.
pub mod record;
/// CURIE references.
pub mod reference;
/// Loaders for the bundled tables.
pub mod resources;
/// Known non-entity strings.
pub mod stopwords;
/// Input transports used by the codec (filesystem and HTTP).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;
/// Synonym predicates and synonym types.
pub mod vocabulary;

mod errors;

pub use codec::{TableLayout, TableOptions, parse_table, read_table, sort_key, write_table};
pub use collection::{ReferenceGroups, build_matcher, duplicate_keys, group_by_reference};
pub use config::ResourceConfig;
pub use errors::SynonymError;
pub use matcher::{LexicalMatcher, MatcherTerm, ScoredMatch, TermIndex, TermStatus};
pub use metadata::OntologyMetadata;
pub use ontology::{InMemoryPrefixAuthority, PrefixAuthority, write_owl_ttl};
pub use record::SynonymRecord;
pub use reference::{NamedReference, Reference};
pub use resources::{
    get_grounder, get_matcher_terms, get_negative_synonyms, get_positive_synonyms,
    load_unentities, write_unentities,
};
pub use stopwords::{StopWordEntry, StopWordStore};
pub use types::{Curie, Identifier, LanguageCode, LintMessage, Prefix, Row, UriPrefix};
pub use vocabulary::SynonymPredicate;
