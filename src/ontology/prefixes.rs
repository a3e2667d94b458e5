//! Prefix collection and resolution against a prefix authority.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::debug;

use crate::collection::ReferenceGroups;
use crate::constants::ontology::BUILTIN_PREFIXES;
use crate::errors::SynonymError;
use crate::reference::Reference;
use crate::transport::fs::read_text;
use crate::types::{Prefix, UriPrefix};
use crate::utils::casefold;

/// What an authority knows about one prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRecord {
    /// URI base the prefix expands to, if the authority has one.
    #[serde(default)]
    pub uri_prefix: Option<UriPrefix>,
    /// Regular expression local identifiers must match.
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Registry of namespace prefixes.
pub trait PrefixAuthority {
    /// Exact-case lookup.
    fn lookup(&self, prefix: &str) -> Option<PrefixRecord>;
    /// Canonical spelling of `prefix`, matched case-insensitively.
    fn normalize_prefix(&self, prefix: &str) -> Option<Prefix>;
}

/// Prefix authority held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPrefixAuthority {
    records: IndexMap<Prefix, PrefixRecord>,
}

impl InMemoryPrefixAuthority {
    /// Empty authority.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a prefix.
    pub fn with_prefix(
        mut self,
        prefix: impl Into<Prefix>,
        uri_prefix: Option<&str>,
        pattern: Option<&str>,
    ) -> Self {
        self.insert(
            prefix,
            PrefixRecord {
                uri_prefix: uri_prefix.map(str::to_string),
                pattern: pattern.map(str::to_string),
            },
        );
        self
    }

    /// Insert or replace the record for `prefix`.
    pub fn insert(&mut self, prefix: impl Into<Prefix>, record: PrefixRecord) {
        self.records.insert(prefix.into(), record);
    }

    /// Authority seeded with the namespaces the curated tables use, plus the built-ins.
    pub fn bundled() -> Self {
        let mut authority = Self::new();
        for (prefix, uri_prefix) in BUILTIN_PREFIXES {
            authority.insert(
                prefix,
                PrefixRecord {
                    uri_prefix: Some(uri_prefix.to_string()),
                    pattern: None,
                },
            );
        }
        authority
            .with_prefix(
                "orcid",
                Some("https://orcid.org/"),
                Some(r"^\d{4}-\d{4}-\d{4}-\d{3}(\d|X)$"),
            )
            .with_prefix(
                "OMO",
                Some("http://purl.obolibrary.org/obo/OMO_"),
                Some(r"^\d{7}$"),
            )
            .with_prefix(
                "hgnc",
                Some("https://identifiers.org/hgnc:"),
                Some(r"^\d{1,5}$"),
            )
            .with_prefix(
                "sgd",
                Some("https://www.yeastgenome.org/locus/"),
                Some(r"^((S\d+$)|(Y[A-Z]{2}\d{3}[a-zA-Z](\-[A-Z])?))$"),
            )
            .with_prefix(
                "pubmed",
                Some("https://www.ncbi.nlm.nih.gov/pubmed/"),
                Some(r"^\d+$"),
            )
            .with_prefix(
                "doi",
                Some("https://doi.org/"),
                Some(r"^10.\d{2,9}/.*$"),
            )
            .with_prefix(
                "chebi",
                Some("http://purl.obolibrary.org/obo/CHEBI_"),
                Some(r"^\d+$"),
            )
            .with_prefix(
                "go",
                Some("http://purl.obolibrary.org/obo/GO_"),
                Some(r"^\d{7}$"),
            )
            .with_prefix(
                "doid",
                Some("http://purl.obolibrary.org/obo/DOID_"),
                Some(r"^\d+$"),
            )
            .with_prefix(
                "mesh",
                Some("http://id.nlm.nih.gov/mesh/"),
                Some(r"^(C|D|M|Q)\d{6,9}$"),
            )
            .with_prefix(
                "ncbitaxon",
                Some("http://purl.obolibrary.org/obo/NCBITaxon_"),
                Some(r"^\d+$"),
            )
            .with_prefix(
                "fplx",
                Some("https://identifiers.org/fplx:"),
                Some(r"^[a-zA-Z0-9][A-Za-z0-9_]+$"),
            )
            .with_prefix(
                "uniprot",
                Some("http://purl.uniprot.org/uniprot/"),
                None,
            )
    }

    /// Load `{"prefix": {"uri_prefix": ..., "pattern": ...}}` entries from JSON.
    pub fn from_json_file(path: &Path) -> Result<Self, SynonymError> {
        let records: IndexMap<Prefix, PrefixRecord> = serde_json::from_str(&read_text(path)?)?;
        Ok(Self { records })
    }

    /// Add every entry of `other`, replacing existing ones.
    pub fn extend(&mut self, other: InMemoryPrefixAuthority) {
        self.records.extend(other.records);
    }
}

impl PrefixAuthority for InMemoryPrefixAuthority {
    fn lookup(&self, prefix: &str) -> Option<PrefixRecord> {
        self.records.get(prefix).cloned()
    }

    fn normalize_prefix(&self, prefix: &str) -> Option<Prefix> {
        if self.records.contains_key(prefix) {
            return Some(prefix.to_string());
        }
        let folded = casefold(prefix);
        self.records
            .keys()
            .find(|candidate| casefold(candidate) == folded)
            .cloned()
    }
}

/// Prefix declarations of a document, sorted case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixMap {
    entries: Vec<(Prefix, UriPrefix)>,
}

impl PrefixMap {
    fn from_unsorted(map: HashMap<Prefix, UriPrefix>) -> Self {
        let mut entries: Vec<(Prefix, UriPrefix)> = map.into_iter().collect();
        entries.sort_by_cached_key(|(prefix, _)| (casefold(prefix), prefix.clone()));
        Self { entries }
    }

    /// URI prefix declared for `prefix`.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == prefix)
            .map(|(_, uri_prefix)| uri_prefix.as_str())
    }

    /// Full URI of `reference`, if its prefix is declared.
    pub fn expand(&self, reference: &Reference) -> Option<String> {
        self.get(&reference.prefix)
            .map(|uri_prefix| format!("{uri_prefix}{}", reference.identifier))
    }

    /// Declarations in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(prefix, uri_prefix)| (prefix.as_str(), uri_prefix.as_str()))
    }

    /// Number of declared prefixes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every prefix used by any reference, predicate, type, citation, or curator.
pub fn collect_prefixes(groups: &ReferenceGroups) -> BTreeSet<Prefix> {
    let mut prefixes = BTreeSet::new();
    for (reference, records) in groups {
        prefixes.insert(reference.prefix.clone());
        for record in records {
            prefixes.insert(record.reference.prefix().to_string());
            prefixes.insert(record.predicate.reference().prefix);
            if let Some(synonym_type) = &record.synonym_type {
                prefixes.insert(synonym_type.prefix.clone());
            }
            for citation in &record.provenance {
                prefixes.insert(citation.prefix.clone());
            }
            if let Some(contributor) = &record.contributor {
                prefixes.insert(contributor.prefix.clone());
            }
        }
    }
    prefixes
}

/// Resolve each prefix to a URI base.
///
/// Explicit overrides win, then the built-in set, then the authority. A prefix
/// the authority does not know, or knows without a URI expansion, fails the
/// whole resolution. The result also carries every built-in and override.
pub fn resolve_prefix_map(
    prefixes: &BTreeSet<Prefix>,
    authority: &dyn PrefixAuthority,
    overrides: Option<&HashMap<Prefix, UriPrefix>>,
) -> Result<PrefixMap, SynonymError> {
    let mut resolved: HashMap<Prefix, UriPrefix> = BUILTIN_PREFIXES
        .iter()
        .map(|(prefix, uri_prefix)| (prefix.to_string(), uri_prefix.to_string()))
        .collect();

    for prefix in prefixes {
        if overrides.is_some_and(|overrides| overrides.contains_key(prefix))
            || resolved.contains_key(prefix)
        {
            continue;
        }
        let record = authority
            .lookup(prefix)
            .ok_or_else(|| SynonymError::UnresolvedPrefix {
                prefix: prefix.clone(),
                reason: "not registered with the prefix authority".to_string(),
            })?;
        let uri_prefix = record
            .uri_prefix
            .ok_or_else(|| SynonymError::UnresolvedPrefix {
                prefix: prefix.clone(),
                reason: "registered without a URI expansion".to_string(),
            })?;
        debug!("[biosynonyms] resolved prefix {prefix} -> {uri_prefix}");
        resolved.insert(prefix.clone(), uri_prefix);
    }

    if let Some(overrides) = overrides {
        for (prefix, uri_prefix) in overrides {
            resolved.insert(prefix.clone(), uri_prefix.clone());
        }
    }
    Ok(PrefixMap::from_unsorted(resolved))
}
