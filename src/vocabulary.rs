//! Synonym predicates and the OMO synonym-type vocabulary.

use serde::{Deserialize, Serialize};

use crate::constants::vocabulary::{OMO_PREFIX, PLURAL_FORM_ID, PREVIOUS_NAME_ID};
use crate::errors::SynonymError;
use crate::reference::Reference;

/// Relation between an entity and one of its texts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynonymPredicate {
    /// Primary name (`rdfs:label`), not a synonym.
    HasLabel,
    /// Same meaning as the name.
    HasExactSynonym,
    /// Narrower than the entity.
    HasNarrowSynonym,
    /// Broader than the entity.
    HasBroadSynonym,
    /// Related but not equivalent.
    HasRelatedSynonym,
    /// Unscoped synonym.
    #[default]
    HasSynonym,
}

impl SynonymPredicate {
    /// Every supported predicate, in preamble order.
    pub const ALL: [SynonymPredicate; 6] = [
        SynonymPredicate::HasLabel,
        SynonymPredicate::HasExactSynonym,
        SynonymPredicate::HasNarrowSynonym,
        SynonymPredicate::HasBroadSynonym,
        SynonymPredicate::HasRelatedSynonym,
        SynonymPredicate::HasSynonym,
    ];

    /// CURIE written in tables and ontology output.
    pub const fn curie(&self) -> &'static str {
        match self {
            SynonymPredicate::HasLabel => "rdfs:label",
            SynonymPredicate::HasExactSynonym => "oboInOwl:hasExactSynonym",
            SynonymPredicate::HasNarrowSynonym => "oboInOwl:hasNarrowSynonym",
            SynonymPredicate::HasBroadSynonym => "oboInOwl:hasBroadSynonym",
            SynonymPredicate::HasRelatedSynonym => "oboInOwl:hasRelatedSynonym",
            SynonymPredicate::HasSynonym => "oboInOwl:hasSynonym",
        }
    }

    /// Human-readable label used in the ontology preamble.
    pub const fn label(&self) -> &'static str {
        match self {
            SynonymPredicate::HasLabel => "label",
            SynonymPredicate::HasExactSynonym => "has exact synonym",
            SynonymPredicate::HasNarrowSynonym => "has narrow synonym",
            SynonymPredicate::HasBroadSynonym => "has broad synonym",
            SynonymPredicate::HasRelatedSynonym => "has related synonym",
            SynonymPredicate::HasSynonym => "has synonym",
        }
    }

    /// The predicate as a [`Reference`].
    pub fn reference(&self) -> Reference {
        // Static CURIEs always contain a colon.
        let (prefix, identifier) = self.curie().split_once(':').unwrap_or_default();
        Reference::new(prefix, identifier)
    }

    /// Look up a predicate by CURIE, `None` for anything outside the supported set.
    pub fn from_curie(curie: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|predicate| predicate.curie() == curie)
    }

    /// Parse a predicate cell, rejecting malformed or unsupported CURIEs.
    pub fn parse(curie: &str) -> Result<Self, SynonymError> {
        let reference = Reference::from_curie(curie)?;
        Self::from_curie(&reference.curie()).ok_or_else(|| {
            SynonymError::invalid(curie, format!("unsupported synonym predicate '{curie}'"))
        })
    }
}

/// Known OMO synonym types as `(identifier, label)`.
pub const SYNONYM_TYPES: [(&str, &str); 13] = [
    ("0003000", "abbreviation"),
    ("0003001", "ambiguous synonym"),
    ("0003002", "dubious synonym"),
    ("0003003", "layperson synonym"),
    (PLURAL_FORM_ID, "plural form"),
    ("0003005", "UK spelling synonym"),
    ("0003006", "misspelling"),
    ("0003007", "misnomer"),
    (PREVIOUS_NAME_ID, "previous name"),
    ("0003009", "legal name"),
    ("0003010", "International Nonproprietary Name"),
    ("0003011", "latin term"),
    ("0003012", "acronym"),
];

/// Reference to a synonym type by OMO identifier.
pub fn synonym_type(identifier: &str) -> Reference {
    Reference::new(OMO_PREFIX, identifier)
}

/// `OMO:0003008`, previous name.
pub fn previous_name() -> Reference {
    synonym_type(PREVIOUS_NAME_ID)
}

/// `OMO:0003004`, plural form.
pub fn plural_form() -> Reference {
    synonym_type(PLURAL_FORM_ID)
}

/// Label of a known synonym type.
pub fn synonym_type_label(reference: &Reference) -> Option<&'static str> {
    if reference.prefix != OMO_PREFIX {
        return None;
    }
    SYNONYM_TYPES
        .iter()
        .find(|(identifier, _)| *identifier == reference.identifier)
        .map(|(_, label)| *label)
}
