//! CURIE-backed references to entities, predicates, citations, and curators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SynonymError;
use crate::types::{Curie, Identifier, Prefix};

/// A `prefix:identifier` pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    /// Namespace prefix, kept in the case it was written.
    pub prefix: Prefix,
    /// Local identifier within the namespace.
    pub identifier: Identifier,
}

impl Reference {
    /// Create a reference without validating either part.
    pub fn new(prefix: impl Into<Prefix>, identifier: impl Into<Identifier>) -> Self {
        Self {
            prefix: prefix.into(),
            identifier: identifier.into(),
        }
    }

    /// Parse a CURIE, splitting on the first colon.
    ///
    /// Both parts must be non-empty and free of whitespace.
    pub fn from_curie(curie: &str) -> Result<Self, SynonymError> {
        let malformed = || SynonymError::MalformedReference {
            curie: curie.to_string(),
        };
        let (prefix, identifier) = curie.split_once(':').ok_or_else(malformed)?;
        if prefix.is_empty()
            || identifier.is_empty()
            || curie.chars().any(char::is_whitespace)
        {
            return Err(malformed());
        }
        Ok(Self::new(prefix, identifier))
    }

    /// Render as `prefix:identifier`.
    pub fn curie(&self) -> Curie {
        format!("{}:{}", self.prefix, self.identifier)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.identifier)
    }
}

impl FromStr for Reference {
    type Err = SynonymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_curie(s)
    }
}

/// A reference paired with a human-readable display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedReference {
    /// The underlying CURIE.
    pub reference: Reference,
    /// Display name; may be empty for records built by hand.
    pub name: String,
}

impl NamedReference {
    /// Pair `reference` with `name`.
    pub fn new(reference: Reference, name: impl Into<String>) -> Self {
        Self {
            reference,
            name: name.into(),
        }
    }

    /// Parse the CURIE and attach `name`.
    pub fn from_curie(curie: &str, name: impl Into<String>) -> Result<Self, SynonymError> {
        Ok(Self::new(Reference::from_curie(curie)?, name))
    }

    /// Namespace prefix.
    pub fn prefix(&self) -> &str {
        &self.reference.prefix
    }

    /// Local identifier.
    pub fn identifier(&self) -> &str {
        &self.reference.identifier
    }

    /// Render as `prefix:identifier`.
    pub fn curie(&self) -> Curie {
        self.reference.curie()
    }
}

/// Split a comma-joined CURIE list, trimming segments and dropping empty ones.
pub fn parse_curie_list(raw: &str) -> Result<Vec<Reference>, SynonymError> {
    raw.split(crate::constants::columns::LIST_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(Reference::from_curie)
        .collect()
}
