use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::SynonymError;
use crate::record::escape_turtle_string;
use crate::transport::fs::read_text;

/// Ontology IRI of the published export.
pub const DEFAULT_ONTOLOGY_URI: &str = "https://w3id.org/biopragmatics/resources/biosynonyms.ttl";

/// Ontology-level header of an exported document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyMetadata {
    /// Ontology IRI.
    pub uri: String,
    /// `dcterms:title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `dcterms:description`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// License IRI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// `owl:versionInfo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// One `rdfs:comment` each.
    #[serde(default)]
    pub comments: Vec<String>,
}

impl Default for OntologyMetadata {
    fn default() -> Self {
        Self {
            uri: DEFAULT_ONTOLOGY_URI.to_string(),
            title: Some("Biosynonyms in OWL".to_string()),
            description: Some(
                "An ontology representation of community curated synonyms in Biosynonyms"
                    .to_string(),
            ),
            license: Some("https://creativecommons.org/publicdomain/zero/1.0/".to_string()),
            version: None,
            comments: vec!["Built by https://github.com/biopragmatics/biosynonyms".to_string()],
        }
    }
}

impl OntologyMetadata {
    /// Load metadata from a JSON file; missing optional fields stay absent.
    pub fn from_json_file(path: &Path) -> Result<Self, SynonymError> {
        Ok(serde_json::from_str(&read_text(path)?)?)
    }

    /// Turtle block declaring the ontology and its annotations.
    pub fn render_turtle(&self) -> String {
        let mut statements = vec!["a owl:Ontology".to_string()];
        if let Some(title) = &self.title {
            statements.push(format!("dcterms:title \"{}\"", escape_turtle_string(title)));
        }
        if let Some(description) = &self.description {
            statements.push(format!(
                "dcterms:description \"{}\"",
                escape_turtle_string(description)
            ));
        }
        if let Some(license) = &self.license {
            statements.push(format!("dcterms:license <{license}>"));
        }
        if let Some(version) = &self.version {
            statements.push(format!("owl:versionInfo \"{}\"", escape_turtle_string(version)));
        }
        for comment in &self.comments {
            statements.push(format!("rdfs:comment \"{}\"", escape_turtle_string(comment)));
        }
        format!("<{}> {} .\n", self.uri, statements.join(" ;\n    "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_metadata_renders_every_field() {
        let rendered = OntologyMetadata::default().render_turtle();
        assert!(rendered.starts_with(&format!("<{DEFAULT_ONTOLOGY_URI}> a owl:Ontology ;")));
        assert!(rendered.contains("dcterms:title \"Biosynonyms in OWL\""));
        assert!(rendered.contains("dcterms:license <https://creativecommons.org/publicdomain/zero/1.0/>"));
        assert!(rendered.contains("rdfs:comment \"Built by"));
        assert!(rendered.ends_with(" .\n"));
        assert!(!rendered.contains("owl:versionInfo"));
    }

    #[test]
    fn minimal_metadata_is_just_a_declaration() {
        let metadata = OntologyMetadata {
            uri: "https://example.org/x.ttl".into(),
            title: None,
            description: None,
            license: None,
            version: None,
            comments: Vec::new(),
        };
        assert_eq!(
            metadata.render_turtle(),
            "<https://example.org/x.ttl> a owl:Ontology .\n"
        );
    }

    #[test]
    fn loads_from_json() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("metadata.json");
        std::fs::write(
            &path,
            r#"{"uri": "https://example.org/x.ttl", "title": "X", "version": "2024-01-01"}"#,
        )
        .unwrap();
        let metadata = OntologyMetadata::from_json_file(&path).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("X"));
        assert_eq!(metadata.version.as_deref(), Some("2024-01-01"));
        assert!(metadata.comments.is_empty());
        assert!(metadata.render_turtle().contains("owl:versionInfo \"2024-01-01\""));
    }
}
