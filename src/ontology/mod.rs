//! OWL export of grouped synonym records in Turtle.
//!
//! Each entity becomes an `owl:Class` carrying its label and one annotation
//! triple per synonym. Records with curation metadata additionally get an
//! `owl:Axiom` block reifying that triple. Prefix resolution happens before
//! any output is produced, so an unknown namespace never leaves a partial
//! document behind.

/// Prefix authorities and resolved prefix maps.
pub mod prefixes;

use flate2::Compression;
use flate2::write::GzEncoder;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::collection::{ReferenceGroups, group_by_reference};
use crate::constants::ontology::GZIP_EXTENSION;
use crate::errors::SynonymError;
use crate::metadata::OntologyMetadata;
use crate::record::{DATE_FORMAT, SynonymRecord, escape_turtle_string};
use crate::reference::Reference;
use crate::types::{Prefix, UriPrefix};
use crate::vocabulary::{SYNONYM_TYPES, SynonymPredicate, synonym_type};

pub use prefixes::{
    InMemoryPrefixAuthority, PrefixAuthority, PrefixMap, PrefixRecord, collect_prefixes,
    resolve_prefix_map,
};

/// Annotation properties used on axioms, with their labels.
const AXIOM_PROPERTIES: [(&str, &str); 6] = [
    ("oboInOwl:hasSynonymType", "has synonym type"),
    ("oboInOwl:hasDbXref", "has database cross-reference"),
    ("dcterms:contributor", "contributor"),
    ("dcterms:date", "date"),
    ("dcterms:source", "source"),
    ("rdfs:comment", "comment"),
];

/// Render `groups` as a Turtle document into `out`.
pub fn render<W: Write>(
    groups: &ReferenceGroups,
    metadata: &OntologyMetadata,
    prefix_map: &PrefixMap,
    out: &mut W,
) -> Result<(), SynonymError> {
    // Prefixes that are not legal Turtle names are only used through full IRIs.
    for (prefix, uri_prefix) in prefix_map
        .iter()
        .filter(|(prefix, _)| is_prefix_name_safe(prefix))
    {
        writeln!(out, "@prefix {prefix}: <{uri_prefix}> .")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", metadata.render_turtle())?;
    write_preamble(out)?;

    for (reference, records) in groups {
        write_class(reference, records, prefix_map, out)?;
    }
    Ok(())
}

fn write_preamble<W: Write>(out: &mut W) -> Result<(), SynonymError> {
    for predicate in SynonymPredicate::ALL {
        writeln!(
            out,
            "{} a owl:AnnotationProperty ;\n    rdfs:label \"{}\" .",
            predicate.curie(),
            predicate.label()
        )?;
    }
    for (property, label) in AXIOM_PROPERTIES {
        writeln!(
            out,
            "{property} a owl:AnnotationProperty ;\n    rdfs:label \"{label}\" ."
        )?;
    }
    writeln!(
        out,
        "oboInOwl:SynonymTypeProperty a owl:AnnotationProperty ;\n    rdfs:label \"synonym type property\" ."
    )?;
    for (identifier, label) in SYNONYM_TYPES {
        writeln!(
            out,
            "{} a owl:AnnotationProperty ;\n    rdfs:label \"{label}\" ;\n    rdfs:subPropertyOf oboInOwl:SynonymTypeProperty .",
            synonym_type(identifier).curie()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_class<W: Write>(
    reference: &Reference,
    records: &[SynonymRecord],
    prefix_map: &PrefixMap,
    out: &mut W,
) -> Result<(), SynonymError> {
    let subject = node(reference, prefix_map)?;
    let mut statements = vec!["a owl:Class".to_string()];
    if let Some(name) = records
        .iter()
        .map(|record| record.reference.name.as_str())
        .find(|name| !name.is_empty())
    {
        statements.push(format!("rdfs:label \"{}\"", escape_turtle_string(name)));
    }
    for record in records {
        statements.push(format!(
            "{} {}",
            record.predicate.curie(),
            record.render_literal(true)
        ));
    }
    writeln!(out, "{subject} {} .\n", statements.join(" ;\n    "))?;

    for record in records.iter().filter(|record| record.has_annotations()) {
        write_axiom(&subject, record, prefix_map, out)?;
    }
    Ok(())
}

fn write_axiom<W: Write>(
    subject: &str,
    record: &SynonymRecord,
    prefix_map: &PrefixMap,
    out: &mut W,
) -> Result<(), SynonymError> {
    let mut statements = vec![
        "a owl:Axiom".to_string(),
        format!("owl:annotatedSource {subject}"),
        format!("owl:annotatedProperty {}", record.predicate.curie()),
        format!("owl:annotatedTarget {}", record.render_literal(true)),
    ];
    if let Some(contributor) = &record.contributor {
        statements.push(format!(
            "dcterms:contributor {}",
            node(contributor, prefix_map)?
        ));
    }
    if let Some(date) = &record.date {
        statements.push(format!(
            "dcterms:date \"{}\"^^xsd:date",
            date.format(DATE_FORMAT)
        ));
    }
    if let Some(source) = &record.source {
        statements.push(format!("dcterms:source \"{}\"", escape_turtle_string(source)));
    }
    if let Some(synonym_type) = &record.synonym_type {
        statements.push(format!(
            "oboInOwl:hasSynonymType {}",
            node(synonym_type, prefix_map)?
        ));
    }
    if !record.provenance.is_empty() {
        let citations = record
            .provenance
            .iter()
            .map(|citation| node(citation, prefix_map))
            .collect::<Result<Vec<_>, _>>()?;
        statements.push(format!("oboInOwl:hasDbXref {}", citations.join(", ")));
    }
    if let Some(comment) = &record.comment {
        statements.push(format!("rdfs:comment \"{}\"", escape_turtle_string(comment)));
    }
    writeln!(out, "[\n    {}\n] .\n", statements.join(" ;\n    "))?;
    Ok(())
}

/// Turtle term for a reference: a prefixed name when legal, a full IRI otherwise.
fn node(reference: &Reference, prefix_map: &PrefixMap) -> Result<String, SynonymError> {
    if is_prefixed_name_safe(reference) && prefix_map.get(&reference.prefix).is_some() {
        return Ok(reference.curie());
    }
    let uri = prefix_map
        .expand(reference)
        .ok_or_else(|| SynonymError::UnresolvedPrefix {
            prefix: reference.prefix.clone(),
            reason: "missing from the prefix map".to_string(),
        })?;
    Ok(format!("<{}>", escape_iri(&uri)))
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.')
}

fn is_prefix_name_safe(prefix: &str) -> bool {
    prefix.starts_with(|ch: char| ch.is_ascii_alphabetic())
        && prefix.chars().all(is_name_char)
        && !prefix.ends_with('.')
}

fn is_prefixed_name_safe(reference: &Reference) -> bool {
    let local = &reference.identifier;
    is_prefix_name_safe(&reference.prefix)
        && !local.is_empty()
        && local.chars().all(is_name_char)
        && !local.starts_with(['-', '.'])
        && !local.ends_with('.')
}

fn escape_iri(uri: &str) -> String {
    let mut escaped = String::with_capacity(uri.len());
    for ch in uri.chars() {
        if matches!(ch, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') || ch <= ' ' {
            let mut buffer = [0u8; 4];
            for byte in ch.encode_utf8(&mut buffer).bytes() {
                escaped.push_str(&format!("%{byte:02X}"));
            }
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

/// Write `records` as an OWL ontology in Turtle at `path`.
///
/// A path ending in `.gz` is gzip-compressed. Prefixes are resolved through
/// `authority` unless listed in `overrides`; any failure leaves `path` untouched.
pub fn write_owl_ttl(
    records: &[SynonymRecord],
    path: &Path,
    metadata: &OntologyMetadata,
    authority: &dyn PrefixAuthority,
    overrides: Option<&HashMap<Prefix, UriPrefix>>,
) -> Result<(), SynonymError> {
    let groups = group_by_reference(records.iter().cloned());
    let prefix_map = resolve_prefix_map(&collect_prefixes(&groups), authority, overrides)?;

    let mut document = Vec::new();
    render(&groups, metadata, &prefix_map, &mut document)?;

    let compressed = path
        .extension()
        .is_some_and(|extension| extension == GZIP_EXTENSION);
    let bytes = if compressed {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&document)?;
        encoder.finish()?
    } else {
        document
    };
    crate::transport::fs::write_whole(path, &bytes)?;
    info!(
        "[biosynonyms] wrote {} classes ({} synonyms) -> {}",
        groups.len(),
        records.len(),
        path.display()
    );
    Ok(())
}
