use indexmap::IndexMap;

/// Compact URI of the form `prefix:identifier`.
/// Examples: `hgnc:11892`, `oboInOwl:hasExactSynonym`, `orcid:0000-0003-4423-4370`
pub type Curie = String;
/// Namespace prefix of a CURIE.
/// Examples: `hgnc`, `OMO`, `pubmed`
pub type Prefix = String;
/// Local identifier of a CURIE within its namespace.
/// Examples: `11892`, `0003000`, `S000000019`
pub type Identifier = String;
/// URI base that a prefix expands to.
/// Example: `http://purl.obolibrary.org/obo/OMO_`
pub type UriPrefix = String;
/// Two-letter language code attached to synonym text.
/// Examples: `en`, `de`
pub type LanguageCode = String;
/// Flat, header-keyed view of one table row.
/// Example: `{"text": "TNF-alpha", "curie": "hgnc:11892", ...}`
pub type Row = IndexMap<String, String>;
/// Human-readable lint finding.
/// Example: `positives.tsv:12: identifier 'abc' does not match pattern ^\d+$`
pub type LintMessage = String;
