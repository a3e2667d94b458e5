/// Column headers of the persisted synonym tables.
pub mod columns {
    /// Synonym surface text.
    pub const TEXT: &str = "text";
    /// CURIE of the entity the text denotes.
    pub const CURIE: &str = "curie";
    /// Display name of the entity.
    pub const NAME: &str = "name";
    /// Synonym predicate CURIE.
    pub const PREDICATE: &str = "predicate";
    /// Optional OMO synonym-type CURIE.
    pub const TYPE: &str = "type";
    /// Comma-joined provenance CURIEs.
    pub const PROVENANCE: &str = "provenance";
    /// Curator CURIE.
    pub const CONTRIBUTOR: &str = "contributor";
    /// Curation date (`YYYY-MM-DD`).
    pub const DATE: &str = "date";
    /// Two-letter language code.
    pub const LANGUAGE: &str = "language";
    /// Free-text curator comment.
    pub const COMMENT: &str = "comment";
    /// Free-text source label.
    pub const SOURCE: &str = "source";

    /// Column order of the positives table.
    pub const POSITIVE_COLUMNS: [&str; 11] = [
        TEXT,
        CURIE,
        NAME,
        PREDICATE,
        TYPE,
        PROVENANCE,
        CONTRIBUTOR,
        DATE,
        LANGUAGE,
        COMMENT,
        SOURCE,
    ];
    /// Column order of the negatives table.
    pub const NEGATIVE_COLUMNS: [&str; 5] = [TEXT, CURIE, NAME, PROVENANCE, CONTRIBUTOR];

    /// Stop-word table header.
    pub const STOP_WORD_COLUMNS: [&str; 2] = ["text", "curator_orcid"];

    /// Default cell delimiter.
    pub const DEFAULT_DELIMITER: char = '\t';
    /// Separator used inside the provenance cell.
    pub const LIST_DELIMITER: char = ',';
    /// Joiner used when writing the provenance cell.
    pub const LIST_JOINER: &str = ",";
}

/// Namespaces and CURIEs of the synonym vocabulary.
pub mod vocabulary {
    /// Prefix of the OBO Metadata Ontology (synonym types).
    pub const OMO_PREFIX: &str = "OMO";
    /// Prefix of the curator identity authority.
    pub const ORCID_PREFIX: &str = "orcid";
    /// Prefix of the oboInOwl synonym predicates.
    pub const OBO_IN_OWL_PREFIX: &str = "oboInOwl";
    /// Identifier of the `previous name` synonym type.
    pub const PREVIOUS_NAME_ID: &str = "0003008";
    /// Identifier of the `plural form` synonym type.
    pub const PLURAL_FORM_ID: &str = "0003004";
}

/// Constants shared with the lexical matcher term model.
pub mod matcher {
    /// Term source used when a record carries no `source` of its own.
    pub const DEFAULT_TERM_SOURCE: &str = "biosynonyms";
}

/// Remote table retrieval defaults.
pub mod fetch {
    /// URL schemes that select network retrieval over the filesystem.
    pub const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];
    /// Default GET timeout.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
}

/// Constants used by the OWL/Turtle serializer.
pub mod ontology {
    /// Prefixes every document declares regardless of content.
    pub const BUILTIN_PREFIXES: [(&str, &str); 8] = [
        ("dcterms", "http://purl.org/dc/terms/"),
        ("oboInOwl", "http://www.geneontology.org/formats/oboInOwl#"),
        ("OMO", "http://purl.obolibrary.org/obo/OMO_"),
        ("orcid", "https://orcid.org/"),
        ("owl", "http://www.w3.org/2002/07/owl#"),
        ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
        ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ];
    /// Extension that selects gzip-compressed output.
    pub const GZIP_EXTENSION: &str = "gz";
}

/// Default resource locations and environment overrides.
pub mod resources {
    /// Default positives table path.
    pub const DEFAULT_POSITIVES_PATH: &str = "data/positives.tsv";
    /// Default negatives table path.
    pub const DEFAULT_NEGATIVES_PATH: &str = "data/negatives.tsv";
    /// Default stop-word table path.
    pub const DEFAULT_STOP_WORDS_PATH: &str = "data/unentities.tsv";
    /// Environment override for the positives path.
    pub const ENV_POSITIVES: &str = "BIOSYNONYMS_POSITIVES";
    /// Environment override for the negatives path.
    pub const ENV_NEGATIVES: &str = "BIOSYNONYMS_NEGATIVES";
    /// Environment override for the stop-word path.
    pub const ENV_STOP_WORDS: &str = "BIOSYNONYMS_STOP_WORDS";
    /// Environment override for the fetch timeout in seconds.
    pub const ENV_FETCH_TIMEOUT_SECS: &str = "BIOSYNONYMS_FETCH_TIMEOUT_SECS";
}
