use std::collections::HashMap;

use chrono::NaiveDate;
use tempfile::tempdir;

use biosynonyms::lint::sort_table;
use biosynonyms::vocabulary::{plural_form, previous_name};
use biosynonyms::{
    NamedReference, Reference, SynonymError, SynonymPredicate, SynonymRecord, TableLayout,
    TermStatus, group_by_reference, parse_table, write_table,
};

fn curated(text: &str, curie: &str, name: &str) -> SynonymRecord {
    SynonymRecord::new(text, NamedReference::from_curie(curie, name).unwrap())
        .with_predicate(SynonymPredicate::HasExactSynonym)
        .with_contributor(Reference::new("orcid", "0000-0003-4423-4370"))
}

fn fixture() -> Vec<SynonymRecord> {
    vec![
        curated("TNF-alpha", "hgnc:11892", "TNF")
            .with_provenance([Reference::new("pubmed", "1"), Reference::new("pubmed", "2")])
            .with_date(NaiveDate::from_ymd_opt(2023, 5, 10).unwrap())
            .with_language("en"),
        curated("cachectin", "hgnc:11892", "TNF")
            .with_predicate(SynonymPredicate::HasRelatedSynonym)
            .with_type(previous_name())
            .with_comment("historical"),
        curated("YAL021C", "sgd:S000000019", "CCR4").with_source("SGD"),
        curated("Mitochondria", "go:0005739", "mitochondrion").with_type(plural_form()),
    ]
}

#[test]
fn write_then_parse_preserves_every_field() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("positives.tsv");
    let records = fixture();
    write_table(&records, &path, TableLayout::Positive).unwrap();

    let parsed = parse_table(path.as_path(), None, None).unwrap();
    assert_eq!(parsed.len(), records.len());
    for record in &records {
        assert!(parsed.contains(record), "lost {record:?}");
    }
    let texts: Vec<&str> = parsed.iter().map(|record| record.text.as_str()).collect();
    assert_eq!(texts, vec!["cachectin", "Mitochondria", "TNF-alpha", "YAL021C"]);
}

#[test]
fn write_order_is_independent_of_input_order() {
    let temp = tempdir().unwrap();
    let forward = temp.path().join("forward.tsv");
    let backward = temp.path().join("backward.tsv");
    let mut records = fixture();
    write_table(&records, &forward, TableLayout::Positive).unwrap();
    records.reverse();
    write_table(&records, &backward, TableLayout::Positive).unwrap();
    assert_eq!(
        std::fs::read_to_string(&forward).unwrap(),
        std::fs::read_to_string(&backward).unwrap()
    );

    let before = std::fs::read_to_string(&forward).unwrap();
    sort_table(&forward, TableLayout::Positive).unwrap();
    assert_eq!(std::fs::read_to_string(&forward).unwrap(), before);
}

#[test]
fn name_lookup_takes_priority_over_cells() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("positives.tsv");
    std::fs::write(
        &path,
        "text\tcurie\tname\nTNF-alpha\thgnc:11892\tstale\nCCR4-NOT\tsgd:S000000019\t\n",
    )
    .unwrap();
    let mut names = HashMap::new();
    names.insert(Reference::new("hgnc", "11892"), "TNF".to_string());

    let parsed = parse_table(path.as_path(), None, Some(&names)).unwrap();
    assert_eq!(parsed[0].name(), "TNF");
    assert_eq!(parsed[1].name(), "CCR4-NOT");
    assert_eq!(parsed[1].predicate, SynonymPredicate::HasSynonym);
}

#[test]
fn one_bad_row_fails_the_whole_load() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("positives.tsv");
    std::fs::write(
        &path,
        "text\tcurie\tname\nTNF-alpha\thgnc:11892\tTNF\nbroken\tno-colon\tX\n",
    )
    .unwrap();
    let err = parse_table(path.as_path(), None, None).unwrap_err();
    assert!(matches!(err, SynonymError::MalformedReference { curie } if curie == "no-colon"));
}

#[test]
fn plural_synonyms_lose_scope_through_the_matcher() {
    let record = fixture().pop().unwrap();
    let term = record.to_matcher_term().unwrap();
    assert_eq!(term.status, TermStatus::Synonym);

    let restored = SynonymRecord::from_matcher_term(&term);
    assert_eq!(restored.text, record.text);
    assert_eq!(restored.curie(), record.curie());
    assert_ne!(restored.predicate, record.predicate);
    assert_eq!(restored.synonym_type, None);
}

#[test]
fn grouping_keeps_first_seen_entities_and_record_order() {
    let groups = group_by_reference(fixture());
    let keys: Vec<String> = groups.keys().map(Reference::curie).collect();
    assert_eq!(keys, vec!["hgnc:11892", "sgd:S000000019", "go:0005739"]);
    let texts: Vec<&str> = groups[0].iter().map(|record| record.text.as_str()).collect();
    assert_eq!(texts, vec!["TNF-alpha", "cachectin"]);
}
