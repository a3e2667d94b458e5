use std::collections::HashSet;
use std::path::{Path, PathBuf};

use biosynonyms::codec::render_table;
use biosynonyms::lint::{lint_stop_words, lint_table};
use biosynonyms::utils::casefold;
use biosynonyms::{
    InMemoryPrefixAuthority, LexicalMatcher, ResourceConfig, SynonymPredicate, TableLayout,
    TermStatus, duplicate_keys, get_grounder, get_negative_synonyms, get_positive_synonyms,
    load_unentities, read_table,
};

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn bundled_config() -> ResourceConfig {
    ResourceConfig::default()
        .with_positives(data_path("positives.tsv").to_string_lossy())
        .with_negatives(data_path("negatives.tsv").to_string_lossy())
        .with_stop_words(data_path("unentities.tsv"))
}

#[test]
fn bundled_tables_pass_lint() {
    let authority = InMemoryPrefixAuthority::bundled();
    for (name, layout) in [
        ("positives.tsv", TableLayout::Positive),
        ("negatives.tsv", TableLayout::Negative),
    ] {
        let report = lint_table(&data_path(name), layout, &authority).unwrap();
        assert!(report.is_clean(), "{:?}", report.messages());
    }
    let report = lint_stop_words(&data_path("unentities.tsv"), &authority).unwrap();
    assert!(report.is_clean(), "{:?}", report.messages());
}

#[test]
fn bundled_tables_are_already_canonical() {
    for (name, layout) in [
        ("positives.tsv", TableLayout::Positive),
        ("negatives.tsv", TableLayout::Negative),
    ] {
        let text = std::fs::read_to_string(data_path(name)).unwrap();
        let records = read_table(&text, '\t', None).unwrap();
        assert_eq!(render_table(&records, layout, '\t').unwrap(), text, "{name}");
    }
}

#[test]
fn bundled_positives_are_unique_and_named() {
    let config = bundled_config();
    let positives = get_positive_synonyms(&config).unwrap();
    assert!(!positives.is_empty());
    assert!(duplicate_keys(&positives).is_empty());
    assert!(positives.iter().all(|record| !record.name().is_empty()));
    assert!(!get_negative_synonyms(&config).unwrap().is_empty());
}

#[test]
fn stop_words_never_collide_with_positive_texts() {
    let config = bundled_config();
    let stop_words: HashSet<String> = load_unentities(&config)
        .unwrap()
        .iter()
        .map(|text| casefold(text))
        .collect();
    for record in get_positive_synonyms(&config).unwrap() {
        assert!(
            !stop_words.contains(&casefold(&record.text)),
            "{} is also a stop word",
            record.text
        );
    }
}

#[test]
fn bundled_grounder_resolves_curated_texts() {
    let grounder = get_grounder(&bundled_config()).unwrap();

    let matches = grounder.get_matches("YAL021C");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].prefix(), "sgd");
    assert_eq!(matches[0].identifier(), "S000000019");
    assert_eq!(matches[0].term.name, "CCR4");

    let label = grounder.get_matches("mitochondrion");
    assert_eq!(label[0].term.status, TermStatus::Name);
    let plural = grounder.get_matches("mitochondria");
    assert_eq!(plural[0].term.status, TermStatus::Synonym);
    assert!(label[0].score > plural[0].score);
}

#[test]
fn labels_survive_the_matcher_round_trip() {
    let positives = get_positive_synonyms(&bundled_config()).unwrap();
    let label = positives
        .iter()
        .find(|record| record.predicate == SynonymPredicate::HasLabel)
        .unwrap();
    let restored = biosynonyms::SynonymRecord::from_matcher_term(&label.to_matcher_term().unwrap());
    assert_eq!(restored.predicate, SynonymPredicate::HasLabel);
    assert_eq!(restored.text, label.text);
    assert_eq!(restored.curie(), label.curie());
}
