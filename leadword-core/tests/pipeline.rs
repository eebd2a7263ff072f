//! End-to-end runs of the public pipeline: rows in, ranked report out.

use std::collections::HashMap;

use leadword_core::{
    aggregate, export, present, AnalysisConfig, AnalysisError, AttributeRules, CategoryMap,
    IgnoreSet, Session, Table,
};

fn ranked(rows: &[Option<&str>], ignore: &IgnoreSet) -> Vec<(String, u64, u32)> {
    present(&aggregate(rows.iter().copied(), ignore))
        .into_iter()
        .map(|e| (e.token.as_str().to_string(), e.count, e.rank))
        .collect()
}

#[test]
fn leading_words_are_counted_case_insensitively() {
    let rows = [Some("Apple pie"), Some("apple tart"), Some("Banana split")];
    let table = aggregate(rows, &IgnoreSet::new());

    assert_eq!(table.get("apple"), Some(2));
    assert_eq!(table.get("banana"), Some(1));
    assert_eq!(table.len(), 2);
    assert_eq!(
        ranked(&rows, &IgnoreSet::new()),
        [("apple".to_string(), 2, 1), ("banana".to_string(), 1, 2)]
    );
}

#[test]
fn blank_and_null_rows_count_as_empty() {
    let table = aggregate([Some(""), None, Some("   ")], &IgnoreSet::new());

    assert!(table.is_empty());
    assert_eq!(table.empty_rows(), 3);
    assert_eq!(table.total_rows(), 3);
    assert_eq!(table.ignored_rows(), 0);
}

#[test]
fn ignored_words_move_to_ignored_rows() {
    let mut ignore = IgnoreSet::new();
    ignore.add("cat").unwrap();

    let table = aggregate([Some("Cat food"), Some("Cat toy"), Some("Dog bone")], &ignore);

    assert_eq!(table.get("dog"), Some(1));
    assert_eq!(table.get("cat"), None);
    assert_eq!(table.len(), 1);
    assert_eq!(table.ignored_rows(), 2);
}

#[test]
fn ignore_word_is_normalized_like_descriptions() {
    let mut ignore = IgnoreSet::new();
    assert_eq!(ignore.add("The!"), Ok(true));

    let table = aggregate([Some("The Thing")], &ignore);

    assert!(table.is_empty());
    assert_eq!(table.ignored_rows(), 1);
}

#[test]
fn punctuation_only_ignore_word_is_rejected() {
    let mut ignore = IgnoreSet::new();
    let err = ignore.add("...").unwrap_err();
    assert_eq!(err, AnalysisError::InvalidIgnoreWord { input: "...".into() });
    assert!(ignore.is_empty());
    assert!(ignore.remove("  ").is_err());
}

#[test]
fn records_without_the_column_are_rejected() {
    let mut row = HashMap::new();
    row.insert("Descrição".to_string(), Some("Arroz".to_string()));

    let mut session = Session::new(AnalysisConfig::default()).unwrap();
    let err = session.load(&vec![row]).unwrap_err();

    assert_eq!(
        err,
        AnalysisError::MissingColumn {
            column: "Description".into(),
            row: 0
        }
    );
    assert!(err.to_string().contains("Description"));
}

#[test]
fn session_over_delimited_upload() {
    let upload = "ID\tDescription\n\
                  1\tParafuso sextavado\n\
                  2\t\"Parafuso\" 3mm\n\
                  3\tde madeira\n\
                  4\t\n\
                  5\tMartelo\n";
    let table = Table::parse_delimited(upload, b'\t').unwrap();

    let mut session = Session::new(AnalysisConfig::catalog()).unwrap();
    let report = session.load(&table).unwrap();

    let words: Vec<(&str, u64)> = report
        .ranked()
        .iter()
        .map(|e| (e.token.as_str(), e.count))
        .collect();
    assert_eq!(words, [("parafuso", 2), ("martelo", 1)]);

    let stats = report.stats();
    assert_eq!(stats.total_rows, 5);
    assert_eq!(stats.ignored_rows, 1);
    assert_eq!(stats.empty_rows, 1);
    assert!(stats.is_balanced());
}

#[test]
fn session_categories_follow_ignore_edits() {
    let table = Table::parse_delimited(
        "Description\nArroz branco\nArroz integral\nFeijão preto\nMartelo\n",
        b'\t',
    )
    .unwrap();
    let mut session = Session::new(AnalysisConfig::default()).unwrap();

    let mut categories = CategoryMap::new(*session.normalizer());
    categories.insert("arroz", "Alimentos");
    categories.insert("feijão", "Alimentos");
    categories.insert("martelo", "Ferramentas");
    session.set_categories(Some(categories));
    session.load(&table).unwrap();

    let totals = |s: &Session| -> Vec<(String, u64)> {
        s.report()
            .and_then(|r| r.categories.as_ref())
            .map(|b| b.iter().map(|c| (c.category.to_string(), c.count)).collect())
            .unwrap_or_default()
    };
    assert_eq!(
        totals(&session),
        [("Alimentos".to_string(), 3), ("Ferramentas".to_string(), 1)]
    );

    session.add_ignore("ARROZ").unwrap();
    assert_eq!(
        totals(&session),
        [("Alimentos".to_string(), 1), ("Ferramentas".to_string(), 1)]
    );
}

#[test]
fn chart_limit_keeps_ranked_prefix() {
    let config = AnalysisConfig {
        chart_limit: Some(2),
        ..AnalysisConfig::default()
    };
    let mut session = Session::new(config).unwrap();
    let table = Table::parse_delimited("Description\nc\nb\nb\na\na\na\n", b',').unwrap();
    let report = session.load(&table).unwrap();

    assert_eq!(report.ranked().len(), 3);
    let chart: Vec<String> = report.chart().iter().map(ToString::to_string).collect();
    assert_eq!(chart, ["a=3", "b=2"]);
}

#[test]
fn digits_and_mixed_words_are_tokens() {
    let table = aggregate(
        [Some("2024 report"), Some("A4 paper"), Some("a4 sheet")],
        &IgnoreSet::new(),
    );
    assert_eq!(table.get("2024"), Some(1));
    assert_eq!(table.get("a4"), Some(2));
}

#[test]
fn quoted_csv_upload_with_attributes_and_export() {
    let upload = "\"ID\",\"Description\"\n\
                  1,\"Ventilador 110v, branco\"\n\
                  2,\"Ventilador bivolt 110v/220v\"\n\
                  3,\"Cabo\n220 volts\"\n";
    let table = Table::parse_delimited(upload, b',').unwrap();

    let rules = Table::parse_delimited(
        "Attribute,Variation,Patterns\n\
         Voltagem,110v,\"110v,110 v,110 volts\"\n\
         Voltagem,220v,\"220v,220 v,220 volts\"\n",
        b',',
    )
    .unwrap();

    let mut session = Session::new(AnalysisConfig::default()).unwrap();
    session.set_attributes(Some(AttributeRules::from_source(&rules).unwrap()));
    session.load(&table).unwrap();
    let report = session.report().unwrap();

    let words: Vec<(&str, u64)> = report
        .ranked()
        .iter()
        .map(|e| (e.token.as_str(), e.count))
        .collect();
    assert_eq!(words, [("ventilador", 2), ("cabo", 1)]);

    let tags: Vec<(String, u64)> = report
        .attributes
        .as_ref()
        .unwrap()
        .iter()
        .map(|a| (a.value.to_string(), a.count))
        .collect();
    assert_eq!(
        tags,
        [
            ("110v".to_string(), 1),
            ("110v/220v".to_string(), 1),
            ("220v".to_string(), 1)
        ]
    );

    let mut out = Vec::new();
    export::write_ranked(&mut out, report.ranked(), session.categories(), b',').unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap().lines().collect::<Vec<_>>(),
        ["Rank,Word,Count", "1,ventilador,2", "2,cabo,1"]
    );
}
