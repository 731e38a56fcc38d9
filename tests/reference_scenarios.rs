//! Worked examples for the column functions, compared after rounding to
//! two decimals.

use std::collections::HashMap;

use fuzzycol::{
    build_categorical_lookup, round_half_up, score_columns, NgramMode, Scalar, ScalarLookup,
    ScalarType, Scorer, ScorerConfig, StringMetric, DEFAULT_PARALLEL_THRESHOLD,
};

fn rows() -> (Vec<Option<&'static str>>, Vec<Option<&'static str>>) {
    (
        vec![None, Some("asdfg"), Some("asdfghj")],
        vec![Some("ads"), Some("asdfg"), Some("asdfhgj")],
    )
}

fn column(metric: StringMetric, config: ScorerConfig) -> Vec<Option<f64>> {
    let (left, right) = rows();
    score_columns(&Scorer::new(metric, config), &left, &right).unwrap()
}

#[test]
fn distance_metrics_table() {
    let config = ScorerConfig::default().with_round_digits(2);

    assert_eq!(
        column(StringMetric::NGram2, config.clone()),
        vec![None, Some(1.0), Some(0.33)]
    );
    assert_eq!(
        column(StringMetric::NGram3, config.clone()),
        vec![None, Some(1.0), Some(0.25)]
    );
    assert_eq!(
        column(StringMetric::DiceSorensen, config.clone()),
        vec![None, Some(1.0), Some(0.5)]
    );
    assert_eq!(
        column(StringMetric::NormalizedLevenshtein, config.clone()),
        vec![None, Some(1.0), Some(0.71)]
    );
    assert_eq!(
        column(StringMetric::JaroWinkler, config),
        vec![None, Some(1.0), Some(0.97)]
    );
}

#[test]
fn overlap_mode_reports_max_length_ngram_scores() {
    let config = ScorerConfig::default()
        .with_round_digits(2)
        .with_ngram_mode(NgramMode::Overlap);

    assert_eq!(
        column(StringMetric::NGram2, config.clone()),
        vec![None, Some(1.0), Some(0.5)]
    );
    assert_eq!(
        column(StringMetric::NGram3, config),
        vec![None, Some(1.0), Some(0.4)]
    );
}

#[test]
fn empty_operand_is_undefined_everywhere() {
    for metric in StringMetric::ALL {
        assert_eq!(metric.score(Some(""), Some("ads")), None, "{metric}");
        assert_eq!(metric.score(Some("ads"), None), None, "{metric}");
    }
}

#[test]
fn free_functions_match_table() {
    let dice = fuzzycol::dice_sorensen_similarity(Some("asdfghj"), Some("asdfhgj")).unwrap();
    let lev =
        fuzzycol::normalized_levenshtein_similarity(Some("asdfghj"), Some("asdfhgj")).unwrap();
    let jw = fuzzycol::jaro_winkler_similarity(Some("asdfghj"), Some("asdfhgj")).unwrap();
    assert_eq!(round_half_up(dice, 2), 0.5);
    assert_eq!(round_half_up(lev, 2), 0.71);
    assert_eq!(round_half_up(jw, 2), 0.97);
}

#[test]
fn create_lookup() {
    let map_key = build_categorical_lookup(
        HashMap::from([("a".to_string(), "AA"), ("b".to_string(), "BB")]),
        "__",
    );
    let keys = [Some("a"), Some("b"), None, Some("c")];
    let mapped: Vec<&str> = keys
        .iter()
        .map(|k| map_key(k.map(str::to_string).as_ref()))
        .collect();
    assert_eq!(mapped, vec!["AA", "BB", "__", "__"]);
}

#[test]
fn create_lookup_from_json() {
    let lookup = ScalarLookup::from_json_str(
        r#"{"a": "AA", "b": "BB"}"#,
        Scalar::from("__"),
        ScalarType::String,
    )
    .unwrap();
    let column = [
        Scalar::from("a"),
        Scalar::from("b"),
        Scalar::Null,
        Scalar::from("c"),
    ];
    let mapped = fuzzycol::map_scalar_column(&lookup, &column, DEFAULT_PARALLEL_THRESHOLD);
    assert_eq!(
        mapped,
        vec![
            Scalar::from("AA"),
            Scalar::from("BB"),
            Scalar::from("__"),
            Scalar::from("__"),
        ]
    );
}
