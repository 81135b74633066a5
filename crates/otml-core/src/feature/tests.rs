//! Tests for feature tables and feature bundles.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::test_utils::four_feature_table;

fn bundle(entries: &[(&str, Sign)]) -> FeatureBundle {
    FeatureBundle::new(
        entries.iter().map(|(l, s)| (l.to_string(), *s)),
        &four_feature_table(),
    )
    .unwrap()
}

#[test]
fn test_table_orders_segments_by_symbol() {
    let table = four_feature_table();
    let symbols: Vec<&str> = table.segments().iter().map(|s| s.symbol()).collect();
    assert_eq!(symbols, vec!["a", "d", "i", "s", "t"]);
    assert_eq!(table.feature_count(), 4);
    assert_eq!(table.feature_index("voice"), Some(2));
}

#[test]
fn test_table_rejects_wrong_value_count() {
    let features = vec![FeatureDefinition {
        label: "cons".to_string(),
        values: vec![Sign::Minus, Sign::Plus],
    }];
    let result = FeatureTable::new(
        features,
        vec![("t".to_string(), vec![Sign::Plus, Sign::Minus])],
    );
    assert!(matches!(result, Err(CoreError::InvalidFeatureTable(_))));
}

#[test]
fn test_table_rejects_duplicate_feature() {
    let cons = FeatureDefinition {
        label: "cons".to_string(),
        values: vec![Sign::Minus, Sign::Plus],
    };
    let result = FeatureTable::new(vec![cons.clone(), cons], Vec::new());
    assert!(matches!(result, Err(CoreError::InvalidFeatureTable(_))));
}

#[test]
fn test_table_json_round_trip() {
    let table = four_feature_table();
    let json = table.to_json().unwrap();
    let reloaded = FeatureTable::from_json_str(&json).unwrap();
    assert_eq!(table, reloaded);
}

#[test]
fn test_matches_natural_class() {
    let table = four_feature_table();
    let voiced_stop = bundle(&[("stop", Sign::Plus), ("voice", Sign::Plus)]);
    let d = table.segment_index("d").unwrap();
    let t = table.segment_index("t").unwrap();
    assert!(table.matches(d, &voiced_stop));
    assert!(!table.matches(t, &voiced_stop));
    assert!(table.matches(t, &FeatureBundle::default()));
}

#[test]
fn test_sign_from_symbol() {
    assert_eq!(Sign::from_symbol("+").unwrap(), Sign::Plus);
    assert_eq!(Sign::from_symbol("-").unwrap(), Sign::Minus);
    assert!(matches!(
        Sign::from_symbol("~"),
        Err(CoreError::IllegalSign(s)) if s == "~"
    ));
}

#[test]
fn test_bundle_rejects_unknown_feature() {
    let result = FeatureBundle::new(
        vec![("nasal".to_string(), Sign::Plus)],
        &four_feature_table(),
    );
    assert!(matches!(result, Err(CoreError::IllegalFeature(f)) if f == "nasal"));
}

#[test]
fn test_bundle_equality_ignores_order_but_display_does_not() {
    let a = bundle(&[("stop", Sign::Plus), ("voice", Sign::Minus)]);
    let b = bundle(&[("voice", Sign::Minus), ("stop", Sign::Plus)]);
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "[+stop, -voice]");
    assert_eq!(b.to_string(), "[-voice, +stop]");
}

#[test]
fn test_bundle_encoding_length() {
    assert_eq!(bundle(&[("syll", Sign::Plus)]).encoding_length(), 2);
    assert_eq!(FeatureBundle::default().encoding_length(), 0);
}

#[test]
fn test_generate_random_draws_distinct_features() {
    let table = four_feature_table();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let b = FeatureBundle::generate_random(&table, 2, &mut rng);
        assert_eq!(b.len(), 2);
    }
    let all = FeatureBundle::generate_random(&table, 4, &mut rng);
    assert_eq!(all.len(), 4);
}

#[test]
fn test_augment_respects_limit() {
    let table = four_feature_table();
    let mut rng = StdRng::seed_from_u64(3);
    let mut b = bundle(&[("stop", Sign::Plus)]);

    assert!(b.augment(&table, 2, &mut rng));
    assert_eq!(b.len(), 2);
    assert_eq!(b.get("stop"), Some(Sign::Plus));
    assert!(!b.augment(&table, 2, &mut rng));

    let mut full = bundle(&[
        ("cons", Sign::Plus),
        ("stop", Sign::Plus),
        ("voice", Sign::Plus),
        ("syll", Sign::Plus),
    ]);
    assert!(!full.augment(&table, 10, &mut rng));
}
