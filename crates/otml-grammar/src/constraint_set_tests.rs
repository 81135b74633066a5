//! Tests for constraint-set construction, scoring and materialization.

use std::collections::HashSet;
use std::sync::Arc;

use otml_core::{CoreError, FeatureTable};
use otml_test::stop_voice_table;

use crate::cache::TransducerCache;
use crate::constraint_set::ConstraintSet;
use crate::error::GrammarError;

fn set(text: &str) -> ConstraintSet {
    ConstraintSet::from_notation(text, stop_voice_table()).unwrap()
}

#[test]
fn test_from_notation_matches_from_json() {
    let table = stop_voice_table();
    let from_text =
        ConstraintSet::from_notation("Faith[] >> Phonotactic[[+stop, -voice][+syll]]", table.clone())
            .unwrap();
    let from_json = ConstraintSet::from_json_str(
        r#"[{"type": "Faith", "bundles": []},
            {"type": "Phonotactic", "bundles": [{"stop": "+", "voice": "-"}, {"syll": "+"}]}]"#,
        table,
    )
    .unwrap();
    assert_eq!(from_text, from_json);
    assert_eq!(from_text.len(), 2);
}

#[test]
fn test_display_round_trip() {
    let original = set("Faith[] >> Max[[+cons]] >> Phonotactic[[+stop, -voice][+syll]]");
    let rendered = original.to_string();
    assert!(rendered.starts_with("Constraint Set (encoding length "));

    let reparsed = ConstraintSet::from_notation(&rendered, stop_voice_table()).unwrap();
    assert_eq!(reparsed, original);
    assert_eq!(reparsed.canonical_key(), original.canonical_key());
}

#[test]
fn test_json_round_trip() {
    let original = set("Faith[] >> TieredLocal[[-voice][+voice, +stop]]");
    let json = original.to_json().unwrap();
    let reparsed = ConstraintSet::from_json_str(&json, stop_voice_table()).unwrap();
    assert_eq!(reparsed, original);
}

#[test]
fn test_parse_falls_back_to_notation() {
    let table = stop_voice_table();
    let from_json = ConstraintSet::parse(r#"[{"type": "Max", "bundles": [{"cons": "+"}]}]"#, table.clone())
        .unwrap();
    let from_text = ConstraintSet::parse("Max[[+cons]]", table.clone()).unwrap();
    assert_eq!(from_json, from_text);

    // valid JSON with an invalid specification is not retried as notation
    let result = ConstraintSet::parse(r#"[{"bundles": []}]"#, table);
    assert!(matches!(result, Err(GrammarError::Constraint(CoreError::MissingType))));
}

#[test]
fn test_construction_errors() {
    let table = stop_voice_table();
    let cases: [(&str, fn(&GrammarError) -> bool); 4] = [
        ("Markedness[]", |e| {
            matches!(e, GrammarError::Constraint(CoreError::UnknownConstraint(_)))
        }),
        ("[[+cons]]", |e| matches!(e, GrammarError::Constraint(CoreError::MissingType))),
        ("Max[[+nasal]]", |e| {
            matches!(e, GrammarError::Constraint(CoreError::IllegalFeature(_)))
        }),
        ("Max[[*cons]]", |e| matches!(e, GrammarError::Constraint(CoreError::IllegalSign(_)))),
    ];
    for (text, check) in cases {
        let err = ConstraintSet::from_notation(text, table.clone()).unwrap_err();
        assert!(check(&err), "unexpected error for {text}: {err:?}");
    }

    let not_json = ConstraintSet::from_json_str("Faith[]", table);
    assert!(matches!(not_json, Err(GrammarError::Json(_))));
}

#[test]
fn test_encoding_length() {
    // 6 kinds + 4 features + 3 = 13 symbols, 4 bits each
    assert_eq!(set("Faith[]").encoding_length(), 4);
    assert_eq!(set("Faith[] >> Max[[+cons]]").encoding_length(), 4 * (1 + 3));
    assert_eq!(
        set("Faith[] >> Phonotactic[[+stop, -voice][+syll]]").encoding_length(),
        4 * (1 + 1 + 4 + 2)
    );
    assert_eq!(set("Faith[]").to_string(), "Constraint Set (encoding length 4): Faith[]");
}

#[test]
fn test_encoding_length_uses_feature_count() {
    let table = Arc::new(
        FeatureTable::from_json_str(
            r#"{"feature": [{"label": "cons", "values": ["-", "+"]}],
                "feature_table": {"t": ["+"], "a": ["-"]}}"#,
        )
        .unwrap(),
    );
    // 6 + 1 + 3 = 10 symbols, still 4 bits
    let small = ConstraintSet::from_notation("Faith[] >> Dep[[+cons]]", table).unwrap();
    assert_eq!(small.encoding_length(), 4 * (1 + 3));
}

#[test]
fn test_equality_and_hash_follow_rendering() {
    let a = set("Faith[] >> Max[[+cons, -voice]]");
    let b = set("Faith[] >> Max[[+cons, -voice]]");
    let reordered_bundle = set("Faith[] >> Max[[-voice, +cons]]");
    let reranked = set("Max[[+cons, -voice]] >> Faith[]");

    assert_eq!(a, b);
    assert_ne!(a, reranked);
    // bundles compare equal, renderings do not
    assert_eq!(a.constraints()[1], reordered_bundle.constraints()[1]);
    assert_ne!(a, reordered_bundle);

    let distinct: HashSet<ConstraintSet> = [a, b, reordered_bundle, reranked].into_iter().collect();
    assert_eq!(distinct.len(), 3);
}

#[test]
fn test_get_transducer_is_memoized() {
    let grammar = set("Faith[] >> Max[[+cons]] >> Phonotactic[[+stop][+syll]]");
    let mut cache = TransducerCache::new();

    let first = grammar.get_transducer(&mut cache).unwrap();
    let second = grammar.get_transducer(&mut cache).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.weight_dimension(), 3);
    assert_eq!(cache.stats().builds, 1);
    assert_eq!(cache.stats().hits, 1);
    assert!(cache.contains(&grammar.canonical_key()));

    // an equal set built separately shares the entry
    let twin = set("Faith[] >> Max[[+cons]] >> Phonotactic[[+stop][+syll]]");
    assert!(Arc::ptr_eq(&first, &twin.get_transducer(&mut cache).unwrap()));
}

#[test]
fn test_invalidate_all_forces_rebuild() {
    let grammar = set("Faith[] >> Dep[[+syll]]");
    let mut cache = TransducerCache::new();

    let before = grammar.get_transducer(&mut cache).unwrap();
    cache.invalidate_all();
    let after = grammar.get_transducer(&mut cache).unwrap();

    assert_eq!(cache.stats().builds, 2);
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(*before, *after);
}

#[test]
fn test_single_constraint_transducer_is_a_copy() {
    let grammar = set("Max[[+cons]]");
    let mut cache = TransducerCache::new();
    let composed = grammar.get_transducer(&mut cache).unwrap();
    let own = grammar.constraints()[0].transducer(grammar.feature_table());
    assert_eq!(*composed, own);
}

#[test]
fn test_empty_set_has_no_transducer() {
    let empty = ConstraintSet::new(Vec::new(), stop_voice_table());
    assert!(empty.is_empty());
    let mut cache = TransducerCache::new();
    assert!(matches!(
        empty.get_transducer(&mut cache),
        Err(GrammarError::EmptyConstraintSet)
    ));
    assert!(cache.is_empty());
}

#[test]
fn test_load_reads_both_forms() {
    let dir = std::env::temp_dir().join(format!("otml-grammar-load-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let json_path = dir.join("grammar.json");
    let text_path = dir.join("grammar.txt");
    std::fs::write(&json_path, r#"[{"type": "Faith", "bundles": []}]"#).unwrap();
    std::fs::write(&text_path, "Faith[]\n").unwrap();

    let from_json = ConstraintSet::load(&json_path, stop_voice_table()).unwrap();
    let from_text = ConstraintSet::load(&text_path, stop_voice_table()).unwrap();
    assert_eq!(from_json, from_text);

    let missing = ConstraintSet::load(dir.join("missing.txt"), stop_voice_table());
    assert!(matches!(missing, Err(GrammarError::Io(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}
