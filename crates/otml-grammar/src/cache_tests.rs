//! Tests for the transducer cache.

use std::sync::Arc;

use otml_core::{Label, Transducer};

use crate::cache::{CacheStats, TransducerCache};
use crate::error::GrammarError;

fn one_state(weight: u32) -> Transducer {
    let mut t = Transducer::new(1);
    t.add_arc(0, 0, Label::identity(0), [weight]);
    t
}

#[test]
fn test_get_or_build_builds_once() {
    let mut cache = TransducerCache::new();
    let mut calls = 0;

    let first = cache
        .get_or_build("A", || {
            calls += 1;
            Ok::<_, GrammarError>(one_state(1))
        })
        .unwrap();
    let second = cache
        .get_or_build("A", || {
            calls += 1;
            Ok::<_, GrammarError>(one_state(2))
        })
        .unwrap();

    assert_eq!(calls, 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            builds: 1,
            inserts: 0,
        }
    );
}

#[test]
fn test_failed_build_stores_nothing() {
    let mut cache = TransducerCache::new();
    let result = cache.get_or_build("A", || Err(GrammarError::EmptyConstraintSet));
    assert!(matches!(result, Err(GrammarError::EmptyConstraintSet)));
    assert!(cache.is_empty());
    assert_eq!(cache.stats().builds, 0);
}

#[test]
fn test_insert_replaces() {
    let mut cache = TransducerCache::new();
    cache.insert("A", one_state(1));
    let replaced = cache.insert("A", one_state(5));

    assert_eq!(cache.len(), 1);
    let got = cache.get("A").unwrap();
    assert!(Arc::ptr_eq(&got, &replaced));
    assert_eq!(got.weigh(&[Label::identity(0)]).unwrap().as_slice(), &[5]);
    assert_eq!(cache.stats().inserts, 2);
}

#[test]
fn test_invalidate_all() {
    let mut cache = TransducerCache::new();
    cache.insert("A", one_state(1));
    cache.insert("B", one_state(1));
    assert!(cache.contains("A"));

    cache.invalidate_all();
    assert!(cache.is_empty());
    assert!(!cache.contains("A"));
    assert!(cache.get("A").is_none());
    assert_eq!(cache.stats().misses, 1);
}

#[test]
fn test_hit_rate() {
    assert_eq!(CacheStats::default().hit_rate(), 0.0);
    let stats = CacheStats {
        hits: 3,
        misses: 1,
        ..CacheStats::default()
    };
    assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
}
