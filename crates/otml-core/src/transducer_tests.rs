//! Tests for weighted transducers.

use crate::transducer::{Label, Transducer};

// Single-state transducer penalizing deletions of segment 0.
fn no_delete_zero() -> Transducer {
    let mut t = Transducer::new(1);
    for label in Label::alphabet(2) {
        let weight = u32::from(label == Label::deletion(0));
        t.add_arc(0, 0, label, [weight]);
    }
    t
}

// Two-state transducer penalizing segment 1 output right after segment 0.
fn no_zero_one() -> Transducer {
    let mut t = Transducer::new(1);
    let after_zero = t.add_state(true);
    for from in [0, after_zero] {
        for label in Label::alphabet(2) {
            let (to, weight) = match label.output {
                None => (from, 0),
                Some(0) => (after_zero, 0),
                Some(_) => (0, u32::from(from == after_zero)),
            };
            t.add_arc(from, to, label, [weight]);
        }
    }
    t
}

#[test]
fn test_alphabet_size() {
    // identity + deletion + insertion + (n - 1) substitutions per segment
    assert_eq!(Label::alphabet(3).len(), 3 * (3 + 2));
    assert!(Label::alphabet(0).is_empty());
}

#[test]
fn test_intersection_concatenates_weights() {
    let a = no_delete_zero();
    let b = no_zero_one();
    let ab = a.intersection(&b);

    assert_eq!(ab.weight_dimension(), 2);
    assert_eq!(ab.state_count(), 2);
    let path = [Label::identity(0), Label::identity(1), Label::deletion(0)];
    assert_eq!(ab.weigh(&path).unwrap().as_slice(), &[1, 1]);

    let ba = b.intersection(&a);
    assert_eq!(ba.weigh(&path).unwrap().as_slice(), &[1, 1]);
}

#[test]
fn test_intersect_all() {
    let a = no_delete_zero();
    let b = no_zero_one();
    let abc = Transducer::intersect_all([&a, &b, &a]).unwrap();
    assert_eq!(abc.weight_dimension(), 3);

    let path = [Label::deletion(0), Label::deletion(0)];
    assert_eq!(abc.weigh(&path).unwrap().as_slice(), &[2, 0, 2]);

    let single = Transducer::intersect_all([&a]).unwrap();
    assert_eq!(single, a);
    assert!(Transducer::intersect_all(std::iter::empty()).is_none());
}

#[test]
fn test_swap_weights_matches_reordered_intersection() {
    let a = no_delete_zero();
    let b = no_zero_one();
    let mut swapped = a.intersection(&b);
    swapped.swap_weights_on_arcs(0, 1);
    let recomposed = b.intersection(&a);

    let paths: [&[Label]; 3] = [
        &[Label::identity(0), Label::insertion(1)],
        &[Label::deletion(0), Label::substitution(0, 1)],
        &[Label::identity(1), Label::identity(0), Label::identity(1)],
    ];
    for path in paths {
        assert_eq!(swapped.weigh(path), recomposed.weigh(path));
    }
}

#[test]
fn test_clone_is_independent() {
    let original = no_delete_zero().intersection(&no_zero_one());
    let mut copy = original.clone();
    copy.swap_weights_on_arcs(0, 1);
    assert_ne!(copy, original);
}

#[test]
fn test_weigh_missing_path() {
    let mut t = Transducer::new(1);
    t.add_arc(0, 0, Label::identity(0), [0]);
    assert!(t.weigh(&[Label::identity(1)]).is_none());
    assert_eq!(t.weigh(&[]).unwrap().as_slice(), &[0]);
}
