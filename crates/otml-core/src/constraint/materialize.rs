//! Transducer construction for each constraint variant.
//!
//! Every transducer is complete over [`Label::alphabet`] and deterministic:
//! each state has exactly one arc per label. All states are final.

use std::collections::{HashMap, VecDeque};

use super::{Constraint, ConstraintKind};
use crate::feature::{FeatureBundle, FeatureTable};
use crate::transducer::{Label, Transducer};

pub(super) fn transducer(constraint: &Constraint, table: &FeatureTable) -> Transducer {
    let labels = Label::alphabet(table.segment_count());
    let bundles = constraint.bundles();
    // Segment belongs to the constraint's target class.
    let targets = |segment: usize| bundles.is_empty() || any_match(table, segment, bundles);

    match constraint.kind() {
        ConstraintKind::Faith => single_state(&labels, |label| {
            u32::from(label.input != label.output)
        }),
        ConstraintKind::Max => single_state(&labels, |label| match (label.input, label.output) {
            (Some(input), None) => u32::from(targets(input)),
            _ => 0,
        }),
        ConstraintKind::Dep => single_state(&labels, |label| match (label.input, label.output) {
            (None, Some(output)) => u32::from(targets(output)),
            _ => 0,
        }),
        ConstraintKind::Ident => single_state(&labels, |label| match (label.input, label.output) {
            (Some(input), Some(output)) if input != output => {
                u32::from(bundles.is_empty() || (targets(input) && !targets(output)))
            }
            _ => 0,
        }),
        ConstraintKind::Phonotactic => sequence(table, &labels, bundles),
        ConstraintKind::TieredLocal => tiered(table, &labels, bundles),
    }
}

fn any_match(table: &FeatureTable, segment: usize, bundles: &[FeatureBundle]) -> bool {
    bundles.iter().any(|bundle| table.matches(segment, bundle))
}

fn single_state(labels: &[Label], weight: impl Fn(&Label) -> u32) -> Transducer {
    let mut t = Transducer::new(1);
    for label in labels {
        t.add_arc(0, 0, *label, [weight(label)]);
    }
    t
}

// A state is the set of live partial matches: j in the set when the last j
// output segments match bundles[0..j].
fn sequence(table: &FeatureTable, labels: &[Label], bundles: &[FeatureBundle]) -> Transducer {
    if bundles.is_empty() {
        return single_state(labels, |_| 0);
    }

    let mut t = Transducer::new(1);
    let mut states: HashMap<Vec<usize>, usize> = HashMap::from([(Vec::new(), 0)]);
    let mut pending = VecDeque::from([Vec::new()]);

    while let Some(live) = pending.pop_front() {
        let from = states[&live];
        for label in labels {
            let (next, weight) = match label.output {
                None => (live.clone(), 0),
                Some(output) => advance(table, bundles, &live, output),
            };
            let to = match states.get(&next) {
                Some(&to) => to,
                None => {
                    let to = t.add_state(true);
                    states.insert(next.clone(), to);
                    pending.push_back(next);
                    to
                }
            };
            t.add_arc(from, to, *label, [weight]);
        }
    }
    t
}

// Extends the empty prefix and every live one by `segment`. A prefix that
// completes the pattern counts one violation and is not kept.
fn advance(
    table: &FeatureTable,
    bundles: &[FeatureBundle],
    live: &[usize],
    segment: usize,
) -> (Vec<usize>, u32) {
    let mut next = Vec::with_capacity(live.len() + 1);
    let mut weight = 0;
    for j in std::iter::once(0).chain(live.iter().copied()) {
        if !table.matches(segment, &bundles[j]) {
            continue;
        }
        if j + 1 == bundles.len() {
            weight = 1;
        } else {
            next.push(j + 1);
        }
    }
    next.sort_unstable();
    (next, weight)
}

// State 1: the last tier segment was in the first class.
fn tiered(table: &FeatureTable, labels: &[Label], bundles: &[FeatureBundle]) -> Transducer {
    let [first, second] = bundles else {
        return single_state(labels, |_| 0);
    };

    let mut t = Transducer::new(1);
    let after_first = t.add_state(true);
    for state in [0, after_first] {
        for label in labels {
            let (to, weight) = match label.output {
                Some(output) if table.matches(output, first) || table.matches(output, second) => {
                    let violation = state == after_first && table.matches(output, second);
                    let to = if table.matches(output, first) {
                        after_first
                    } else {
                        0
                    };
                    (to, u32::from(violation))
                }
                _ => (state, 0),
            };
            t.add_arc(state, to, *label, [weight]);
        }
    }
    t
}
