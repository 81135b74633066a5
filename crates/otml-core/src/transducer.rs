//! Weighted finite-state transducers over segment labels.
//!
//! Each arc carries a vector of weights, one per constraint rank. A
//! constraint materializes as a transducer with a single weight dimension;
//! intersecting transducers concatenates their weight vectors, so in the
//! transducer of a constraint set, weight position `k` holds the violations
//! of the constraint ranked `k`.
//!
//! # Example
//!
//! ```
//! use otml_core::transducer::{Label, Transducer};
//!
//! let mut a = Transducer::new(1);
//! a.add_arc(0, 0, Label::identity(0), [0]);
//! a.add_arc(0, 0, Label::deletion(0), [1]);
//!
//! let mut b = Transducer::new(1);
//! b.add_arc(0, 0, Label::identity(0), [2]);
//!
//! let ab = a.intersection(&b);
//! assert_eq!(ab.weight_dimension(), 2);
//! assert_eq!(ab.arc_count(), 1);
//! assert_eq!(ab.weigh(&[Label::identity(0)]).unwrap().as_slice(), &[0, 2]);
//! ```

use std::collections::{HashMap, VecDeque};

use smallvec::SmallVec;

/// Weight vector of an arc, one entry per constraint rank.
pub type Weights = SmallVec<[u32; 8]>;

/// An input/output pair of segment indices; `None` is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    pub input: Option<usize>,
    pub output: Option<usize>,
}

impl Label {
    pub fn new(input: Option<usize>, output: Option<usize>) -> Self {
        Self { input, output }
    }

    pub fn identity(segment: usize) -> Self {
        Self::new(Some(segment), Some(segment))
    }

    pub fn deletion(segment: usize) -> Self {
        Self::new(Some(segment), None)
    }

    pub fn insertion(segment: usize) -> Self {
        Self::new(None, Some(segment))
    }

    pub fn substitution(input: usize, output: usize) -> Self {
        Self::new(Some(input), Some(output))
    }

    /// Every label over an alphabet of `segment_count` segments: identities,
    /// deletions, insertions and substitutions.
    pub fn alphabet(segment_count: usize) -> Vec<Label> {
        let mut labels = Vec::with_capacity(segment_count * (segment_count + 2));
        for s in 0..segment_count {
            labels.push(Label::identity(s));
            labels.push(Label::deletion(s));
            labels.push(Label::insertion(s));
            for t in (0..segment_count).filter(|&t| t != s) {
                labels.push(Label::substitution(s, t));
            }
        }
        labels
    }
}

/// A transition of a [`Transducer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransducerArc {
    pub from: usize,
    pub to: usize,
    pub label: Label,
    pub weights: Weights,
}

/// A weighted finite-state transducer.
///
/// `Clone` is a deep copy: no state is shared between clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transducer {
    weight_dimension: usize,
    start: usize,
    finals: Vec<bool>,
    arcs: Vec<TransducerArc>,
}

impl Transducer {
    /// Creates a transducer with one final start state and no arcs.
    pub fn new(weight_dimension: usize) -> Self {
        Self {
            weight_dimension,
            start: 0,
            finals: vec![true],
            arcs: Vec::new(),
        }
    }

    /// Adds a state and returns its index.
    pub fn add_state(&mut self, is_final: bool) -> usize {
        self.finals.push(is_final);
        self.finals.len() - 1
    }

    pub fn add_arc(
        &mut self,
        from: usize,
        to: usize,
        label: Label,
        weights: impl IntoIterator<Item = u32>,
    ) {
        let weights: Weights = weights.into_iter().collect();
        debug_assert_eq!(weights.len(), self.weight_dimension);
        debug_assert!(from < self.finals.len() && to < self.finals.len());
        self.arcs.push(TransducerArc {
            from,
            to,
            label,
            weights,
        });
    }

    pub fn weight_dimension(&self) -> usize {
        self.weight_dimension
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.finals.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn arcs(&self) -> &[TransducerArc] {
        &self.arcs
    }

    pub fn is_final(&self, state: usize) -> bool {
        self.finals.get(state).copied().unwrap_or(false)
    }

    /// Product construction over equal labels, restricted to states reachable
    /// from the pair of start states. Weights of `self` come first.
    pub fn intersection(&self, other: &Transducer) -> Transducer {
        let left_out = self.outgoing();
        let mut right_out: HashMap<(usize, Label), Vec<&TransducerArc>> = HashMap::new();
        for arc in &other.arcs {
            right_out.entry((arc.from, arc.label)).or_default().push(arc);
        }

        let mut result = Transducer {
            weight_dimension: self.weight_dimension + other.weight_dimension,
            start: 0,
            finals: vec![self.is_final(self.start) && other.is_final(other.start)],
            arcs: Vec::new(),
        };
        let mut index: HashMap<(usize, usize), usize> = HashMap::new();
        index.insert((self.start, other.start), 0);
        let mut queue = VecDeque::from([(self.start, other.start)]);

        while let Some((left, right)) = queue.pop_front() {
            let from = index[&(left, right)];
            for left_arc in &left_out[left] {
                let Some(matching) = right_out.get(&(right, left_arc.label)) else {
                    continue;
                };
                for right_arc in matching {
                    let pair = (left_arc.to, right_arc.to);
                    let to = match index.get(&pair) {
                        Some(&state) => state,
                        None => {
                            let state = result.add_state(
                                self.is_final(pair.0) && other.is_final(pair.1),
                            );
                            index.insert(pair, state);
                            queue.push_back(pair);
                            state
                        }
                    };
                    let weights = left_arc
                        .weights
                        .iter()
                        .chain(right_arc.weights.iter())
                        .copied()
                        .collect();
                    result.arcs.push(TransducerArc {
                        from,
                        to,
                        label: left_arc.label,
                        weights,
                    });
                }
            }
        }

        result
    }

    /// Intersects all transducers left to right. Returns `None` when empty.
    pub fn intersect_all<'a>(
        transducers: impl IntoIterator<Item = &'a Transducer>,
    ) -> Option<Transducer> {
        let mut iter = transducers.into_iter();
        let first = iter.next()?.clone();
        Some(iter.fold(first, |acc, next| acc.intersection(next)))
    }

    /// Swaps weight positions `i` and `j` on every arc.
    ///
    /// Exchanging the ranks of two constraints in a composed transducer only
    /// permutes its weight vectors, so this is equivalent to recomposing with
    /// the two constraints swapped.
    pub fn swap_weights_on_arcs(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.weight_dimension && j < self.weight_dimension);
        if i >= self.weight_dimension || j >= self.weight_dimension {
            return;
        }
        for arc in &mut self.arcs {
            arc.weights.swap(i, j);
        }
    }

    /// Follows `labels` from the start state and sums the weights along the
    /// path. Returns `None` if no path exists or it ends in a non-final
    /// state. When several arcs share a label, the first is taken.
    pub fn weigh(&self, labels: &[Label]) -> Option<Weights> {
        let outgoing = self.outgoing();
        let mut state = self.start;
        let mut total: Weights = SmallVec::from_elem(0, self.weight_dimension);
        for label in labels {
            let arc = outgoing[state].iter().find(|arc| arc.label == *label)?;
            for (sum, w) in total.iter_mut().zip(&arc.weights) {
                *sum += w;
            }
            state = arc.to;
        }
        self.is_final(state).then_some(total)
    }

    fn outgoing(&self) -> Vec<Vec<&TransducerArc>> {
        let mut outgoing = vec![Vec::new(); self.finals.len()];
        for arc in &self.arcs {
            outgoing[arc.from].push(arc);
        }
        outgoing
    }
}
