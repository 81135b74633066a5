//! Ranked constraint sets.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

use otml_core::{Constraint, ConstraintSpec, FeatureTable, Transducer, CONSTRAINT_KIND_COUNT};
use tracing::info;

use crate::cache::TransducerCache;
use crate::error::{GrammarError, Result};
use crate::notation::{parse_notation, CONSTRAINTS_DELIMITER};

/// Symbols outside the constraint names and features: the two signs and the
/// bundle delimiter.
const EXTRA_SYMBOLS: usize = 3;

/// An ordered set of constraints, highest ranked first.
///
/// Equality and hashing go through [`canonical_key`](Self::canonical_key),
/// so two sets are equal when they render identically. Feature order inside
/// a bundle is part of the rendering.
#[derive(Debug, Clone)]
pub struct ConstraintSet {
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) feature_table: Arc<FeatureTable>,
}

impl ConstraintSet {
    pub fn new(constraints: Vec<Constraint>, feature_table: Arc<FeatureTable>) -> Self {
        Self {
            constraints,
            feature_table,
        }
    }

    /// Builds a set from specifications, validating each against the table.
    ///
    /// # Errors
    ///
    /// Fails when a `type` is missing or unknown, or a bundle uses a feature
    /// the table lacks or a sign other than `+`/`-`.
    pub fn from_specs(specs: &[ConstraintSpec], feature_table: Arc<FeatureTable>) -> Result<Self> {
        let constraints = specs
            .iter()
            .map(|spec| Constraint::from_spec(spec, &feature_table))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(constraints, feature_table))
    }

    /// Parses bracketed notation such as `Faith[] >> Max[[+cons]]`.
    pub fn from_notation(text: &str, feature_table: Arc<FeatureTable>) -> Result<Self> {
        Self::from_specs(&parse_notation(text)?, feature_table)
    }

    /// Parses the JSON list-of-specifications form.
    pub fn from_json_str(text: &str, feature_table: Arc<FeatureTable>) -> Result<Self> {
        let specs: Vec<ConstraintSpec> = serde_json::from_str(text)?;
        Self::from_specs(&specs, feature_table)
    }

    /// Parses JSON, falling back to bracketed notation when the text is not
    /// a JSON specification list.
    pub fn parse(text: &str, feature_table: Arc<FeatureTable>) -> Result<Self> {
        match serde_json::from_str::<Vec<ConstraintSpec>>(text) {
            Ok(specs) => Self::from_specs(&specs, feature_table),
            Err(_) => Self::from_notation(text, feature_table),
        }
    }

    /// Reads a grammar file in either form, see [`parse`](Self::parse).
    pub fn load(path: impl AsRef<Path>, feature_table: Arc<FeatureTable>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let set = Self::parse(&contents, feature_table)?;
        info!(
            event = "grammar_loaded",
            path = %path.display(),
            constraints = set.len(),
            encoding_length = set.encoding_length(),
        );
        Ok(set)
    }

    pub fn to_specs(&self) -> Vec<ConstraintSpec> {
        self.constraints.iter().map(Constraint::to_spec).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_specs())?)
    }

    /// Rank-ordered constraint renderings joined by ` >> `.
    pub fn canonical_key(&self) -> String {
        self.constraints
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(CONSTRAINTS_DELIMITER)
    }

    /// MDL cost of the set: `k * (1 + sum of constraint lengths)`, where `k`
    /// is the bits per symbol of the alphabet of constraint names, features,
    /// signs and delimiter.
    pub fn encoding_length(&self) -> usize {
        let total_symbols = CONSTRAINT_KIND_COUNT + self.feature_table.feature_count() + EXTRA_SYMBOLS;
        let k = total_symbols.next_power_of_two().trailing_zeros() as usize;
        let body: usize = self.constraints.iter().map(Constraint::encoding_length).sum();
        k * (1 + body)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn feature_table(&self) -> &Arc<FeatureTable> {
        &self.feature_table
    }

    /// Returns the composed transducer of this set, from `cache` when
    /// present.
    ///
    /// Repeated calls without an intervening mutation return the same `Arc`.
    ///
    /// # Errors
    ///
    /// [`GrammarError::EmptyConstraintSet`] when the set has no constraints.
    pub fn get_transducer(&self, cache: &mut TransducerCache) -> Result<Arc<Transducer>> {
        cache.get_or_build(&self.canonical_key(), || self.make_transducer())
    }

    fn make_transducer(&self) -> Result<Transducer> {
        let transducers: Vec<Transducer> = self
            .constraints
            .iter()
            .map(|c| c.transducer(&self.feature_table))
            .collect();
        Transducer::intersect_all(&transducers).ok_or(GrammarError::EmptyConstraintSet)
    }
}

impl PartialEq for ConstraintSet {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl Eq for ConstraintSet {}

impl Hash for ConstraintSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_key().hash(state);
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Constraint Set (encoding length {}): {}",
            self.encoding_length(),
            self.canonical_key()
        )
    }
}
