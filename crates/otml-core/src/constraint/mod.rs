//! Constraint variants.
//!
//! A [`Constraint`] is one ranked well-formedness rule of a grammar. The set
//! of variants is closed ([`ConstraintKind`]); each variant carries a list of
//! feature bundles whose meaning depends on the variant:
//!
//! - `Faith[]`: penalizes any unfaithful mapping (deletion, insertion, change)
//! - `Max[[b]]`: penalizes deleting a segment in `b`
//! - `Dep[[b]]`: penalizes inserting a segment in `b`
//! - `Ident[[b]]`: penalizes changing a segment in `b` into one outside it
//! - `Phonotactic[[b1][b2]...]`: penalizes the output sequence `b1 b2 ...`
//! - `TieredLocal[[b1][b2]]`: penalizes `b1` followed by `b2` on the tier of
//!   segments in either class
//!
//! A bundle-less Max, Dep or Ident applies to every segment.

mod materialize;
mod spec;


pub use spec::{BundleSpec, ConstraintSpec};

use std::fmt;

use rand::Rng;

use crate::error::{CoreError, Result};
use crate::feature::{FeatureBundle, FeatureTable, Sign};
use crate::transducer::Transducer;

/// Number of constraint variants, used as the size of the constraint-type
/// part of the MDL alphabet.
pub const CONSTRAINT_KIND_COUNT: usize = 6;

/// The closed set of constraint variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    Faith,
    Max,
    Dep,
    Ident,
    Phonotactic,
    TieredLocal,
}

impl ConstraintKind {
    /// All variants, in declaration order.
    pub const ALL: [ConstraintKind; CONSTRAINT_KIND_COUNT] = [
        ConstraintKind::Faith,
        ConstraintKind::Max,
        ConstraintKind::Dep,
        ConstraintKind::Ident,
        ConstraintKind::Phonotactic,
        ConstraintKind::TieredLocal,
    ];

    /// Variants that the insert-constraint mutation may create.
    pub const INSERTABLE: [ConstraintKind; 5] = [
        ConstraintKind::Dep,
        ConstraintKind::Max,
        ConstraintKind::Ident,
        ConstraintKind::Phonotactic,
        ConstraintKind::TieredLocal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConstraintKind::Faith => "Faith",
            ConstraintKind::Max => "Max",
            ConstraintKind::Dep => "Dep",
            ConstraintKind::Ident => "Ident",
            ConstraintKind::Phonotactic => "Phonotactic",
            ConstraintKind::TieredLocal => "TieredLocal",
        }
    }

    /// Resolves a variant from its name as written in grammar files.
    pub fn from_name(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(CoreError::MissingType);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| CoreError::UnknownConstraint(name.to_string()))
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Limits on bundle sizes and counts used by random generation and the
/// bundle mutation hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleLimits {
    /// Features in a freshly generated bundle.
    pub initial_number_of_features: usize,
    /// Upper bound for augmenting a bundle.
    pub max_features_in_bundle: usize,
    pub min_feature_bundles_in_phonotactic: usize,
    pub max_feature_bundles_in_phonotactic: usize,
}

impl Default for BundleLimits {
    fn default() -> Self {
        Self {
            initial_number_of_features: 1,
            max_features_in_bundle: 3,
            min_feature_bundles_in_phonotactic: 1,
            max_feature_bundles_in_phonotactic: 3,
        }
    }
}

/// A ranked constraint: a variant plus its feature bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    kind: ConstraintKind,
    bundles: Vec<FeatureBundle>,
}

impl Constraint {
    pub fn new(kind: ConstraintKind, bundles: Vec<FeatureBundle>) -> Self {
        Self { kind, bundles }
    }

    /// Builds a constraint from its specification, validating variant name,
    /// feature names and signs against `table`.
    pub fn from_spec(spec: &ConstraintSpec, table: &FeatureTable) -> Result<Self> {
        let kind = ConstraintKind::from_name(spec.kind.trim())?;
        let bundles = spec
            .bundles
            .iter()
            .map(|bundle| {
                let entries = bundle
                    .iter()
                    .map(|(feature, sign)| Ok((feature.to_string(), Sign::from_symbol(sign)?)))
                    .collect::<Result<Vec<_>>>()?;
                FeatureBundle::new(entries, table)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { kind, bundles })
    }

    pub fn to_spec(&self) -> ConstraintSpec {
        let bundles = self
            .bundles
            .iter()
            .map(|bundle| {
                bundle
                    .iter()
                    .map(|(f, s)| (f, s.symbol()))
                    .collect::<BundleSpec>()
            })
            .collect();
        ConstraintSpec::new(self.kind.name(), bundles)
    }

    /// Draws a structurally random constraint of `kind`.
    pub fn generate_random<R: Rng>(
        kind: ConstraintKind,
        table: &FeatureTable,
        limits: &BundleLimits,
        rng: &mut R,
    ) -> Self {
        let bundle_count = match kind {
            ConstraintKind::Faith => 0,
            ConstraintKind::Max | ConstraintKind::Dep | ConstraintKind::Ident => 1,
            ConstraintKind::Phonotactic => limits.min_feature_bundles_in_phonotactic.max(1),
            ConstraintKind::TieredLocal => 2,
        };
        let bundles = (0..bundle_count)
            .map(|_| FeatureBundle::generate_random(table, limits.initial_number_of_features, rng))
            .collect();
        Self { kind, bundles }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn bundles(&self) -> &[FeatureBundle] {
        &self.bundles
    }

    /// Symbols needed to encode this constraint: one for the variant plus
    /// two per bundle feature. Faith is part of every grammar and costs
    /// nothing.
    pub fn encoding_length(&self) -> usize {
        match self.kind {
            ConstraintKind::Faith => 0,
            _ => 1 + self.bundles.iter().map(FeatureBundle::encoding_length).sum::<usize>(),
        }
    }

    /// Inserts a random bundle at a random position. Phonotactic only.
    pub fn insert_feature_bundle<R: Rng>(
        &mut self,
        table: &FeatureTable,
        limits: &BundleLimits,
        rng: &mut R,
    ) -> bool {
        if self.kind != ConstraintKind::Phonotactic
            || self.bundles.len() >= limits.max_feature_bundles_in_phonotactic
        {
            return false;
        }
        let bundle = FeatureBundle::generate_random(table, limits.initial_number_of_features, rng);
        let index = rng.random_range(0..=self.bundles.len());
        self.bundles.insert(index, bundle);
        true
    }

    /// Removes a random bundle. Phonotactic only.
    pub fn remove_feature_bundle<R: Rng>(
        &mut self,
        limits: &BundleLimits,
        rng: &mut R,
    ) -> bool {
        if self.kind != ConstraintKind::Phonotactic
            || self.bundles.len() <= limits.min_feature_bundles_in_phonotactic
            || self.bundles.is_empty()
        {
            return false;
        }
        let index = rng.random_range(0..self.bundles.len());
        self.bundles.remove(index);
        true
    }

    /// Adds one feature to a random bundle.
    pub fn augment_feature_bundle<R: Rng>(
        &mut self,
        table: &FeatureTable,
        limits: &BundleLimits,
        rng: &mut R,
    ) -> bool {
        if self.kind == ConstraintKind::Faith || self.bundles.is_empty() {
            return false;
        }
        let index = rng.random_range(0..self.bundles.len());
        self.bundles[index].augment(table, limits.max_features_in_bundle, rng)
    }

    /// Materializes this constraint as a one-dimensional transducer over the
    /// segment alphabet of `table`.
    pub fn transducer(&self, table: &FeatureTable) -> Transducer {
        materialize::transducer(self, table)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        match self.bundles.as_slice() {
            [] => f.write_str("[]"),
            bundles => {
                f.write_str("[")?;
                for bundle in bundles {
                    write!(f, "{bundle}")?;
                }
                f.write_str("]")
            }
        }
    }
}
