//! Constraint-set mutation operators.
//!
//! [`ConstraintSet::make_mutation`] draws one operator by configured weight
//! and applies it in place. An operator that cannot apply leaves the set
//! untouched and reports `false`.

use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, warn};

use otml_config::OtmlConfig;
use otml_core::{Constraint, ConstraintKind, WeightedPool};

use crate::constraint_set::ConstraintSet;
use crate::scope::MutationScope;

/// The six constraint-set mutation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintSetMutation {
    InsertConstraint,
    RemoveConstraint,
    DemoteConstraint,
    InsertFeatureBundlePhonotactic,
    RemoveFeatureBundlePhonotactic,
    AugmentFeatureBundle,
}

impl ConstraintSetMutation {
    pub const ALL: [ConstraintSetMutation; 6] = [
        ConstraintSetMutation::InsertConstraint,
        ConstraintSetMutation::RemoveConstraint,
        ConstraintSetMutation::DemoteConstraint,
        ConstraintSetMutation::InsertFeatureBundlePhonotactic,
        ConstraintSetMutation::RemoveFeatureBundlePhonotactic,
        ConstraintSetMutation::AugmentFeatureBundle,
    ];

    /// Configuration key of the operator's weight.
    pub fn name(self) -> &'static str {
        match self {
            ConstraintSetMutation::InsertConstraint => "insert_constraint",
            ConstraintSetMutation::RemoveConstraint => "remove_constraint",
            ConstraintSetMutation::DemoteConstraint => "demote_constraint",
            ConstraintSetMutation::InsertFeatureBundlePhonotactic => {
                "insert_feature_bundle_phonotactic_constraint"
            }
            ConstraintSetMutation::RemoveFeatureBundlePhonotactic => {
                "remove_feature_bundle_phonotactic_constraint"
            }
            ConstraintSetMutation::AugmentFeatureBundle => "augment_feature_bundle",
        }
    }

    pub fn weight(self, config: &OtmlConfig) -> u32 {
        let weights = &config.constraint_set_mutation_weights;
        match self {
            ConstraintSetMutation::InsertConstraint => weights.insert_constraint,
            ConstraintSetMutation::RemoveConstraint => weights.remove_constraint,
            ConstraintSetMutation::DemoteConstraint => weights.demote_constraint,
            ConstraintSetMutation::InsertFeatureBundlePhonotactic => {
                weights.insert_feature_bundle_phonotactic_constraint
            }
            ConstraintSetMutation::RemoveFeatureBundlePhonotactic => {
                weights.remove_feature_bundle_phonotactic_constraint
            }
            ConstraintSetMutation::AugmentFeatureBundle => weights.augment_feature_bundle,
        }
    }
}

impl fmt::Display for ConstraintSetMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn insertion_weight(kind: ConstraintKind, config: &OtmlConfig) -> u32 {
    let weights = &config.constraint_insertion_weights;
    match kind {
        ConstraintKind::Dep => weights.dep,
        ConstraintKind::Max => weights.max,
        ConstraintKind::Ident => weights.ident,
        ConstraintKind::Phonotactic => weights.phonotactic,
        ConstraintKind::TieredLocal => weights.tiered_local,
        ConstraintKind::Faith => 0,
    }
}

impl ConstraintSet {
    /// Applies one weighted-random mutation. Returns whether the set changed.
    pub fn make_mutation<R: Rng>(&mut self, scope: &mut MutationScope<'_, R>) -> bool {
        let pool = WeightedPool::new(
            ConstraintSetMutation::ALL
                .into_iter()
                .map(|m| (m, m.weight(scope.config))),
        );
        let Some(&mutation) = pool.choose(&mut *scope.rng) else {
            warn!(event = "mutation_skipped", reason = "all mutation weights are zero");
            return false;
        };
        self.apply_mutation(mutation, scope)
    }

    /// Applies a specific operator.
    pub fn apply_mutation<R: Rng>(
        &mut self,
        mutation: ConstraintSetMutation,
        scope: &mut MutationScope<'_, R>,
    ) -> bool {
        debug!(event = "mutation", operator = mutation.name(), constraints = self.len());
        let applied = match mutation {
            ConstraintSetMutation::InsertConstraint => self.insert_constraint(scope),
            ConstraintSetMutation::RemoveConstraint => self.remove_constraint(scope),
            ConstraintSetMutation::DemoteConstraint => self.demote_constraint(scope),
            ConstraintSetMutation::InsertFeatureBundlePhonotactic => {
                self.insert_feature_bundle_phonotactic_constraint(scope)
            }
            ConstraintSetMutation::RemoveFeatureBundlePhonotactic => {
                self.remove_feature_bundle_phonotactic_constraint(scope)
            }
            ConstraintSetMutation::AugmentFeatureBundle => self.augment_feature_bundle(scope),
        };
        debug!(
            event = "mutation_result",
            operator = mutation.name(),
            applied,
            constraints = self.len(),
        );
        applied
    }

    /// Inserts a random non-Faith constraint at a random rank.
    ///
    /// Refuses at the configured maximum size or when the drawn constraint
    /// is already in the set.
    pub fn insert_constraint<R: Rng>(&mut self, scope: &mut MutationScope<'_, R>) -> bool {
        let config = scope.config;
        if self.constraints.len() >= config.max_constraints_in_constraint_set
            || !self.fits_feature_table(config)
        {
            return false;
        }
        let pool = WeightedPool::new(
            ConstraintKind::INSERTABLE
                .into_iter()
                .map(|kind| (kind, insertion_weight(kind, config))),
        );
        let Some(&kind) = pool.choose(&mut *scope.rng) else {
            return false;
        };
        let limits = scope.bundle_limits();
        let constraint =
            Constraint::generate_random(kind, &self.feature_table, &limits, &mut *scope.rng);
        let index = scope.rng.random_range(0..=self.constraints.len());
        if self.constraints.contains(&constraint) {
            debug!(event = "insert_duplicate", constraint = %constraint);
            return false;
        }
        self.constraints.insert(index, constraint);
        true
    }

    /// Removes a random non-Faith constraint. Refuses at the configured
    /// minimum size.
    pub fn remove_constraint<R: Rng>(&mut self, scope: &mut MutationScope<'_, R>) -> bool {
        if self.constraints.len() <= scope.config.min_constraints_in_constraint_set {
            return false;
        }
        let removable: Vec<usize> = self.non_faith_indices();
        let Some(&index) = removable.choose(&mut *scope.rng) else {
            return false;
        };
        self.constraints.remove(index);
        true
    }

    /// Swaps a random constraint with the one ranked just below it.
    pub fn demote_constraint<R: Rng>(&mut self, scope: &mut MutationScope<'_, R>) -> bool {
        if self.constraints.len() <= 1 {
            return false;
        }
        let index = scope.rng.random_range(0..self.constraints.len() - 1);
        self.demote_constraint_at(index, scope)
    }

    /// Swaps ranks `index` and `index + 1`.
    ///
    /// With demote caching on, the transducer of the new order is derived
    /// from the current one by swapping arc weights, and stored in the cache
    /// before returning.
    pub fn demote_constraint_at<R: Rng>(
        &mut self,
        index: usize,
        scope: &mut MutationScope<'_, R>,
    ) -> bool {
        if index + 1 >= self.constraints.len() {
            return false;
        }
        let snapshot = if scope.config.demote_caching {
            match self.get_transducer(scope.cache) {
                Ok(transducer) => Some(transducer),
                Err(e) => {
                    warn!(event = "demote_cache_skipped", error = %e);
                    None
                }
            }
        } else {
            None
        };

        self.constraints.swap(index, index + 1);

        if let Some(snapshot) = snapshot {
            let mut transducer = (*snapshot).clone();
            transducer.swap_weights_on_arcs(index, index + 1);
            scope.cache.insert(self.canonical_key(), transducer);
        }
        true
    }

    /// Adds a bundle to a random Phonotactic constraint.
    pub fn insert_feature_bundle_phonotactic_constraint<R: Rng>(
        &mut self,
        scope: &mut MutationScope<'_, R>,
    ) -> bool {
        let Some(index) = self.pick_index(scope, |c| c.kind() == ConstraintKind::Phonotactic)
        else {
            return false;
        };
        if !self.fits_feature_table(scope.config) {
            return false;
        }
        let limits = scope.bundle_limits();
        self.constraints[index].insert_feature_bundle(
            &self.feature_table,
            &limits,
            &mut *scope.rng,
        )
    }

    /// Removes a bundle from a random Phonotactic constraint.
    pub fn remove_feature_bundle_phonotactic_constraint<R: Rng>(
        &mut self,
        scope: &mut MutationScope<'_, R>,
    ) -> bool {
        let Some(index) = self.pick_index(scope, |c| c.kind() == ConstraintKind::Phonotactic)
        else {
            return false;
        };
        let limits = scope.bundle_limits();
        self.constraints[index].remove_feature_bundle(&limits, &mut *scope.rng)
    }

    /// Adds a feature to a bundle of a random non-Faith constraint.
    ///
    /// Configuration validation keeps this operator's weight at zero, so
    /// `make_mutation` only reaches it with an unvalidated configuration.
    pub fn augment_feature_bundle<R: Rng>(&mut self, scope: &mut MutationScope<'_, R>) -> bool {
        let Some(index) = self.pick_index(scope, |c| c.kind() != ConstraintKind::Faith) else {
            return false;
        };
        let limits = scope.bundle_limits();
        self.constraints[index].augment_feature_bundle(
            &self.feature_table,
            &limits,
            &mut *scope.rng,
        )
    }

    // Random bundles need `initial_number_of_features` distinct features.
    fn fits_feature_table(&self, config: &OtmlConfig) -> bool {
        match config.validate_feature_count(self.feature_table.feature_count()) {
            Ok(()) => true,
            Err(e) => {
                warn!(event = "feature_table_too_small", error = %e);
                false
            }
        }
    }

    fn non_faith_indices(&self) -> Vec<usize> {
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind() != ConstraintKind::Faith)
            .map(|(i, _)| i)
            .collect()
    }

    fn pick_index<R: Rng>(
        &self,
        scope: &mut MutationScope<'_, R>,
        filter: impl Fn(&Constraint) -> bool,
    ) -> Option<usize> {
        let candidates: Vec<usize> = self
            .constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| filter(*c))
            .map(|(i, _)| i)
            .collect();
        candidates.choose(&mut *scope.rng).copied()
    }
}
