//! Search scopes.
//!
//! A [`SearchContext`] owns everything one search run needs besides the
//! constraint sets themselves: configuration, transducer cache and random
//! number generator. Mutation operators borrow it through a
//! [`MutationScope`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use otml_config::OtmlConfig;
use otml_core::{BundleLimits, FeatureTable};

use crate::cache::TransducerCache;
use crate::error::Result;

/// Borrowed view of a search run, passed to
/// [`ConstraintSet::make_mutation`](crate::ConstraintSet::make_mutation).
pub struct MutationScope<'a, R: Rng> {
    pub(crate) config: &'a OtmlConfig,
    pub(crate) cache: &'a mut TransducerCache,
    pub(crate) rng: &'a mut R,
}

impl<'a, R: Rng> MutationScope<'a, R> {
    pub fn new(config: &'a OtmlConfig, cache: &'a mut TransducerCache, rng: &'a mut R) -> Self {
        Self { config, cache, rng }
    }

    pub fn config(&self) -> &OtmlConfig {
        self.config
    }

    pub fn cache(&self) -> &TransducerCache {
        &*self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TransducerCache {
        &mut *self.cache
    }

    pub fn rng(&mut self) -> &mut R {
        &mut *self.rng
    }

    /// Bundle limits for random generation and the bundle operators.
    pub fn bundle_limits(&self) -> BundleLimits {
        bundle_limits(self.config)
    }
}

pub(crate) fn bundle_limits(config: &OtmlConfig) -> BundleLimits {
    BundleLimits {
        initial_number_of_features: config.initial_number_of_features,
        max_features_in_bundle: config.max_features_in_bundle,
        min_feature_bundles_in_phonotactic: config.min_feature_bundles_in_phonotactic_constraint,
        max_feature_bundles_in_phonotactic: config.max_feature_bundles_in_phonotactic_constraint,
    }
}

/// Owner of the configuration, cache and RNG of one search run.
pub struct SearchContext {
    config: OtmlConfig,
    cache: TransducerCache,
    rng: StdRng,
}

impl SearchContext {
    /// Validates `config` and seeds the RNG from `config.random_seed`, or
    /// from the OS when no seed is set.
    pub fn new(config: OtmlConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(
            event = "search_context_created",
            seed = ?config.random_seed,
            demote_caching = config.demote_caching,
            min_constraints = config.min_constraints_in_constraint_set,
            max_constraints = config.max_constraints_in_constraint_set,
        );
        Ok(Self {
            config,
            cache: TransducerCache::new(),
            rng,
        })
    }

    /// Like [`new`](Self::new) but with an explicit seed, overriding the
    /// configured one.
    pub fn with_seed(config: OtmlConfig, seed: u64) -> Result<Self> {
        Self::new(config.with_random_seed(seed))
    }

    /// Rejects a feature table too small for the configured bundle sizes.
    /// Run it before searching over sets built on `table`.
    pub fn check_feature_table(&self, table: &FeatureTable) -> Result<()> {
        self.config.validate_feature_count(table.feature_count())?;
        Ok(())
    }

    /// Borrows the context for one or more mutations.
    pub fn scope(&mut self) -> MutationScope<'_, StdRng> {
        MutationScope::new(&self.config, &mut self.cache, &mut self.rng)
    }

    pub fn config(&self) -> &OtmlConfig {
        &self.config
    }

    pub fn cache(&self) -> &TransducerCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TransducerCache {
        &mut self.cache
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Drops all cached transducers, e.g. after swapping the feature table.
    pub fn reset_cache(&mut self) {
        self.cache.invalidate_all();
    }
}
