//! Configuration fixtures.
//!
//! # Example
//!
//! ```
//! use otml_test::config::only;
//!
//! let config = only(|w| &mut w.demote_constraint);
//! assert_eq!(config.constraint_set_mutation_weights.total(), 1);
//! assert!(config.validate().is_ok());
//! ```

use otml_config::{ConstraintSetMutationWeights, OtmlConfig};

/// Default weights with a seed and bounds of `[1, 6]`.
pub fn test_config() -> OtmlConfig {
    OtmlConfig::default()
        .with_random_seed(42)
        .with_constraint_bounds(1, 6)
}

/// [`test_config`] with every mutation weight zero except the selected one.
pub fn only(select: impl FnOnce(&mut ConstraintSetMutationWeights) -> &mut u32) -> OtmlConfig {
    test_config().with_mutation_weights(ConstraintSetMutationWeights::only(select))
}
