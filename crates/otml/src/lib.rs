//! OTML - Optimality Theory grammar search with MDL scoring
//!
//! Build a constraint set from a feature table, mutate it inside a
//! [`SearchContext`], and score each candidate by its encoding length.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use otml::prelude::*;
//!
//! let table = Arc::new(FeatureTable::from_json_str(r#"{
//!     "feature": [
//!         {"label": "cons", "values": ["-", "+"]},
//!         {"label": "voice", "values": ["-", "+"]}
//!     ],
//!     "feature_table": {"t": ["+", "-"], "d": ["+", "+"], "a": ["-", "+"]}
//! }"#).unwrap());
//!
//! let mut grammar = ConstraintSet::from_notation("Faith[]", table).unwrap();
//! let mut context = SearchContext::with_seed(OtmlConfig::default(), 42).unwrap();
//!
//! let mut scope = context.scope();
//! for _ in 0..20 {
//!     grammar.make_mutation(&mut scope);
//! }
//! assert!(grammar.len() <= 20);
//! assert!(grammar.encoding_length() >= 4);
//! ```

pub use otml_config::{
    ConfigError, ConstraintInsertionWeights, ConstraintSetMutationWeights, OtmlConfig,
};
pub use otml_core::{
    Constraint, ConstraintKind, ConstraintSpec, CoreError, FeatureBundle, FeatureTable, Sign,
    Transducer,
};
pub use otml_grammar::{
    parse_notation, to_notation, CacheStats, ConstraintSet, ConstraintSetMutation, GrammarError,
    MutationScope, SearchContext, TransducerCache,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{ConfigError, GrammarError, OtmlConfig};
    pub use super::{Constraint, ConstraintKind, FeatureTable, Sign};
    pub use super::{ConstraintSet, MutationScope, SearchContext, TransducerCache};
}
