//! OTML Grammar - Ranked constraint sets and their search operators
//!
//! This crate implements the grammar side of the MDL search:
//! - [`ConstraintSet`]: ordered constraints with MDL encoding length
//! - Mutation operators driven by [`MutationScope`]
//! - [`TransducerCache`]: memoized composition of constraint transducers
//! - Bracketed notation parsing and rendering
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use otml_config::OtmlConfig;
//! use otml_core::FeatureTable;
//! use otml_grammar::{ConstraintSet, SearchContext};
//!
//! let table = Arc::new(FeatureTable::from_json_str(r#"{
//!     "feature": [{"label": "cons", "values": ["-", "+"]}],
//!     "feature_table": {"t": ["+"], "a": ["-"]}
//! }"#).unwrap());
//!
//! let mut grammar = ConstraintSet::from_notation("Faith[] >> Max[[+cons]]", table).unwrap();
//! let mut context = SearchContext::with_seed(OtmlConfig::default(), 7).unwrap();
//!
//! let transducer = grammar.get_transducer(context.cache_mut()).unwrap();
//! assert_eq!(transducer.weight_dimension(), 2);
//!
//! grammar.demote_constraint_at(0, &mut context.scope());
//! assert_eq!(grammar.canonical_key(), "Max[[+cons]] >> Faith[]");
//! ```

pub mod cache;
pub mod constraint_set;
pub mod error;
pub mod mutation;
pub mod notation;
pub mod scope;

#[cfg(test)]
mod cache_tests;
#[cfg(test)]
mod constraint_set_tests;

pub use cache::{CacheStats, TransducerCache};
pub use constraint_set::ConstraintSet;
pub use error::{GrammarError, Result};
pub use mutation::ConstraintSetMutation;
pub use notation::{parse_notation, to_notation, CONSTRAINTS_DELIMITER};
pub use scope::{MutationScope, SearchContext};
