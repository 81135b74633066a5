//! OTML Core - Core types for Optimality Theory grammar search
//!
//! This crate provides the building blocks the constraint-set engine is made
//! of:
//! - Feature tables and feature bundles
//! - The closed set of constraint variants and their specifications
//! - Weighted finite-state transducers with intersection and weight swap
//! - Weighted random choice

pub mod constraint;
pub mod error;
pub mod feature;
pub mod transducer;
pub mod weighted;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod transducer_tests;

pub use constraint::{
    BundleLimits, BundleSpec, Constraint, ConstraintKind, ConstraintSpec, CONSTRAINT_KIND_COUNT,
};
pub use error::CoreError;
pub use feature::{FeatureBundle, FeatureDefinition, FeatureTable, Segment, Sign};
pub use transducer::{Label, Transducer, TransducerArc, Weights};
pub use weighted::WeightedPool;
