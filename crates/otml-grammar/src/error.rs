//! Error types for grammar construction and materialization

use otml_config::ConfigError;
use otml_core::CoreError;
use thiserror::Error;

/// Error raised while building, loading or materializing a constraint set.
///
/// Mutation operators never return this: a mutation that cannot apply
/// reports `false` instead.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// Invalid constraint specification (missing or unknown type, illegal
    /// feature or sign)
    #[error(transparent)]
    Constraint(#[from] CoreError),

    /// Malformed bracketed notation
    #[error("Grammar parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Search configuration rejected by validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A constraint set without constraints has no transducer
    #[error("Constraint set is empty")]
    EmptyConstraintSet,
}

/// Result type alias for grammar operations
pub type Result<T> = std::result::Result<T, GrammarError>;
