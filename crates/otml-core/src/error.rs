//! Error types for OTML core types

use thiserror::Error;

/// Error raised while building feature tables, bundles or constraints.
#[derive(Debug, Error)]
pub enum CoreError {
    /// IO error while reading a feature table file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Feature name not present in the feature table
    #[error("Illegal feature: {0}")]
    IllegalFeature(String),

    /// Sign other than `+` or `-`
    #[error("Illegal sign '{0}', expected '+' or '-'")]
    IllegalSign(String),

    /// Constraint specification without a `type`
    #[error("Missing 'type' key in constraint specification")]
    MissingType,

    /// Constraint `type` that names no known variant
    #[error("Unknown constraint type: {0}")]
    UnknownConstraint(String),

    /// Inconsistent feature table definition
    #[error("Invalid feature table: {0}")]
    InvalidFeatureTable(String),
}

/// Result type alias for OTML core operations
pub type Result<T> = std::result::Result<T, CoreError>;
