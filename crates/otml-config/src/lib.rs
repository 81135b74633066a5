//! Configuration system for OTML.
//!
//! Load mutation weights and constraint-set bounds from TOML, YAML or JSON
//! files so simulations can be tuned without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use otml_config::OtmlConfig;
//!
//! let config = OtmlConfig::from_toml_str(r#"
//!     min_constraints_in_constraint_set = 1
//!     max_constraints_in_constraint_set = 12
//!
//!     [constraint_set_mutation_weights]
//!     insert_constraint = 2
//!     remove_constraint = 1
//!     demote_constraint = 3
//!     insert_feature_bundle_phonotactic_constraint = 1
//!     remove_feature_bundle_phonotactic_constraint = 1
//!     augment_feature_bundle = 0
//!
//!     [constraint_insertion_weights]
//!     dep = 1
//!     max = 1
//!     ident = 0
//!     phonotactic = 2
//!     tiered_local = 0
//! "#).unwrap();
//!
//! assert_eq!(config.max_constraints_in_constraint_set, 12);
//! assert_eq!(config.constraint_set_mutation_weights.demote_constraint, 3);
//! assert!(config.validate().is_ok());
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use otml_config::OtmlConfig;
//!
//! let config = OtmlConfig::load("otml.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A code path that exists but is not ready for production use was given
    /// a non-zero weight or enabled.
    #[error("Not implemented: {0} must stay disabled")]
    NotImplemented(&'static str),
}

/// Main OTML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OtmlConfig {
    /// Weights of the six constraint-set mutation operators.
    #[serde(default)]
    pub constraint_set_mutation_weights: ConstraintSetMutationWeights,

    /// Weights of the constraint variants drawn by the insert operator.
    #[serde(default)]
    pub constraint_insertion_weights: ConstraintInsertionWeights,

    /// Removal refuses at or below this size.
    #[serde(default = "default_min_constraints")]
    pub min_constraints_in_constraint_set: usize,

    /// Insertion refuses at or above this size.
    #[serde(default = "default_max_constraints")]
    pub max_constraints_in_constraint_set: usize,

    /// Features in a freshly generated feature bundle.
    #[serde(default = "default_initial_number_of_features")]
    pub initial_number_of_features: usize,

    /// Upper bound on features when augmenting a bundle.
    #[serde(default = "default_max_features_in_bundle")]
    pub max_features_in_bundle: usize,

    #[serde(default = "default_min_feature_bundles")]
    pub min_feature_bundles_in_phonotactic_constraint: usize,

    #[serde(default = "default_max_feature_bundles")]
    pub max_feature_bundles_in_phonotactic_constraint: usize,

    /// Candidates with substituted segments. Not supported yet.
    #[serde(default)]
    pub allow_candidates_with_changed_segments: bool,

    /// Update the transducer cache by weight swap on demotion instead of
    /// recomposing.
    #[serde(default = "default_true")]
    pub demote_caching: bool,

    /// Random seed for reproducible searches.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_min_constraints() -> usize {
    1
}

fn default_max_constraints() -> usize {
    20
}

fn default_initial_number_of_features() -> usize {
    1
}

fn default_max_features_in_bundle() -> usize {
    3
}

fn default_min_feature_bundles() -> usize {
    1
}

fn default_max_feature_bundles() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Default for OtmlConfig {
    fn default() -> Self {
        Self {
            constraint_set_mutation_weights: ConstraintSetMutationWeights::default(),
            constraint_insertion_weights: ConstraintInsertionWeights::default(),
            min_constraints_in_constraint_set: default_min_constraints(),
            max_constraints_in_constraint_set: default_max_constraints(),
            initial_number_of_features: default_initial_number_of_features(),
            max_features_in_bundle: default_max_features_in_bundle(),
            min_feature_bundles_in_phonotactic_constraint: default_min_feature_bundles(),
            max_feature_bundles_in_phonotactic_constraint: default_max_feature_bundles(),
            allow_candidates_with_changed_segments: false,
            demote_caching: true,
            random_seed: None,
        }
    }
}

impl OtmlConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a file.
    ///
    /// The format follows the extension: `.yaml`/`.yml` for YAML, `.json`
    /// for JSON, anything else is read as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, doesn't parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path)?,
            Some("json") => Self::from_json_file(path)?,
            _ => Self::from_toml_file(path)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Loads configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Checks weight groups, bounds and disabled features.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Invalid`] when a weight group sums to zero or a
    ///   min/max pair is inverted
    /// - [`ConfigError::NotImplemented`] when `augment_feature_bundle` has a
    ///   non-zero weight or `allow_candidates_with_changed_segments` is set
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.constraint_set_mutation_weights.total() == 0 {
            return Err(ConfigError::Invalid(
                "constraint_set_mutation_weights sum to zero".to_string(),
            ));
        }
        if self.constraint_insertion_weights.total() == 0 {
            return Err(ConfigError::Invalid(
                "constraint_insertion_weights sum to zero".to_string(),
            ));
        }

        if self.constraint_set_mutation_weights.augment_feature_bundle != 0 {
            return Err(ConfigError::NotImplemented("augment_feature_bundle"));
        }
        if self.allow_candidates_with_changed_segments {
            return Err(ConfigError::NotImplemented(
                "allow_candidates_with_changed_segments",
            ));
        }

        if self.min_constraints_in_constraint_set > self.max_constraints_in_constraint_set {
            return Err(ConfigError::Invalid(format!(
                "min_constraints_in_constraint_set ({}) is bigger than max_constraints_in_constraint_set ({})",
                self.min_constraints_in_constraint_set, self.max_constraints_in_constraint_set
            )));
        }
        if self.min_feature_bundles_in_phonotactic_constraint > self.initial_number_of_features {
            return Err(ConfigError::Invalid(format!(
                "min_feature_bundles_in_phonotactic_constraint ({}) is bigger than initial_number_of_features ({})",
                self.min_feature_bundles_in_phonotactic_constraint, self.initial_number_of_features
            )));
        }
        if self.min_feature_bundles_in_phonotactic_constraint
            > self.max_feature_bundles_in_phonotactic_constraint
        {
            return Err(ConfigError::Invalid(format!(
                "min_feature_bundles_in_phonotactic_constraint ({}) is bigger than max_feature_bundles_in_phonotactic_constraint ({})",
                self.min_feature_bundles_in_phonotactic_constraint,
                self.max_feature_bundles_in_phonotactic_constraint
            )));
        }
        Ok(())
    }

    /// Checks the settings that depend on the feature table in use.
    pub fn validate_feature_count(&self, feature_count: usize) -> Result<(), ConfigError> {
        if self.initial_number_of_features > feature_count {
            return Err(ConfigError::Invalid(format!(
                "initial_number_of_features ({}) is bigger than the number of features in the feature table ({})",
                self.initial_number_of_features, feature_count
            )));
        }
        Ok(())
    }

    /// Sets the constraint-set size bounds.
    pub fn with_constraint_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_constraints_in_constraint_set = min;
        self.max_constraints_in_constraint_set = max;
        self
    }

    /// Sets the mutation operator weights.
    pub fn with_mutation_weights(mut self, weights: ConstraintSetMutationWeights) -> Self {
        self.constraint_set_mutation_weights = weights;
        self
    }

    /// Sets the constraint insertion weights.
    pub fn with_insertion_weights(mut self, weights: ConstraintInsertionWeights) -> Self {
        self.constraint_insertion_weights = weights;
        self
    }

    /// Enables or disables weight-swap cache updates on demotion.
    pub fn with_demote_caching(mut self, enabled: bool) -> Self {
        self.demote_caching = enabled;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}

/// Weights of the constraint-set mutation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstraintSetMutationWeights {
    #[serde(default)]
    pub insert_constraint: u32,
    #[serde(default)]
    pub remove_constraint: u32,
    #[serde(default)]
    pub demote_constraint: u32,
    #[serde(default)]
    pub insert_feature_bundle_phonotactic_constraint: u32,
    #[serde(default)]
    pub remove_feature_bundle_phonotactic_constraint: u32,
    /// Must stay zero; see [`ConfigError::NotImplemented`].
    #[serde(default)]
    pub augment_feature_bundle: u32,
}

impl ConstraintSetMutationWeights {
    /// Only the given operator is ever selected.
    pub fn only(select: impl FnOnce(&mut Self) -> &mut u32) -> Self {
        let mut weights = Self {
            insert_constraint: 0,
            remove_constraint: 0,
            demote_constraint: 0,
            insert_feature_bundle_phonotactic_constraint: 0,
            remove_feature_bundle_phonotactic_constraint: 0,
            augment_feature_bundle: 0,
        };
        *select(&mut weights) = 1;
        weights
    }

    pub fn total(&self) -> u64 {
        [
            self.insert_constraint,
            self.remove_constraint,
            self.demote_constraint,
            self.insert_feature_bundle_phonotactic_constraint,
            self.remove_feature_bundle_phonotactic_constraint,
            self.augment_feature_bundle,
        ]
        .iter()
        .map(|&w| u64::from(w))
        .sum()
    }
}

impl Default for ConstraintSetMutationWeights {
    fn default() -> Self {
        Self {
            insert_constraint: 1,
            remove_constraint: 1,
            demote_constraint: 1,
            insert_feature_bundle_phonotactic_constraint: 1,
            remove_feature_bundle_phonotactic_constraint: 1,
            augment_feature_bundle: 0,
        }
    }
}

/// Weights of the constraint variants the insert operator may create.
///
/// Accepts the capitalized variant names (`Dep`, `Max`, ...) as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstraintInsertionWeights {
    #[serde(default, alias = "Dep")]
    pub dep: u32,
    #[serde(default, alias = "Max")]
    pub max: u32,
    #[serde(default, alias = "Ident")]
    pub ident: u32,
    #[serde(default, alias = "Phonotactic")]
    pub phonotactic: u32,
    #[serde(default, alias = "TieredLocal", alias = "tiered")]
    pub tiered_local: u32,
}

impl ConstraintInsertionWeights {
    pub fn total(&self) -> u64 {
        [
            self.dep,
            self.max,
            self.ident,
            self.phonotactic,
            self.tiered_local,
        ]
        .iter()
        .map(|&w| u64::from(w))
        .sum()
    }
}

impl Default for ConstraintInsertionWeights {
    fn default() -> Self {
        Self {
            dep: 1,
            max: 1,
            ident: 1,
            phonotactic: 1,
            tiered_local: 1,
        }
    }
}
