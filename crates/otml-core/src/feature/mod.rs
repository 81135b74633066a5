//! Phonological feature tables and feature bundles.
//!
//! A [`FeatureTable`] lists the binary features of a simulation and the
//! segments of its alphabet, each segment carrying one [`Sign`] per feature.
//! A [`FeatureBundle`] picks out a natural class of segments by fixing the
//! sign of some features.
//!
//! # Example
//!
//! ```
//! use otml_core::feature::{FeatureTable, Sign};
//!
//! let table = FeatureTable::from_json_str(r#"{
//!     "feature": [
//!         {"label": "cons", "values": ["-", "+"]},
//!         {"label": "voice", "values": ["-", "+"]}
//!     ],
//!     "feature_table": {
//!         "t": ["+", "-"],
//!         "d": ["+", "+"],
//!         "a": ["-", "+"]
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(table.feature_count(), 2);
//! assert_eq!(table.segment_count(), 3);
//! assert!(table.is_valid_feature("voice"));
//! assert_eq!(table.segment_by_symbol("d").unwrap().value(1), Sign::Plus);
//! ```

mod bundle;

#[cfg(test)]
mod tests;

pub use bundle::FeatureBundle;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};

/// Polarity of a binary feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Sign {
    /// Parses a sign from its one-character symbol.
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        match symbol {
            "+" => Ok(Sign::Plus),
            "-" => Ok(Sign::Minus),
            other => Err(CoreError::IllegalSign(other.to_string())),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Sign::Plus => "+",
            Sign::Minus => "-",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A feature label with the signs it may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDefinition {
    pub label: String,
    pub values: Vec<Sign>,
}

/// A segment of the alphabet with one sign per feature, in feature order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    symbol: String,
    values: Vec<Sign>,
}

impl Segment {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the sign of the feature at `feature_index`.
    pub fn value(&self, feature_index: usize) -> Sign {
        self.values[feature_index]
    }
}

// On-disk layout of a feature table.
#[derive(Debug, Deserialize, Serialize)]
struct FeatureTableFile {
    feature: Vec<FeatureDefinition>,
    feature_table: BTreeMap<String, Vec<Sign>>,
}

/// The features and segments in effect for a simulation.
///
/// Segments are kept in symbol order, so segment indices are stable for a
/// given table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTable {
    features: Vec<FeatureDefinition>,
    feature_index: HashMap<String, usize>,
    segments: Vec<Segment>,
}

impl FeatureTable {
    /// Builds a table from feature definitions and `(symbol, signs)` pairs.
    ///
    /// # Errors
    ///
    /// Fails when a feature label repeats, when a segment's sign count differs
    /// from the feature count, or when a sign is not allowed for its feature.
    pub fn new(
        features: Vec<FeatureDefinition>,
        segments: impl IntoIterator<Item = (String, Vec<Sign>)>,
    ) -> Result<Self> {
        let mut feature_index = HashMap::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            if feature_index.insert(feature.label.clone(), index).is_some() {
                return Err(CoreError::InvalidFeatureTable(format!(
                    "duplicate feature '{}'",
                    feature.label
                )));
            }
        }

        let mut checked = Vec::new();
        for (symbol, values) in segments {
            if values.len() != features.len() {
                return Err(CoreError::InvalidFeatureTable(format!(
                    "segment '{}' has {} values, expected {}",
                    symbol,
                    values.len(),
                    features.len()
                )));
            }
            for (feature, value) in features.iter().zip(&values) {
                if !feature.values.contains(value) {
                    return Err(CoreError::InvalidFeatureTable(format!(
                        "segment '{}' has illegal value '{}' for feature '{}'",
                        symbol, value, feature.label
                    )));
                }
            }
            checked.push(Segment { symbol, values });
        }
        checked.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        Ok(Self {
            features,
            feature_index,
            segments: checked,
        })
    }

    /// Parses a feature table from its JSON form.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let file: FeatureTableFile = serde_json::from_str(s)?;
        Self::new(file.feature, file.feature_table)
    }

    /// Loads a feature table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&contents)?;
        debug!(
            event = "feature_table_loaded",
            path = %path.display(),
            features = table.feature_count(),
            segments = table.segment_count(),
        );
        Ok(table)
    }

    /// Serializes the table back to its JSON form.
    pub fn to_json(&self) -> Result<String> {
        let file = FeatureTableFile {
            feature: self.features.clone(),
            feature_table: self
                .segments
                .iter()
                .map(|s| (s.symbol.clone(), s.values.clone()))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn features(&self) -> &[FeatureDefinition] {
        &self.features
    }

    /// Iterates the feature labels in table order.
    pub fn feature_labels(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.label.as_str())
    }

    pub fn feature_index(&self, label: &str) -> Option<usize> {
        self.feature_index.get(label).copied()
    }

    pub fn is_valid_feature(&self, label: &str) -> bool {
        self.feature_index.contains_key(label)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segment_index(&self, symbol: &str) -> Option<usize> {
        self.segments.iter().position(|s| s.symbol == symbol)
    }

    pub fn segment_by_symbol(&self, symbol: &str) -> Option<&Segment> {
        self.segment_index(symbol).map(|i| &self.segments[i])
    }

    /// Draws one of the allowed signs of `label`.
    pub fn random_value<R: Rng>(&self, label: &str, rng: &mut R) -> Option<Sign> {
        let index = self.feature_index(label)?;
        self.features[index].values.choose(rng).copied()
    }

    /// Returns true if the segment at `segment_index` belongs to the natural
    /// class described by `bundle`. The empty bundle matches every segment.
    pub fn matches(&self, segment_index: usize, bundle: &FeatureBundle) -> bool {
        let Some(segment) = self.segments.get(segment_index) else {
            return false;
        };
        bundle.iter().all(|(label, sign)| {
            self.feature_index(label)
                .is_some_and(|index| segment.values[index] == sign)
        })
    }
}
