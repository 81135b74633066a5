//! Feature bundles: natural classes described by signed features.

use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

use super::{FeatureTable, Sign};
use crate::error::{CoreError, Result};

/// An ordered mapping from feature label to sign.
///
/// Entries keep their insertion order, which is the order used when the
/// bundle is rendered. Equality ignores that order: `[+cons, -voice]` and
/// `[-voice, +cons]` compare equal but render differently.
#[derive(Debug, Clone, Default, Eq)]
pub struct FeatureBundle {
    entries: Vec<(String, Sign)>,
}

impl FeatureBundle {
    /// Builds a bundle, checking every label against `table`.
    ///
    /// A label given twice keeps its position and takes the later sign.
    pub fn new(
        entries: impl IntoIterator<Item = (String, Sign)>,
        table: &FeatureTable,
    ) -> Result<Self> {
        let mut bundle = Self::default();
        for (label, sign) in entries {
            if !table.is_valid_feature(&label) {
                return Err(CoreError::IllegalFeature(label));
            }
            bundle.set(label, sign);
        }
        Ok(bundle)
    }

    /// Draws a bundle of `feature_count` distinct features with random signs.
    ///
    /// `feature_count` must not exceed `table.feature_count()`; configurations
    /// are checked against the table before a search draws bundles.
    pub fn generate_random<R: Rng>(
        table: &FeatureTable,
        feature_count: usize,
        rng: &mut R,
    ) -> Self {
        debug_assert!(feature_count <= table.feature_count());
        let labels: Vec<&str> = table.feature_labels().collect();
        let chosen: Vec<&str> = labels.choose_multiple(rng, feature_count).copied().collect();

        let mut bundle = Self::default();
        for label in chosen {
            if let Some(sign) = table.random_value(label, rng) {
                bundle.set(label.to_string(), sign);
            }
        }
        bundle
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Sign)> {
        self.entries.iter().map(|(label, sign)| (label.as_str(), *sign))
    }

    pub fn get(&self, label: &str) -> Option<Sign> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, sign)| *sign)
    }

    /// Two symbols per feature: the label and its sign.
    pub fn encoding_length(&self) -> usize {
        2 * self.entries.len()
    }

    /// Adds one feature not yet in the bundle, with a random sign.
    ///
    /// Returns false when the bundle already holds `max_features` features or
    /// every feature of the table.
    pub fn augment<R: Rng>(
        &mut self,
        table: &FeatureTable,
        max_features: usize,
        rng: &mut R,
    ) -> bool {
        if self.entries.len() >= max_features {
            return false;
        }
        let available: Vec<&str> = table
            .feature_labels()
            .filter(|label| self.get(label).is_none())
            .collect();
        let Some(label) = available.choose(rng).copied() else {
            return false;
        };
        match table.random_value(label, rng) {
            Some(sign) => {
                self.set(label.to_string(), sign);
                true
            }
            None => false,
        }
    }

    fn set(&mut self, label: String, sign: Sign) {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = sign,
            None => self.entries.push((label, sign)),
        }
    }
}

impl PartialEq for FeatureBundle {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(label, sign)| other.get(label) == Some(*sign))
    }
}

impl fmt::Display for FeatureBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (label, sign)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{sign}{label}")?;
        }
        f.write_str("]")
    }
}
