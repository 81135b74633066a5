//! Test utilities for otml-core
//!
//! Provides common test fixtures used across the crate's test modules.

use crate::feature::{FeatureDefinition, FeatureTable, Sign};

use Sign::{Minus, Plus};

/// Four binary features over a five-segment alphabet.
///
/// | seg | cons | stop | voice | syll |
/// |-----|------|------|-------|------|
/// | a   |  -   |  -   |   +   |  +   |
/// | d   |  +   |  +   |   +   |  -   |
/// | i   |  -   |  -   |   +   |  +   |
/// | s   |  +   |  -   |   -   |  -   |
/// | t   |  +   |  +   |   -   |  -   |
pub fn four_feature_table() -> FeatureTable {
    let features = ["cons", "stop", "voice", "syll"]
        .into_iter()
        .map(|label| FeatureDefinition {
            label: label.to_string(),
            values: vec![Minus, Plus],
        })
        .collect();
    FeatureTable::new(
        features,
        [
            ("t", [Plus, Plus, Minus, Minus]),
            ("d", [Plus, Plus, Plus, Minus]),
            ("s", [Plus, Minus, Minus, Minus]),
            ("a", [Minus, Minus, Plus, Plus]),
            ("i", [Minus, Minus, Plus, Plus]),
        ]
        .into_iter()
        .map(|(symbol, values)| (symbol.to_string(), values.to_vec())),
    )
    .unwrap()
}
