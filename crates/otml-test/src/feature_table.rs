//! Feature table fixtures.
//!
//! # Example
//!
//! ```
//! use otml_test::feature_table::stop_voice_table;
//!
//! let table = stop_voice_table();
//! assert_eq!(table.feature_count(), 4);
//! assert_eq!(table.segment_count(), 5);
//! ```

use std::sync::Arc;

use otml_core::FeatureTable;

/// Four features (`cons`, `stop`, `voice`, `syll`) over `t d s a i`.
pub const STOP_VOICE_TABLE_JSON: &str = r#"{
    "feature": [
        {"label": "cons", "values": ["-", "+"]},
        {"label": "stop", "values": ["-", "+"]},
        {"label": "voice", "values": ["-", "+"]},
        {"label": "syll", "values": ["-", "+"]}
    ],
    "feature_table": {
        "t": ["+", "+", "-", "-"],
        "d": ["+", "+", "+", "-"],
        "s": ["+", "-", "-", "-"],
        "a": ["-", "-", "+", "+"],
        "i": ["-", "-", "+", "+"]
    }
}"#;

/// Parses [`STOP_VOICE_TABLE_JSON`].
pub fn stop_voice_table() -> Arc<FeatureTable> {
    Arc::new(FeatureTable::from_json_str(STOP_VOICE_TABLE_JSON).expect("fixture table is valid"))
}
