//! Serializable constraint specifications.
//!
//! This is the list-of-mappings form shared by the JSON grammar files and the
//! bracketed notation parser:
//!
//! ```json
//! [{"type": "Faith", "bundles": []},
//!  {"type": "Phonotactic", "bundles": [{"stop": "+", "voice": "-"}, {"syll": "+"}]}]
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One constraint as written in a grammar file, before validation against a
/// feature table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// Variant name; empty when the `type` key is absent.
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub bundles: Vec<BundleSpec>,
}

impl ConstraintSpec {
    pub fn new(kind: impl Into<String>, bundles: Vec<BundleSpec>) -> Self {
        Self {
            kind: kind.into(),
            bundles,
        }
    }
}

/// A feature bundle as `(feature, sign)` pairs in written order.
///
/// Serialized as a JSON object; document order is kept on both directions so
/// that a grammar file renders the same way it was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleSpec(pub Vec<(String, String)>);

impl BundleSpec {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, s)| (f.as_str(), s.as_str()))
    }
}

impl<F: Into<String>, S: Into<String>> FromIterator<(F, S)> for BundleSpec {
    fn from_iter<I: IntoIterator<Item = (F, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(f, s)| (f.into(), s.into())).collect())
    }
}

impl Serialize for BundleSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (feature, sign) in &self.0 {
            map.serialize_entry(feature, sign)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BundleSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BundleVisitor;

        impl<'de> Visitor<'de> for BundleVisitor {
            type Value = BundleSpec;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from feature name to sign")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<BundleSpec, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((feature, sign)) = access.next_entry::<String, String>()? {
                    entries.push((feature, sign));
                }
                Ok(BundleSpec(entries))
            }
        }

        deserializer.deserialize_map(BundleVisitor)
    }
}
