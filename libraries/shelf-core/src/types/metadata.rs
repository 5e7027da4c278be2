//! Metadata value set
//!
//! Free-form name/value annotations attached to a media item. Names are
//! unique within one item: inserting a pair whose name is already present
//! leaves the set unchanged.

use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single user-defined annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPair {
    pub name: String,
    pub value: String,
}

impl MetadataPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Set of metadata pairs keyed by name, insertion order preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MetadataPair>", into = "Vec<MetadataPair>")]
pub struct MetadataSet(Vec<MetadataPair>);

impl MetadataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw pairs.
    ///
    /// Names are trimmed; a blank name fails validation. Later pairs that
    /// repeat an earlier name are dropped.
    pub fn from_pairs(pairs: impl IntoIterator<Item = MetadataPair>) -> Result<Self> {
        let mut set = Self::new();
        for pair in pairs {
            let name = pair.name.trim();
            if name.is_empty() {
                return Err(ShelfError::validation(["metadata.name"]));
            }
            set.insert(MetadataPair::new(name, pair.value));
        }
        Ok(set)
    }

    /// Insert a pair. Returns `false` (and changes nothing) if the name exists.
    pub fn insert(&mut self, pair: MetadataPair) -> bool {
        if self.contains(&pair.name) {
            return false;
        }
        self.0.push(pair);
        true
    }

    /// Remove the pair with the given name
    pub fn remove(&mut self, name: &str) -> Option<MetadataPair> {
        let index = self.0.iter().position(|p| p.name == name)?;
        Some(self.0.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataPair> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<MetadataPair> {
        self.0
    }
}

impl TryFrom<Vec<MetadataPair>> for MetadataSet {
    type Error = ShelfError;

    fn try_from(pairs: Vec<MetadataPair>) -> Result<Self> {
        Self::from_pairs(pairs)
    }
}

impl From<MetadataSet> for Vec<MetadataPair> {
    fn from(set: MetadataSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a MetadataSet {
    type Item = &'a MetadataPair;
    type IntoIter = std::slice::Iter<'a, MetadataPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One entry of the list form; `value` may be any JSON scalar
#[derive(Debug, Clone, Deserialize)]
pub struct RawMetadataPair {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Metadata as accepted on media writes: either a list of
/// `{name, value}` objects or a plain JSON object.
///
/// Scalar values are stored as their string form and `null` values are
/// skipped. Arrays and objects as values are rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MetadataInput {
    Pairs(Vec<RawMetadataPair>),
    Map(BTreeMap<String, Value>),
}

impl MetadataInput {
    pub fn into_set(self) -> Result<MetadataSet> {
        let raw: Vec<(String, Value)> = match self {
            MetadataInput::Pairs(pairs) => pairs.into_iter().map(|p| (p.name, p.value)).collect(),
            MetadataInput::Map(map) => map.into_iter().collect(),
        };

        let mut pairs = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            if let Some(value) = scalar_text(value)? {
                pairs.push(MetadataPair::new(name, value));
            }
        }
        MetadataSet::from_pairs(pairs)
    }
}

impl From<Vec<MetadataPair>> for MetadataInput {
    fn from(pairs: Vec<MetadataPair>) -> Self {
        MetadataInput::Pairs(
            pairs
                .into_iter()
                .map(|p| RawMetadataPair {
                    name: p.name,
                    value: Value::String(p.value),
                })
                .collect(),
        )
    }
}

fn scalar_text(value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ShelfError::validation(["metadata.value"])),
    }
}
