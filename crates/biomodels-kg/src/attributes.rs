//! Node attributes and entity descriptors.
//!
//! A descriptor is the key-value mapping an extractor produces for one end of
//! a relationship. The `"name"` key identifies the node; every other key is
//! copied onto the node as an attribute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key under which a descriptor carries its node name.
pub const NAME_KEY: &str = "name";

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Boolean(b) => write!(f, "{b}"),
            AttrValue::Integer(i) => write!(f, "{i}"),
            AttrValue::Float(x)   => write!(f, "{x}"),
            AttrValue::Text(s)    => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self { AttrValue::Text(s.to_string()) }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self { AttrValue::Text(s) }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self { AttrValue::Integer(i) }
}

impl From<f64> for AttrValue {
    fn from(x: f64) -> Self { AttrValue::Float(x) }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self { AttrValue::Boolean(b) }
}

// ── Attributes ────────────────────────────────────────────────────────────────

/// Ordered attribute map. Merging is last-write-wins per key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Overwrite/extend `self` with every entry of `other`.
    pub fn merge(&mut self, other: &Attributes) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ── Descriptor ────────────────────────────────────────────────────────────────

/// One end of a relationship tuple: a `"name"` plus node attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor(Attributes);

impl Descriptor {
    /// Start a descriptor for the node called `name`.
    pub fn named(name: impl Into<String>) -> Self {
        let mut attrs = Attributes::new();
        attrs.insert(NAME_KEY, name.into());
        Self(attrs)
    }

    /// Wrap an arbitrary attribute map. The map may lack a `"name"`; that is
    /// only detected when the descriptor is folded into a graph.
    pub fn from_attributes(attrs: Attributes) -> Self {
        Self(attrs)
    }

    /// Builder-style attribute insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.0.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key, value);
    }

    /// The node name, rendered as text whatever its value type.
    pub fn name(&self) -> Option<String> {
        self.0.get(NAME_KEY).map(|v| v.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Every attribute except `"name"`. Does not modify the descriptor.
    pub fn residual(&self) -> Attributes {
        self.0
            .iter()
            .filter(|(k, _)| *k != NAME_KEY)
            .map(|(k, v)| (k, v.clone()))
            .collect()
    }
}

// ── Display colors ────────────────────────────────────────────────────────────

/// Display color conventions for node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Model entity
    Green,
    /// Compartment
    Yellow,
    /// Species
    Blue,
    /// External publication reference
    Red,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green  => "green",
            Color::Yellow => "yellow",
            Color::Blue   => "blue",
            Color::Red    => "red",
        }
    }
}

impl From<Color> for AttrValue {
    fn from(c: Color) -> Self { AttrValue::Text(c.as_str().to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residual_excludes_name_and_keeps_descriptor() {
        let d = Descriptor::named("M1").with("color", Color::Green).with("k1", 1i64);
        let residual = d.residual();
        assert!(!residual.contains_key("name"));
        assert_eq!(residual.len(), 2);
        assert_eq!(d.name().as_deref(), Some("M1"));
    }

    #[test]
    fn test_merge_is_last_write_wins() {
        let mut a: Attributes = [("color", "green"), ("URI", "u1")].into_iter().collect();
        let b: Attributes = [("URI", "u2"), ("created", "2005-01-01")].into_iter().collect();
        a.merge(&b);
        assert_eq!(a.get("color").and_then(AttrValue::as_str), Some("green"));
        assert_eq!(a.get("URI").and_then(AttrValue::as_str), Some("u2"));
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_descriptor_from_json_without_name() {
        let d: Descriptor = serde_json::from_str(r#"{"color": "red", "k": 3}"#).unwrap();
        assert!(d.name().is_none());
        assert_eq!(d.get("k").and_then(AttrValue::as_i64), Some(3));
    }

    #[test]
    fn test_numeric_name_renders_as_text() {
        let d = Descriptor::from_attributes([("name", 42i64)].into_iter().collect());
        assert_eq!(d.name().as_deref(), Some("42"));
    }
}
