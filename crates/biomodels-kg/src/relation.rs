//! Relationship labels and the (child, label, parent) tuple.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attributes::Descriptor;

/// Edge label. The known vocabulary is small but any string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relation {
    /// Model → compartment
    IsPartOf,
    /// Model → parent model or publication
    IsDerivedFrom,
    /// Species → model
    IsContainedIn,
    Other(String),
}

impl Relation {
    pub fn as_str(&self) -> &str {
        match self {
            Relation::IsPartOf      => "isPartOf",
            Relation::IsDerivedFrom => "isDerivedFrom",
            Relation::IsContainedIn => "isContainedIn",
            Relation::Other(s)      => s,
        }
    }
}

impl From<String> for Relation {
    fn from(s: String) -> Self {
        match s.as_str() {
            "isPartOf"      => Relation::IsPartOf,
            "isDerivedFrom" => Relation::IsDerivedFrom,
            "isContainedIn" => Relation::IsContainedIn,
            _               => Relation::Other(s),
        }
    }
}

impl From<&str> for Relation {
    fn from(s: &str) -> Self { Relation::from(s.to_string()) }
}

impl From<Relation> for String {
    fn from(r: Relation) -> Self { r.as_str().to_string() }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit of input to the graph builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationTuple {
    pub child: Descriptor,
    pub label: Relation,
    pub parent: Descriptor,
}

impl RelationTuple {
    pub fn new(child: Descriptor, label: impl Into<Relation>, parent: Descriptor) -> Self {
        Self { child, label: label.into(), parent }
    }
}
