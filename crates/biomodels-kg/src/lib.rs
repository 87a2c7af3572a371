//! biomodels-kg: Relationship tuples and the directed graph they fold into.
//!
//! Extractors emit [`RelationTuple`]s; [`build_graph`] folds any stream of
//! them into a [`RelationGraph`] whose nodes are keyed by name.

pub mod attributes;
pub mod relation;
pub mod graph;

pub use attributes::{AttrValue, Attributes, Color, Descriptor};
pub use relation::{Relation, RelationTuple};
pub use graph::{build_graph, EntityNode, RelationGraph};
