//! Directed relationship graph and the tuple-folding builder.
//!
//! Nodes are keyed by name. Folding a tuple upserts both endpoints (merging
//! attributes last-write-wins) and then sets the child → parent edge label,
//! overwriting any label an earlier tuple gave the same pair.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};

use biomodels_common::error::{BioModelsError, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, info};

use crate::attributes::{AttrValue, Attributes};
use crate::relation::{Relation, RelationTuple};

/// A named entity and its merged attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityNode {
    pub name: String,
    pub attributes: Attributes,
}

impl EntityNode {
    pub fn color(&self) -> Option<&str> {
        self.attributes.get("color").and_then(AttrValue::as_str)
    }
}

/// Directed graph of entities (nodes) and labelled relationships (edges).
#[derive(Debug, Default)]
pub struct RelationGraph {
    graph: DiGraph<EntityNode, Relation>,
    /// Node name → node index
    index: HashMap<String, NodeIndex>,
    /// Tuples folded so far
    folded: usize,
}

impl RelationGraph {
    pub fn new() -> Self { Self::default() }

    // ── Mutation ──────────────────────────────────────────────────────────────

    /// Insert `name` if absent, then merge `attrs` into it.
    pub fn upsert_node(&mut self, name: &str, attrs: &Attributes) -> NodeIndex {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.graph.add_node(EntityNode {
                    name: name.to_string(),
                    attributes: Attributes::new(),
                });
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        self.graph[idx].attributes.merge(attrs);
        idx
    }

    /// Set the label of the `child → parent` edge, creating missing endpoints.
    /// An existing edge keeps its identity and takes the new label.
    pub fn set_edge(&mut self, child: &str, parent: &str, label: Relation) {
        let empty = Attributes::new();
        let c = self.upsert_node(child, &empty);
        let p = self.upsert_node(parent, &empty);
        self.graph.update_edge(c, p, label);
    }

    /// Fold one tuple into the graph. Both names are read before anything is
    /// written, so a tuple with a missing name leaves the graph untouched.
    pub fn fold(&mut self, tuple: &RelationTuple) -> Result<()> {
        let position = self.folded;
        let child_name = tuple
            .child
            .name()
            .ok_or(BioModelsError::MissingName { side: "child", position })?;
        let parent_name = tuple
            .parent
            .name()
            .ok_or(BioModelsError::MissingName { side: "parent", position })?;

        let c = self.upsert_node(&child_name, &tuple.child.residual());
        let p = self.upsert_node(&parent_name, &tuple.parent.residual());
        self.graph.update_edge(c, p, tuple.label.clone());
        self.folded += 1;

        debug!(child = %child_name, label = %tuple.label, parent = %parent_name, "Folded tuple");
        Ok(())
    }

    /// Fold every tuple of `tuples` in order. Returns how many were folded.
    pub fn extend_from<I>(&mut self, tuples: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<RelationTuple>,
    {
        let mut n = 0usize;
        for tuple in tuples {
            self.fold(tuple.borrow())?;
            n += 1;
        }
        Ok(n)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn node(&self, name: &str) -> Option<&EntityNode> {
        self.index.get(name).map(|&idx| &self.graph[idx])
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Label of the `child → parent` edge, if any.
    pub fn edge(&self, child: &str, parent: &str) -> Option<&Relation> {
        let c = *self.index.get(child)?;
        let p = *self.index.get(parent)?;
        self.graph.find_edge(c, p).map(|e| &self.graph[e])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &EntityNode> {
        self.graph.node_weights()
    }

    /// Every edge as `(child, parent, label)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &Relation)> {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()].name.as_str(),
                self.graph[e.target()].name.as_str(),
                e.weight(),
            )
        })
    }

    pub fn node_count(&self) -> usize { self.graph.node_count() }

    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    /// Number of tuples folded into this graph so far.
    pub fn tuples_folded(&self) -> usize { self.folded }

    /// Node counts per `color` attribute; uncolored nodes count under `"none"`.
    pub fn nodes_by_color(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes() {
            *counts.entry(node.color().unwrap_or("none").to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn edges_by_label(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (_, _, label) in self.edges() {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// The underlying petgraph structure, for renderers and exporters.
    pub fn as_digraph(&self) -> &DiGraph<EntityNode, Relation> {
        &self.graph
    }
}

/// Fold a stream of tuples into a fresh graph.
pub fn build_graph<I>(tuples: I) -> Result<RelationGraph>
where
    I: IntoIterator,
    I::Item: Borrow<RelationTuple>,
{
    let mut graph = RelationGraph::new();
    let n = graph.extend_from(tuples)?;
    info!(
        tuples = n,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Relation graph built"
    );
    Ok(graph)
}
