//! Immutable graph snapshots returned by a parse.

use serde::{Deserialize, Serialize};

use crate::{edge::Edge, node::Node};

/// The nodes and edges extracted from one diagram source.
///
/// Insertion order reflects discovery order. A `GraphData` owns its data
/// outright: it is handed out by value and exposes only shared views, so a
/// caller can never reach back into the state of the parser that built it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphData {
    /// Create a graph from already-assembled parts.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// The empty graph, used as the uniform failure value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Nodes in discovery order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in discovery order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns `true` when the graph has neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// All edges running from `source` to `target`.
    pub fn edges_between<'a>(
        &'a self,
        source: &'a str,
        target: &'a str,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.connects(source, target))
    }

    /// Consume the graph, returning its parts.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}
