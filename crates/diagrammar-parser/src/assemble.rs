//! Graph assembly shared by all extractors.
//!
//! [`GraphAssembler`] accumulates the nodes and edges of a single parse and
//! enforces the graph invariants while doing so:
//!
//! - **dedup-by-id**: nodes live in an insertion-ordered index keyed by id; a
//!   second declaration of an id augments the existing node.
//! - **label-merge**: an endpoint-pair index remembers the first edge created
//!   for each `(source, target)` pair so a late label lands on that edge.
//! - **implicit closure**: [`GraphAssembler::finish`] synthesizes a node for
//!   every edge endpoint that was never declared.

use std::collections::HashMap;

use indexmap::{IndexMap, map::Entry};
use log::trace;

use diagrammar_core::{Edge, EdgeKind, GraphData, Node, NodeKind};

/// Transient node/edge accumulator for one parse.
#[derive(Debug)]
pub(crate) struct GraphAssembler {
    /// Kind given to nodes synthesized by the closure pass.
    implicit_kind: NodeKind,
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
    /// First edge index for each `(source, target)` pair.
    pairs: HashMap<(String, String), usize>,
}

impl GraphAssembler {
    pub(crate) fn new(implicit_kind: NodeKind) -> Self {
        Self {
            implicit_kind,
            nodes: IndexMap::new(),
            edges: Vec::new(),
            pairs: HashMap::new(),
        }
    }

    /// Declare a node, augmenting an existing node with the same id.
    ///
    /// When the id is already present:
    /// - an implicit node is replaced outright by the declaration;
    /// - otherwise the existing kind is kept, an explicit label (one that
    ///   differs from the id) overrides the current label, members are
    ///   appended, and a stereotype replaces the current one.
    pub(crate) fn declare(&mut self, node: Node) -> &mut Node {
        match self.nodes.entry(node.id().to_string()) {
            Entry::Vacant(entry) => entry.insert(node),
            Entry::Occupied(entry) => {
                let existing = entry.into_mut();
                trace!(id = node.id(); "Augmenting existing node");
                if existing.kind().is_implicit() && !node.kind().is_implicit() {
                    *existing = node;
                    return existing;
                }
                if node.label() != node.id() {
                    existing.set_label(node.label());
                }
                for attribute in node.attributes() {
                    existing.push_attribute(attribute.clone());
                }
                for method in node.methods() {
                    existing.push_method(method.clone());
                }
                if let Some(stereotype) = node.stereotype() {
                    existing.set_stereotype(stereotype);
                }
                existing
            }
        }
    }

    /// Insert an unlabeled node of `kind` unless `id` is already known.
    ///
    /// Returns `true` if a node was created.
    pub(crate) fn synthesize(&mut self, id: &str, kind: NodeKind) -> bool {
        if self.nodes.contains_key(id) {
            return false;
        }
        trace!(id, kind:?; "Synthesizing implicit node");
        self.nodes.insert(id.to_string(), Node::unlabeled(id, kind));
        true
    }

    /// Returns `true` if a node with `id` exists.
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Mutable access to the node with `id`.
    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Append an edge.
    pub(crate) fn connect(&mut self, edge: Edge) {
        let key = (edge.source().to_string(), edge.target().to_string());
        self.pairs.entry(key).or_insert(self.edges.len());
        self.edges.push(edge);
    }

    /// Attach `label` to the first edge from `source` to `target`, or create
    /// a new `kind` edge carrying the label when the pair is unknown.
    ///
    /// Returns `true` when an existing edge was labeled.
    pub(crate) fn label_or_connect(
        &mut self,
        source: &str,
        target: &str,
        label: &str,
        kind: EdgeKind,
    ) -> bool {
        let key = (source.to_string(), target.to_string());
        if let Some(&idx) = self.pairs.get(&key) {
            trace!(source, target, label; "Merging label onto existing edge");
            self.edges[idx].set_label(label);
            return true;
        }
        self.connect(Edge::new(source, target, kind).with_label(label));
        false
    }

    /// Returns `true` if nothing has been collected.
    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Close over dangling endpoints and produce the immutable snapshot.
    pub(crate) fn finish(mut self) -> GraphData {
        let endpoints: Vec<String> = self
            .edges
            .iter()
            .flat_map(|edge| [edge.source(), edge.target()])
            .map(str::to_string)
            .collect();

        for id in &endpoints {
            self.synthesize(id, self.implicit_kind);
        }

        GraphData::new(self.nodes.into_values().collect(), self.edges)
    }
}

#[cfg(test)]
mod tests {
    use diagrammar_core::{Member, Visibility};

    use super::*;

    #[test]
    fn test_declare_dedups_by_id() {
        let mut graph = GraphAssembler::new(NodeKind::Implicit);
        graph.declare(Node::new("A", "First", NodeKind::Node));
        graph.declare(Node::new("A", "Second", NodeKind::Node));

        let data = graph.finish();
        assert_eq!(data.nodes().len(), 1);
        assert_eq!(data.nodes()[0].label(), "Second");
    }

    #[test]
    fn test_declare_keeps_label_without_explicit_one() {
        let mut graph = GraphAssembler::new(NodeKind::ImplicitParticipant);
        graph.declare(Node::new("A", "Alice", NodeKind::Participant));
        graph.declare(Node::unlabeled("A", NodeKind::Actor));

        let data = graph.finish();
        assert_eq!(data.nodes()[0].label(), "Alice");
        assert_eq!(data.nodes()[0].kind(), NodeKind::Participant);
    }

    #[test]
    fn test_declare_augments_members() {
        let mut graph = GraphAssembler::new(NodeKind::Implicit);
        let mut first = Node::unlabeled("Duck", NodeKind::Class);
        first.push_attribute(Member::new("beak", Visibility::Public));
        graph.declare(first);

        let mut second = Node::unlabeled("Duck", NodeKind::Class);
        second.push_method(Member::new("swim()", Visibility::Public));
        second.set_stereotype("bird");
        graph.declare(second);

        let data = graph.finish();
        let duck = &data.nodes()[0];
        assert_eq!(duck.attributes().len(), 1);
        assert_eq!(duck.methods().len(), 1);
        assert_eq!(duck.stereotype(), Some("bird"));
    }

    #[test]
    fn test_declaration_replaces_implicit() {
        let mut graph = GraphAssembler::new(NodeKind::Implicit);
        assert!(graph.synthesize("A", NodeKind::Implicit));
        graph.declare(Node::unlabeled("A", NodeKind::Class));

        let data = graph.finish();
        assert_eq!(data.nodes()[0].kind(), NodeKind::Class);
    }

    #[test]
    fn test_synthesize_once() {
        let mut graph = GraphAssembler::new(NodeKind::Implicit);
        assert!(graph.synthesize("X", NodeKind::Implicit));
        assert!(!graph.synthesize("X", NodeKind::Implicit));
        assert_eq!(graph.finish().nodes().len(), 1);
    }

    #[test]
    fn test_label_merges_onto_first_edge() {
        let mut graph = GraphAssembler::new(NodeKind::Implicit);
        graph.connect(Edge::new("A", "B", EdgeKind::Dashed));
        graph.connect(Edge::new("A", "B", EdgeKind::Thick));
        assert!(graph.label_or_connect("A", "B", "hello", EdgeKind::Solid));

        let data = graph.finish();
        assert_eq!(data.edges().len(), 2);
        assert_eq!(data.edges()[0].label(), Some("hello"));
        assert_eq!(data.edges()[0].kind(), EdgeKind::Dashed);
        assert_eq!(data.edges()[1].label(), None);
    }

    #[test]
    fn test_label_creates_edge_for_unknown_pair() {
        let mut graph = GraphAssembler::new(NodeKind::Implicit);
        graph.connect(Edge::new("A", "B", EdgeKind::Solid));
        assert!(!graph.label_or_connect("B", "A", "back", EdgeKind::Solid));

        let data = graph.finish();
        assert_eq!(data.edges().len(), 2);
        assert_eq!(data.edges()[1].label(), Some("back"));
    }

    #[test]
    fn test_finish_closes_endpoints_in_discovery_order() {
        let mut graph = GraphAssembler::new(NodeKind::Implicit);
        graph.declare(Node::new("B", "Known", NodeKind::Node));
        graph.connect(Edge::new("X", "B", EdgeKind::Solid));
        graph.connect(Edge::new("B", "Y", EdgeKind::Solid));
        graph.connect(Edge::new("Y", "X", EdgeKind::Solid));

        let data = graph.finish();
        let ids: Vec<_> = data.nodes().iter().map(Node::id).collect();
        assert_eq!(ids, vec!["B", "X", "Y"]);
        assert!(data.nodes()[1..].iter().all(|node| node.kind() == NodeKind::Implicit));
    }
}
