//! The simplified wire shape consumed by scene builders.
//!
//! ```text
//! { nodes: [{ id, label, position? }], edges: [{ from, to, label? }] }
//! ```
//!
//! Node and edge types are dropped. `source`/`target` become `from`/`to`.
//! Positions are never produced by the parser; a layout step may fill them in
//! with [`WireGraph::place`] before serialization.

use log::debug;
use serde::{Deserialize, Serialize};

use diagrammar_core::GraphData;

use super::{Error, Exporter, to_json};

/// A point in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Wire projection of a [`GraphData`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireGraph {
    pub nodes: Vec<WireNode>,
    pub edges: Vec<WireEdge>,
}

impl WireGraph {
    /// Set the position of node `id`. Returns `false` if no such node exists.
    pub fn place(&mut self, id: &str, position: Position) -> bool {
        match self.nodes.iter_mut().find(|node| node.id == id) {
            Some(node) => {
                node.position = Some(position);
                true
            }
            None => false,
        }
    }
}

impl From<&GraphData> for WireGraph {
    fn from(graph: &GraphData) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| WireNode {
                id: node.id().to_string(),
                label: node.label().to_string(),
                position: None,
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|edge| WireEdge {
                from: edge.source().to_string(),
                to: edge.target().to_string(),
                label: edge
                    .label()
                    .filter(|label| !label.is_empty())
                    .map(str::to_string),
            })
            .collect();

        Self { nodes, edges }
    }
}

/// Serializes the [`WireGraph`] projection.
#[derive(Debug, Default, Clone, Copy)]
pub struct WireJson {
    pretty: bool,
}

impl WireJson {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Exporter for WireJson {
    fn export_graph(&self, graph: &GraphData) -> Result<String, Error> {
        debug!(nodes = graph.nodes().len(), edges = graph.edges().len(); "Exporting wire JSON");
        to_json(&WireGraph::from(graph), self.pretty)
    }
}
