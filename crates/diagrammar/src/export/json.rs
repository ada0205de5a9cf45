use log::debug;

use diagrammar_core::GraphData;

use super::{Error, Exporter, to_json};

/// Serializes the whole [`GraphData`], node and edge types included.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullJson {
    pretty: bool,
}

impl FullJson {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Exporter for FullJson {
    fn export_graph(&self, graph: &GraphData) -> Result<String, Error> {
        debug!(nodes = graph.nodes().len(), edges = graph.edges().len(); "Exporting full graph JSON");
        to_json(graph, self.pretty)
    }
}
