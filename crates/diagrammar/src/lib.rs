//! Diagrammar - extract typed graphs from Mermaid-style diagram text.
//!
//! Flowcharts, sequence diagrams and class diagrams are recognized
//! best-effort: whatever the parser understands becomes typed nodes and
//! edges, everything else is skipped.

pub mod config;
pub mod export;

mod error;

pub use diagrammar_core::{Dialect, Edge, EdgeKind, GraphData, Member, Node, NodeKind, Visibility};
pub use diagrammar_parser::{ParseError, Parser, detect_dialect};

pub use error::DiagrammarError;

use std::{fs, path::Path};

use log::{debug, info, trace};

use config::{AppConfig, OutputFormat};
use export::{Exporter, json::FullJson, wire::WireJson};

/// Builder for parsing and exporting diagram graphs.
///
/// # Examples
///
/// ```
/// use diagrammar::{GraphBuilder, NodeKind};
///
/// let builder = GraphBuilder::default();
/// let graph = builder
///     .parse("flowchart\nA[Start] --> B[Process]")
///     .expect("source is within limits");
///
/// assert_eq!(graph.nodes()[0].kind(), NodeKind::Node);
/// let json = builder.export(&graph).expect("graph serializes");
/// assert!(json.contains("\"Start\""));
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    config: AppConfig,
}

impl GraphBuilder {
    /// Create a new graph builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The parser this builder runs, honoring a forced dialect.
    ///
    /// Useful for [`Parser::try_parse`] when a caller wants to know why a
    /// source produced an empty graph.
    pub fn parser(&self) -> Parser {
        match self.config.parser().dialect() {
            Some(dialect) => Parser::with_dialect(dialect),
            None => Parser::new(),
        }
    }

    /// Parse diagram source into a graph.
    ///
    /// Unrecognizable content yields an empty graph, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DiagrammarError::SourceTooLarge`] when the source exceeds
    /// the configured size limit.
    pub fn parse(&self, source: &str) -> Result<GraphData, DiagrammarError> {
        let parser_config = self.config.parser();
        if let Some(limit) = parser_config.max_source_bytes() {
            if source.len() > limit {
                return Err(DiagrammarError::SourceTooLarge {
                    size: source.len(),
                    limit,
                });
            }
        }

        info!(bytes = source.len(); "Parsing diagram source");
        let graph = self.parser().parse(source);
        debug!(nodes = graph.nodes().len(), edges = graph.edges().len(); "Graph extracted");
        trace!(graph:?; "Extracted graph");

        Ok(graph)
    }

    /// Read diagram source from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagrammarError::UnsupportedExtension`] if the extension is
    /// not accepted by the configuration, or [`DiagrammarError::SourceRead`]
    /// if the file cannot be read.
    pub fn read_source(&self, path: impl AsRef<Path>) -> Result<String, DiagrammarError> {
        let path = path.as_ref();
        if !self.config.parser().accepts(path) {
            return Err(DiagrammarError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }

        info!(path:? = path; "Reading diagram source");
        fs::read_to_string(path).map_err(|source| DiagrammarError::SourceRead {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path` and parse its contents.
    ///
    /// # Errors
    ///
    /// Anything [`GraphBuilder::read_source`] or [`GraphBuilder::parse`]
    /// returns.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<GraphData, DiagrammarError> {
        let source = self.read_source(path)?;
        self.parse(&source)
    }

    /// Serialize `graph` in the configured output format.
    ///
    /// # Errors
    ///
    /// Returns [`DiagrammarError::Export`] if serialization fails.
    pub fn export(&self, graph: &GraphData) -> Result<String, DiagrammarError> {
        let output = self.config.output();
        let rendered = match output.format() {
            OutputFormat::Full => FullJson::new(output.pretty()).export_graph(graph)?,
            OutputFormat::Wire => WireJson::new(output.pretty()).export_graph(graph)?,
        };
        Ok(rendered)
    }
}
