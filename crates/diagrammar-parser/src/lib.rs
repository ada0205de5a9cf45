//! Tolerant parser for Mermaid-style diagram text.
//!
//! The pipeline for a single call is:
//!
//! 1. **Detect** - a substring search picks one [`Dialect`]
//!    ([`detect_dialect`]).
//! 2. **Extract** - the dialect's extractor recognizes statements against an
//!    ordered rule table and replays the resulting fragments as passes.
//! 3. **Assemble** - nodes are deduplicated by id, late labels are merged onto
//!    existing edges, and every dangling edge endpoint gets an implicit node.
//!
//! Malformed statements are skipped, never reported. A source that yields
//! nothing at all produces an empty [`GraphData`]; [`Parser::try_parse`]
//! additionally says why.
//!
//! # Examples
//!
//! ```
//! let graph = diagrammar_parser::parse("flowchart\nA[Start] --> B[End]");
//! assert_eq!(graph.nodes().len(), 2);
//! assert_eq!(graph.edges()[0].source(), "A");
//! ```

mod assemble;
mod detect;
pub mod error;
mod extract;
mod patterns;

#[cfg(test)]
mod extract_tests;

pub use detect::detect_dialect;
pub use diagrammar_core::{Dialect, Edge, EdgeKind, GraphData, Member, Node, NodeKind, Visibility};
pub use error::ParseError;

use log::{debug, info, warn};

use extract::ScanContext;

/// Entry point for parsing diagram text.
///
/// A `Parser` holds configuration only; all scan state lives in a context
/// created for each call, so one parser can be shared freely.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    dialect: Option<Dialect>,
}

impl Parser {
    /// Create a parser that detects the dialect of each source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that skips detection and always uses `dialect`.
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect: Some(dialect),
        }
    }

    /// The forced dialect, if any.
    pub fn dialect(&self) -> Option<Dialect> {
        self.dialect
    }

    /// Parse `source`, reporting why nothing was extracted.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnsupportedDialect`] when no dialect marker is
    /// present, or [`ParseError::EmptyExtraction`] when the dialect's extractor
    /// found nothing.
    pub fn try_parse(&self, source: &str) -> Result<GraphData, ParseError> {
        let dialect = self
            .dialect
            .or_else(|| detect_dialect(source))
            .ok_or(ParseError::UnsupportedDialect)?;
        info!(dialect:%, forced = self.dialect.is_some(); "Parsing diagram");

        let extractor = extract::extractor_for(dialect);
        let mut ctx = ScanContext::new(dialect);
        extractor.scan(&mut ctx, source);

        if !extractor.succeeded(&ctx) {
            return Err(ParseError::EmptyExtraction {
                dialect: ctx.dialect(),
            });
        }

        let graph = ctx.finish();
        debug!(
            dialect:%,
            nodes = graph.nodes().len(),
            edges = graph.edges().len();
            "Diagram parsed"
        );
        Ok(graph)
    }

    /// Parse `source`, degrading every failure to an empty graph.
    ///
    /// The failure reason is logged at `warn` level.
    pub fn parse(&self, source: &str) -> GraphData {
        self.try_parse(source).unwrap_or_else(|err| {
            warn!(code = err.code(), err:%; "Nothing extracted from diagram source");
            GraphData::empty()
        })
    }
}

/// Parse `source` with dialect detection, returning an empty graph on failure.
pub fn parse(source: &str) -> GraphData {
    Parser::new().parse(source)
}

/// Parse `source` with dialect detection, reporting why nothing was extracted.
///
/// # Errors
///
/// See [`Parser::try_parse`].
pub fn try_parse(source: &str) -> Result<GraphData, ParseError> {
    Parser::new().try_parse(source)
}
