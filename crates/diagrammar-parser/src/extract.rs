//! Dialect extractors.
//!
//! Each extractor turns raw text into nodes and edges in two stages:
//!
//! 1. **Recognize** - every statement is run through the extractor's ordered
//!    [`Rule`] table; the first matcher that accepts it produces a tagged
//!    fragment. Statements no rule accepts are skipped.
//! 2. **Assemble** - the collected fragments are replayed in a fixed sequence
//!    of passes into the [`ScanContext`]'s [`GraphAssembler`].
//!
//! Adding an arrow spelling or a bracket shape only touches the pattern
//! tables; adding a statement shape only appends a rule.

mod class;
mod flow;
mod sequence;

use log::trace;
use winnow::error::ModalResult;

use diagrammar_core::{Dialect, GraphData, NodeKind};

use crate::assemble::GraphAssembler;

/// Per-parse scan state, created fresh for every call and dropped after.
#[derive(Debug)]
pub(crate) struct ScanContext {
    dialect: Dialect,
    graph: GraphAssembler,
}

impl ScanContext {
    pub(crate) fn new(dialect: Dialect) -> Self {
        let implicit_kind = match dialect {
            Dialect::Sequence => NodeKind::ImplicitParticipant,
            Dialect::Flow | Dialect::Class => NodeKind::Implicit,
        };
        Self {
            dialect,
            graph: GraphAssembler::new(implicit_kind),
        }
    }

    pub(crate) fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub(crate) fn graph(&self) -> &GraphAssembler {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut GraphAssembler {
        &mut self.graph
    }

    pub(crate) fn finish(self) -> GraphData {
        self.graph.finish()
    }
}

/// A dialect-specific scanner.
pub(crate) trait Extractor {
    /// Scan `source` into `ctx`.
    fn scan(&self, ctx: &mut ScanContext, source: &str);

    /// Whether the scan found enough to count as a successful extraction.
    ///
    /// Edges count too: their endpoints become implicit nodes on
    /// [`ScanContext::finish`].
    fn succeeded(&self, ctx: &ScanContext) -> bool {
        !ctx.graph().is_empty()
    }
}

/// Returns the extractor for `dialect`.
pub(crate) fn extractor_for(dialect: Dialect) -> &'static dyn Extractor {
    match dialect {
        Dialect::Flow => &flow::FlowExtractor,
        Dialect::Sequence => &sequence::SequenceExtractor,
        Dialect::Class => &class::ClassExtractor,
    }
}

/// One entry of a recognition table: a named matcher producing fragment `F`.
pub(crate) struct Rule<F> {
    pub name: &'static str,
    pub matcher: fn(&mut &str) -> ModalResult<F>,
}

/// Run `statement` through `rules`, returning the fragment of the first
/// matcher that accepts it.
pub(crate) fn recognize<F>(rules: &[Rule<F>], statement: &str) -> Option<F> {
    for rule in rules {
        let mut input = statement;
        if let Ok(fragment) = (rule.matcher)(&mut input) {
            trace!(rule = rule.name, statement; "Recognized fragment");
            return Some(fragment);
        }
    }
    trace!(statement; "Skipping unrecognized fragment");
    None
}
