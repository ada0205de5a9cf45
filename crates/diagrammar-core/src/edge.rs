//! Graph edges and their relation kinds.

use serde::{Deserialize, Serialize};

/// Closed set of edge kinds across all dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    // Flowchart link styles
    Solid,
    Dashed,
    Thick,

    // Sequence message kinds
    Sync,
    Async,
    Lost,

    // Class relations
    Inheritance,
    Composition,
    Aggregation,
    Dependency,
    Association,
    Dotted,
    Realization,
}

/// A directed, typed connection between two node ids.
///
/// The label may be attached after creation when a later fragment of the
/// source names the same endpoint pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    source: String,
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(rename = "type")]
    kind: EdgeKind,
}

impl Edge {
    /// Create an unlabeled edge.
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: None,
            kind,
        }
    }

    /// Attach a label, builder style.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the source node id.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the target node id.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the edge kind.
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Replace the label in place.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Returns `true` if this edge runs from `source` to `target`.
    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}
