//! Export functionality for extracted graphs.
//!
//! This module provides the [`Exporter`] trait, the final stage of the
//! pipeline:
//!
//! ```text
//! Source Text
//!     ↓ detect + extract + assemble
//! GraphData
//!     ↓ export (this module)
//! JSON document
//! ```
//!
//! # Available Backends
//!
//! - [`json`] - the full graph via [`json::FullJson`]
//! - [`wire`] - the simplified wire shape via [`wire::WireJson`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`DiagrammarError::Export`] at the crate boundary.
//!
//! [`DiagrammarError::Export`]: crate::DiagrammarError::Export

/// Full-graph JSON backend.
pub mod json;
/// Wire-format JSON backend.
pub mod wire;

use serde::Serialize;

use diagrammar_core::GraphData;

/// Abstraction for graph export backends.
pub trait Exporter {
    /// Render `graph` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the graph cannot be encoded.
    fn export_graph(&self, graph: &GraphData) -> Result<String, Error>;
}

/// Errors that can occur during graph export.
#[derive(Debug)]
pub enum Error {
    /// The graph could not be encoded.
    Serialize(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
        }
    }
}

/// Encode `value` as JSON, optionally pretty-printed.
fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, Error> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(Error::Serialize)
}
