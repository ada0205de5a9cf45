//! Diagrammar Core Types and Definitions
//!
//! This crate provides the graph model produced by the Diagrammar parser and
//! consumed by exporters and downstream tooling. It includes:
//!
//! - **Dialects**: The supported diagram notations ([`dialect::Dialect`])
//! - **Nodes**: Typed vertices with dialect-specific payloads ([`node::Node`])
//! - **Edges**: Typed, optionally labeled connections ([`edge::Edge`])
//! - **Graphs**: Immutable parse snapshots ([`graph::GraphData`])

pub mod dialect;
pub mod edge;
pub mod graph;
pub mod node;

pub use dialect::Dialect;
pub use edge::{Edge, EdgeKind};
pub use graph::GraphData;
pub use node::{Member, Node, NodeKind, Visibility};
