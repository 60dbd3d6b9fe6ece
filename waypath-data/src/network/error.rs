//! Error types produced while loading road networks.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;
use waypath_core::{GraphError, NodeId};

/// Errors raised when a network file cannot be turned into a
/// [`RoadNetwork`](waypath_core::RoadNetwork).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NetworkLoadError {
    /// The network file could not be opened or read.
    #[error("failed to read network file {path}: {source}")]
    Read {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The document is not a valid network file.
    #[error("failed to parse network file: {source}")]
    Parse {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
    /// A node identifier was declared twice.
    #[error("node {node} is declared more than once")]
    DuplicateNode {
        /// Repeated identifier.
        node: NodeId,
    },
    /// An edge references a node that was never declared.
    #[error("edge {from} -> {to} references undeclared node {node}")]
    UndeclaredNode {
        /// Tail of the offending edge.
        from: NodeId,
        /// Head of the offending edge.
        to: NodeId,
        /// The undeclared endpoint.
        node: NodeId,
    },
    /// A node carries a latitude or longitude outside the WGS84 range.
    #[error("node {node} has out-of-range coordinate ({lat}, {lon})")]
    InvalidCoordinate {
        /// Offending node.
        node: NodeId,
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// An edge length was rejected by the graph builder.
    #[error("invalid edge: {source}")]
    InvalidEdge {
        /// Builder error.
        #[from]
        source: GraphError,
    },
}
