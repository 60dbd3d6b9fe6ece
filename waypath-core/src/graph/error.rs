use thiserror::Error;

use crate::NodeId;

/// Errors from [`RoadGraph`](super::RoadGraph) lookups and network
/// construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The node is not part of the network.
    #[error("node {0} is not part of the road network")]
    UnknownNode(NodeId),
    /// The target cannot be reached from the source.
    #[error("no path from {from} to {to}")]
    NoPath {
        /// Source node.
        from: NodeId,
        /// Unreachable target node.
        to: NodeId,
    },
    /// No edge joins the two nodes.
    #[error("no edge from {from} to {to}")]
    MissingEdge {
        /// Tail of the requested edge.
        from: NodeId,
        /// Head of the requested edge.
        to: NodeId,
    },
    /// An edge weight was negative, NaN or infinite.
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight {
        /// Tail of the rejected edge.
        from: NodeId,
        /// Head of the rejected edge.
        to: NodeId,
        /// The rejected weight.
        weight: f64,
    },
}
