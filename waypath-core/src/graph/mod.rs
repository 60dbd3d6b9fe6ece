//! Read-only access to the weighted road network.
//!
//! [`RoadGraph`] is the capability the kernel consumes: weighted directed
//! adjacency, edge weights and shortest paths by weight. [`RoadNetwork`] is
//! the in-process implementation, built once and then shared by reference
//! across requests.

mod error;
mod network;

pub use error::GraphError;
pub use network::{RoadNetwork, RoadNetworkBuilder};

use crate::NodeId;

/// Weighted directed adjacency over [`NodeId`]s.
///
/// Implementations must be pure lookups: the kernel calls them from a single
/// request and expects identical answers for identical inputs.
///
/// # Examples
///
/// ```rust
/// use waypath_core::{NodeId, RoadGraph, RoadNetwork};
///
/// # fn main() -> Result<(), waypath_core::GraphError> {
/// let network = RoadNetwork::from_edges([(1, 2, 1.5), (2, 3, 0.5)])?;
/// let path = network.shortest_path(NodeId::new(1), NodeId::new(3))?;
/// assert_eq!(path, vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]);
/// assert_eq!(network.edge_weight(NodeId::new(2), NodeId::new(3))?, 0.5);
/// # Ok(())
/// # }
/// ```
pub trait RoadGraph {
    /// Whether `node` belongs to the graph.
    fn contains(&self, node: NodeId) -> bool;

    /// Outgoing `(neighbour, weight)` pairs of `node`.
    ///
    /// Unknown nodes yield an empty iterator.
    fn outgoing(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, f64)> + '_>;

    /// Shortest path from `from` to `to` by total weight, endpoints included.
    ///
    /// A path from a node to itself is the single-node path.
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Vec<NodeId>, GraphError>;

    /// Weight of the edge `from -> to`.
    ///
    /// With parallel edges the lightest one is reported, which is the edge a
    /// shortest path uses.
    fn edge_weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        if !self.contains(from) {
            return Err(GraphError::UnknownNode(from));
        }
        self.outgoing(from)
            .filter(|(neighbour, _)| *neighbour == to)
            .map(|(_, weight)| weight)
            .min_by(f64::total_cmp)
            .ok_or(GraphError::MissingEdge { from, to })
    }
}

impl<G: RoadGraph + ?Sized> RoadGraph for &G {
    fn contains(&self, node: NodeId) -> bool {
        (**self).contains(node)
    }

    fn outgoing(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, f64)> + '_> {
        (**self).outgoing(node)
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Vec<NodeId>, GraphError> {
        (**self).shortest_path(from, to)
    }

    fn edge_weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        (**self).edge_weight(from, to)
    }
}
