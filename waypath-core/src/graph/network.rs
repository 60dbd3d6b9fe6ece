//! `petgraph`-backed road network.

use std::collections::HashMap;

use geo::Coord;
use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::{GraphError, RoadGraph};
use crate::NodeId;

/// Immutable directed road network with non-negative edge weights.
///
/// Nodes may carry a WGS84 coordinate (`x = longitude`, `y = latitude`) so
/// presentation layers can map routes back onto a map. Build one with
/// [`RoadNetwork::builder`] or [`RoadNetwork::from_edges`] at start-up and
/// share it by reference afterwards; it has no interior mutability.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    graph: DiGraph<NodeId, f64>,
    index: HashMap<NodeId, NodeIndex>,
    coordinates: HashMap<NodeId, Coord<f64>>,
}

impl RoadNetwork {
    /// Start building a network.
    #[must_use]
    pub fn builder() -> RoadNetworkBuilder {
        RoadNetworkBuilder::default()
    }

    /// Build a network from `(from, to, weight)` triples.
    ///
    /// Nodes are created on first mention and carry no coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidWeight`] for negative or non-finite
    /// weights.
    ///
    /// # Examples
    /// ```
    /// use waypath_core::{NodeId, RoadGraph, RoadNetwork};
    ///
    /// let network = RoadNetwork::from_edges([(1, 2, 1.0)]).expect("valid edges");
    /// assert!(network.contains(NodeId::new(2)));
    /// assert_eq!(network.edge_count(), 1);
    /// ```
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (u64, u64, f64)>,
    {
        let mut builder = Self::builder();
        for (from, to, weight) in edges {
            builder.add_edge(NodeId::new(from), NodeId::new(to), weight)?;
        }
        Ok(builder.build())
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Coordinate recorded for `node`, if any.
    #[must_use]
    pub fn coordinate(&self, node: NodeId) -> Option<Coord<f64>> {
        self.coordinates.get(&node).copied()
    }

    fn node_index(&self, node: NodeId) -> Result<NodeIndex, GraphError> {
        self.index
            .get(&node)
            .copied()
            .ok_or(GraphError::UnknownNode(node))
    }

    fn node_at(&self, index: NodeIndex) -> Option<NodeId> {
        self.graph.node_weight(index).copied()
    }
}

impl RoadGraph for RoadNetwork {
    fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    fn outgoing(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, f64)> + '_> {
        let Some(&index) = self.index.get(&node) else {
            return Box::new(std::iter::empty());
        };
        Box::new(
            self.graph
                .edges(index)
                .filter_map(|edge| self.node_at(edge.target()).map(|to| (to, *edge.weight()))),
        )
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let start = self.node_index(from)?;
        let goal = self.node_index(to)?;
        let (_, path) = astar(
            &self.graph,
            start,
            |finish| finish == goal,
            |edge| *edge.weight(),
            |_| 0.0,
        )
        .ok_or(GraphError::NoPath { from, to })?;
        Ok(path
            .into_iter()
            .filter_map(|index| self.node_at(index))
            .collect())
    }

    fn edge_weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        let tail = self.node_index(from)?;
        let head = self.node_index(to)?;
        self.graph
            .edges_connecting(tail, head)
            .map(|edge| *edge.weight())
            .min_by(f64::total_cmp)
            .ok_or(GraphError::MissingEdge { from, to })
    }
}

/// Incremental constructor for [`RoadNetwork`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypath_core::{NodeId, RoadGraph, RoadNetwork};
///
/// # fn main() -> Result<(), waypath_core::GraphError> {
/// let mut builder = RoadNetwork::builder();
/// builder.add_node(NodeId::new(1), Some(Coord { x: -74.08, y: 4.6 }));
/// builder.add_two_way_edge(NodeId::new(1), NodeId::new(2), 0.25)?;
/// let network = builder.build();
/// assert_eq!(network.edge_weight(NodeId::new(2), NodeId::new(1))?, 0.25);
/// assert!(network.coordinate(NodeId::new(1)).is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RoadNetworkBuilder {
    network: RoadNetwork,
}

impl RoadNetworkBuilder {
    /// Insert `node`, recording its coordinate when supplied.
    ///
    /// Re-adding a node keeps its position and replaces the coordinate only
    /// when a new one is given.
    pub fn add_node(&mut self, node: NodeId, coordinate: Option<Coord<f64>>) -> &mut Self {
        self.ensure_node(node);
        if let Some(coord) = coordinate {
            self.network.coordinates.insert(node, coord);
        }
        self
    }

    /// Insert the directed edge `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidWeight`] when `weight` is negative, NaN
    /// or infinite.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
    ) -> Result<&mut Self, GraphError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }
        let tail = self.ensure_node(from);
        let head = self.ensure_node(to);
        self.network.graph.add_edge(tail, head, weight);
        Ok(self)
    }

    /// Insert `from -> to` and `to -> from` with the same weight.
    ///
    /// # Errors
    ///
    /// Same as [`RoadNetworkBuilder::add_edge`].
    pub fn add_two_way_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
    ) -> Result<&mut Self, GraphError> {
        self.add_edge(from, to, weight)?;
        self.add_edge(to, from, weight)
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> RoadNetwork {
        self.network
    }

    fn ensure_node(&mut self, node: NodeId) -> NodeIndex {
        if let Some(&index) = self.network.index.get(&node) {
            return index;
        }
        let index = self.network.graph.add_node(node);
        self.network.index.insert(node, index);
        index
    }
}
