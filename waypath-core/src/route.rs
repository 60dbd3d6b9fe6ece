//! Routes returned to callers.

use geo::Coord;

use crate::{NodeId, RoadNetwork};

/// An ordered node path with its total weight.
///
/// # Examples
/// ```
/// use waypath_core::{NodeId, Route};
///
/// let route = Route::new(vec![NodeId::new(1), NodeId::new(3)], 2.5);
/// assert_eq!(route.origin(), Some(NodeId::new(1)));
/// assert_eq!(route.destination(), Some(NodeId::new(3)));
/// assert_eq!(route.arc_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    nodes: Vec<NodeId>,
    total_weight: f64,
}

impl Route {
    /// Construct a route from nodes in travel order and their summed weight.
    #[must_use]
    pub const fn new(nodes: Vec<NodeId>, total_weight: f64) -> Self {
        Self {
            nodes,
            total_weight,
        }
    }

    /// Nodes in travel order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Sum of the traversed arc weights.
    #[must_use]
    pub const fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// First node.
    #[must_use]
    pub fn origin(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Last node.
    #[must_use]
    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Number of traversed arcs.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Coordinates of the route's nodes, skipping nodes `network` has none
    /// for.
    #[must_use]
    pub fn coordinates(&self, network: &RoadNetwork) -> Vec<Coord<f64>> {
        self.nodes
            .iter()
            .filter_map(|&node| network.coordinate(node))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn single_node_route_has_no_arcs() {
        let route = Route::new(vec![NodeId::new(5)], 0.0);
        assert_eq!(route.arc_count(), 0);
        assert_eq!(route.origin(), route.destination());
    }

    #[rstest]
    fn coordinates_follow_route_order() {
        let mut builder = RoadNetwork::builder();
        builder.add_node(NodeId::new(1), Some(Coord { x: 1.0, y: 10.0 }));
        builder.add_node(NodeId::new(2), None);
        builder.add_node(NodeId::new(3), Some(Coord { x: 3.0, y: 30.0 }));
        let network = builder.build();
        let route = Route::new(vec![NodeId::new(3), NodeId::new(2), NodeId::new(1)], 2.0);
        assert_eq!(
            route.coordinates(&network),
            vec![Coord { x: 3.0, y: 30.0 }, Coord { x: 1.0, y: 10.0 }]
        );
    }
}
