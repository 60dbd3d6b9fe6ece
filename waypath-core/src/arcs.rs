//! Weighted, de-duplicated arcs drawn from a node walk.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::{NodeId, RoadGraph, RouteError};

/// A directed arc considered by the optimiser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowArc {
    /// Tail node.
    pub from: NodeId,
    /// Head node.
    pub to: NodeId,
    /// Non-negative length of the arc.
    pub weight: f64,
}

/// Arcs keyed by `(from, to)` with their weights, plus the touched nodes.
///
/// Arcs and nodes keep first-seen order, so the same walk always produces
/// the same indices. Each `(from, to)` pair occurs once however often the
/// walk crosses it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcSet {
    arcs: Vec<FlowArc>,
    positions: HashMap<(NodeId, NodeId), usize>,
    nodes: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl ArcSet {
    /// Build the arc set for consecutive node pairs of `walk`.
    ///
    /// Weights come from [`RoadGraph::edge_weight`].
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingEdge`] when the graph has no weight for an
    /// adjacent pair of the walk.
    ///
    /// # Examples
    /// ```
    /// use waypath_core::{ArcSet, NodeId, RoadNetwork};
    ///
    /// let network = RoadNetwork::from_edges([(1, 2, 0.5), (2, 1, 0.5)]).expect("valid");
    /// let walk = [1, 2, 1, 2].map(NodeId::new);
    /// let arcs = ArcSet::from_walk(&network, &walk).expect("edges exist");
    /// assert_eq!(arcs.len(), 2);
    /// assert_eq!(arcs.nodes(), &[NodeId::new(1), NodeId::new(2)]);
    /// ```
    pub fn from_walk<G>(graph: &G, walk: &[NodeId]) -> Result<Self, RouteError>
    where
        G: RoadGraph + ?Sized,
    {
        let mut set = Self::default();
        for pair in walk.windows(2) {
            let &[from, to] = pair else {
                continue;
            };
            if set.position(from, to).is_some() {
                continue;
            }
            let weight = graph
                .edge_weight(from, to)
                .map_err(|_| RouteError::MissingEdge { from, to })?;
            set.insert(FlowArc { from, to, weight });
        }
        debug!(
            "built {} arcs over {} nodes from a walk of {} nodes",
            set.arcs.len(),
            set.nodes.len(),
            walk.len()
        );
        Ok(set)
    }

    /// Insert `arc` unless its `(from, to)` pair is already present.
    ///
    /// Returns whether the arc was new.
    pub fn insert(&mut self, arc: FlowArc) -> bool {
        if self.positions.contains_key(&(arc.from, arc.to)) {
            return false;
        }
        self.positions.insert((arc.from, arc.to), self.arcs.len());
        for node in [arc.from, arc.to] {
            if self.seen.insert(node) {
                self.nodes.push(node);
            }
        }
        self.arcs.push(arc);
        true
    }

    /// All arcs in insertion order.
    #[must_use]
    pub fn arcs(&self) -> &[FlowArc] {
        &self.arcs
    }

    /// Arc at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FlowArc> {
        self.arcs.get(index)
    }

    /// Index of the arc `from -> to`.
    #[must_use]
    pub fn position(&self, from: NodeId, to: NodeId) -> Option<usize> {
        self.positions.get(&(from, to)).copied()
    }

    /// Union of arc endpoints in first-seen order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Whether the set holds no arcs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}
