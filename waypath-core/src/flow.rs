//! Flow-conservation formulation of the arc selection problem.
//!
//! A [`FlowProblem`] pairs an [`ArcSet`] with the route's origin and
//! destination. [`FlowProblem::constraints`] lays the model out as a sparse
//! table: one [`FlowConstraint`] per node listing the indices of its incoming
//! and outgoing arcs, tagged with the node's [`NodeRole`]. Solvers add one
//! binary variable per arc, minimise the weighted sum of selected arcs and
//! hand back a [`Selection`].

use std::collections::HashMap;

use crate::{ArcSet, FlowArc, NodeId, OptimisationError};

/// How a node's selected in- and out-degree are constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Origin: one outgoing arc, no incoming arc.
    Source,
    /// Destination: one incoming arc, no outgoing arc.
    Sink,
    /// Any other node: outgoing equals incoming.
    Transit,
    /// Origin and destination coincide: one outgoing and one incoming arc,
    /// so the selection is a round trip through the node.
    Loop,
}

impl NodeRole {
    /// Fixed `(outgoing, incoming)` selected degree, or `None` for
    /// [`NodeRole::Transit`] where only the balance is fixed.
    #[must_use]
    pub const fn fixed_degrees(self) -> Option<(usize, usize)> {
        match self {
            Self::Source => Some((1, 0)),
            Self::Sink => Some((0, 1)),
            Self::Loop => Some((1, 1)),
            Self::Transit => None,
        }
    }

    /// Whether `outgoing` and `incoming` selected arcs satisfy this role.
    #[must_use]
    pub fn admits(self, outgoing: usize, incoming: usize) -> bool {
        self.fixed_degrees().map_or(outgoing == incoming, |fixed| {
            fixed == (outgoing, incoming)
        })
    }
}

/// One row group of the flow model: the arcs entering and leaving `node`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConstraint {
    /// Node the constraint balances.
    pub node: NodeId,
    /// Degree requirement for the node.
    pub role: NodeRole,
    /// Indices into [`ArcSet::arcs`] of arcs ending at `node`.
    pub incoming: Vec<usize>,
    /// Indices into [`ArcSet::arcs`] of arcs starting at `node`.
    pub outgoing: Vec<usize>,
}

/// Minimum-weight origin to destination arc selection over an [`ArcSet`].
///
/// # Examples
/// ```
/// use waypath_core::{ArcSet, FlowArc, FlowProblem, NodeId, NodeRole};
///
/// let mut arcs = ArcSet::default();
/// arcs.insert(FlowArc { from: NodeId::new(1), to: NodeId::new(2), weight: 1.0 });
/// let problem = FlowProblem::new(&arcs, NodeId::new(1), NodeId::new(2));
/// let roles: Vec<NodeRole> = problem.constraints().iter().map(|c| c.role).collect();
/// assert_eq!(roles, vec![NodeRole::Source, NodeRole::Sink]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FlowProblem<'a> {
    arcs: &'a ArcSet,
    origin: NodeId,
    destination: NodeId,
}

impl<'a> FlowProblem<'a> {
    /// Describe the selection problem for `arcs`.
    #[must_use]
    pub const fn new(arcs: &'a ArcSet, origin: NodeId, destination: NodeId) -> Self {
        Self {
            arcs,
            origin,
            destination,
        }
    }

    /// The candidate arcs.
    #[must_use]
    pub const fn arcs(&self) -> &'a ArcSet {
        self.arcs
    }

    /// First waypoint.
    #[must_use]
    pub const fn origin(&self) -> NodeId {
        self.origin
    }

    /// Last waypoint.
    #[must_use]
    pub const fn destination(&self) -> NodeId {
        self.destination
    }

    /// Role of `node` in this problem.
    #[must_use]
    pub fn role_of(&self, node: NodeId) -> NodeRole {
        match (node == self.origin, node == self.destination) {
            (true, true) => NodeRole::Loop,
            (true, false) => NodeRole::Source,
            (false, true) => NodeRole::Sink,
            (false, false) => NodeRole::Transit,
        }
    }

    /// One constraint per node of the arc set, origin and destination
    /// included even when no arc touches them.
    ///
    /// Rows follow the arc set's node order, then origin and destination if
    /// they were missing.
    #[must_use]
    pub fn constraints(&self) -> Vec<FlowConstraint> {
        let mut rows: Vec<FlowConstraint> = Vec::new();
        let mut row_of: HashMap<NodeId, usize> = HashMap::new();
        let nodes = self
            .arcs
            .nodes()
            .iter()
            .copied()
            .chain([self.origin, self.destination]);
        for node in nodes {
            if row_of.contains_key(&node) {
                continue;
            }
            row_of.insert(node, rows.len());
            rows.push(FlowConstraint {
                node,
                role: self.role_of(node),
                incoming: Vec::new(),
                outgoing: Vec::new(),
            });
        }
        for (index, arc) in self.arcs.arcs().iter().enumerate() {
            if let Some(row) = row_of.get(&arc.from).and_then(|&row| rows.get_mut(row)) {
                row.outgoing.push(index);
            }
            if let Some(row) = row_of.get(&arc.to).and_then(|&row| rows.get_mut(row)) {
                row.incoming.push(index);
            }
        }
        rows
    }
}

/// Arcs chosen by a [`FlowSolver`] together with its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    arcs: Vec<usize>,
    objective: f64,
}

impl Selection {
    /// Wrap selected arc indices and the solver-reported objective.
    #[must_use]
    pub const fn new(arcs: Vec<usize>, objective: f64) -> Self {
        Self { arcs, objective }
    }

    /// The empty selection.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Selected indices into [`ArcSet::arcs`].
    #[must_use]
    pub fn arc_indices(&self) -> &[usize] {
        &self.arcs
    }

    /// Objective value reported by the solver.
    #[must_use]
    pub const fn objective(&self) -> f64 {
        self.objective
    }

    /// Number of selected arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Resolve the selected indices against `arcs`, skipping unknown ones.
    pub fn resolve<'s>(&'s self, arcs: &'s ArcSet) -> impl Iterator<Item = &'s FlowArc> + 's {
        self.arcs.iter().filter_map(|&index| arcs.get(index))
    }

    /// Whether every node's selected degrees satisfy its role in `problem`.
    ///
    /// Out-of-range indices make the selection unbalanced.
    #[must_use]
    pub fn is_flow_balanced(&self, problem: &FlowProblem<'_>) -> bool {
        if self.resolve(problem.arcs()).count() != self.arcs.len() {
            return false;
        }
        let mut degrees: HashMap<NodeId, (usize, usize)> = HashMap::new();
        for arc in self.resolve(problem.arcs()) {
            degrees.entry(arc.from).or_default().0 += 1;
            degrees.entry(arc.to).or_default().1 += 1;
        }
        problem.constraints().iter().all(|row| {
            let (outgoing, incoming) = degrees.get(&row.node).copied().unwrap_or_default();
            row.role.admits(outgoing, incoming) && outgoing <= 1 && incoming <= 1
        })
    }
}

/// Solve a [`FlowProblem`] exactly.
///
/// Implementations select a minimum-weight arc subset satisfying every
/// [`FlowConstraint`] and must report anything short of a proven optimum as
/// an [`OptimisationError`]. Solvers are `Send + Sync` so a host can share one
/// across worker threads.
pub trait FlowSolver: Send + Sync {
    /// Select arcs for `problem`.
    fn solve(&self, problem: &FlowProblem<'_>) -> Result<Selection, OptimisationError>;
}

impl<S: FlowSolver + ?Sized> FlowSolver for &S {
    fn solve(&self, problem: &FlowProblem<'_>) -> Result<Selection, OptimisationError> {
        (**self).solve(problem)
    }
}

impl<S: FlowSolver + ?Sized> FlowSolver for Box<S> {
    fn solve(&self, problem: &FlowProblem<'_>) -> Result<Selection, OptimisationError> {
        (**self).solve(problem)
    }
}
