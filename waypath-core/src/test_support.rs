//! Test-only graphs and solvers shared by unit, behaviour and property tests.
//!
//! Available under `cfg(test)` and the `test-support` feature.

use std::collections::HashSet;

use crate::{
    FlowArc, FlowProblem, FlowSolver, GraphError, NodeId, OptimisationError, RoadGraph,
    RoadNetwork, Selection,
};

/// The four-node network `1 -> 2 (1)`, `2 -> 4 (5)`, `1 -> 3 (2)`,
/// `3 -> 4 (2)`.
///
/// The cheapest route from 1 to 4 runs through 3 with weight 4; the route
/// through 2 costs 6.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "fixture edges are static and known to be valid"
)]
pub fn diamond_network() -> RoadNetwork {
    RoadNetwork::from_edges([(1, 2, 1.0), (2, 4, 5.0), (1, 3, 2.0), (3, 4, 2.0)])
        .expect("diamond edges are valid")
}

/// A two-way grid of `columns x rows` nodes numbered row by row from 0.
///
/// Edge weights vary deterministically between 1 and 5 so that shortest
/// paths are not all ties.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "generated weights are finite and positive"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "weights are small integers"
)]
#[expect(
    clippy::integer_division_remainder_used,
    reason = "weights cycle through a fixed range"
)]
pub fn grid_network(columns: u64, rows: u64) -> RoadNetwork {
    let mut builder = RoadNetwork::builder();
    let id = |column: u64, row: u64| NodeId::new(row * columns + column);
    let weight = |column: u64, row: u64| ((column * 7 + row * 3) % 5 + 1) as f64;
    for row in 0..rows {
        for column in 0..columns {
            builder.add_node(id(column, row), None);
            if column + 1 < columns {
                builder
                    .add_two_way_edge(id(column, row), id(column + 1, row), weight(column, row))
                    .expect("grid weights are valid");
            }
            if row + 1 < rows {
                builder
                    .add_two_way_edge(id(column, row), id(column, row + 1), weight(row, column))
                    .expect("grid weights are valid");
            }
        }
    }
    builder.build()
}

/// Wraps a network and hides the weight of one edge.
///
/// Shortest paths still use the hidden edge, which reproduces a graph whose
/// weight data disagrees with its topology.
#[derive(Debug, Clone, Copy)]
pub struct GappyGraph<'a> {
    inner: &'a RoadNetwork,
    hidden: (NodeId, NodeId),
}

impl<'a> GappyGraph<'a> {
    /// Hide `from -> to` in `inner`.
    #[must_use]
    pub const fn new(inner: &'a RoadNetwork, from: NodeId, to: NodeId) -> Self {
        Self {
            inner,
            hidden: (from, to),
        }
    }
}

impl RoadGraph for GappyGraph<'_> {
    fn contains(&self, node: NodeId) -> bool {
        self.inner.contains(node)
    }

    fn outgoing(&self, node: NodeId) -> Box<dyn Iterator<Item = (NodeId, f64)> + '_> {
        let hidden = self.hidden;
        Box::new(
            self.inner
                .outgoing(node)
                .filter(move |(to, _)| (node, *to) != hidden),
        )
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Vec<NodeId>, GraphError> {
        self.inner.shortest_path(from, to)
    }

    fn edge_weight(&self, from: NodeId, to: NodeId) -> Result<f64, GraphError> {
        if (from, to) == self.hidden {
            return Err(GraphError::MissingEdge { from, to });
        }
        self.inner.edge_weight(from, to)
    }
}

#[derive(Debug, Clone)]
enum Script {
    Select(Vec<usize>, f64),
    Fail(OptimisationError),
}

/// A [`FlowSolver`] that ignores the problem and replays a fixed answer.
#[derive(Debug, Clone)]
pub struct ScriptedSolver {
    script: Script,
}

impl ScriptedSolver {
    /// Always return the given arc indices and objective.
    #[must_use]
    pub const fn selecting(arcs: Vec<usize>, objective: f64) -> Self {
        Self {
            script: Script::Select(arcs, objective),
        }
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn failing(error: OptimisationError) -> Self {
        Self {
            script: Script::Fail(error),
        }
    }
}

impl FlowSolver for ScriptedSolver {
    fn solve(&self, _problem: &FlowProblem<'_>) -> Result<Selection, OptimisationError> {
        match &self.script {
            Script::Select(arcs, objective) => Ok(Selection::new(arcs.clone(), *objective)),
            Script::Fail(error) => Err(error.clone()),
        }
    }
}

/// Enumerates every simple origin to destination path and keeps the lightest.
///
/// When origin and destination coincide the paths are simple cycles through
/// the origin. Exponential in the arc count; a reference answer for small
/// problems only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExhaustiveSolver;

impl FlowSolver for ExhaustiveSolver {
    fn solve(&self, problem: &FlowProblem<'_>) -> Result<Selection, OptimisationError> {
        let mut search = PathSearch {
            arcs: problem.arcs().arcs(),
            destination: problem.destination(),
            visited: HashSet::from([problem.origin()]),
            stack: Vec::new(),
            best: None,
        };
        search.explore(problem.origin(), 0.0);
        search
            .best
            .map(|(weight, path)| Selection::new(path, weight))
            .ok_or(OptimisationError::Infeasible)
    }
}

struct PathSearch<'a> {
    arcs: &'a [FlowArc],
    destination: NodeId,
    visited: HashSet<NodeId>,
    stack: Vec<usize>,
    best: Option<(f64, Vec<usize>)>,
}

impl PathSearch<'_> {
    #[expect(
        clippy::float_arithmetic,
        reason = "path weights accumulate floating-point arc lengths"
    )]
    fn explore(&mut self, node: NodeId, weight: f64) {
        let arcs = self.arcs;
        for (index, arc) in arcs.iter().enumerate() {
            if arc.from != node {
                continue;
            }
            let reached = weight + arc.weight;
            if arc.to == self.destination {
                if self.best.as_ref().is_none_or(|(best, _)| reached < *best) {
                    let mut path = self.stack.clone();
                    path.push(index);
                    self.best = Some((reached, path));
                }
                continue;
            }
            if !self.visited.insert(arc.to) {
                continue;
            }
            self.stack.push(index);
            self.explore(arc.to, reached);
            self.stack.pop();
            self.visited.remove(&arc.to);
        }
    }
}
