//! Error taxonomy for route planning.
//!
//! Every failure is fatal to the current request: no stage downgrades or
//! swallows another stage's error, and no partial route is returned.

use thiserror::Error;

use crate::{GraphError, NodeId};

/// Errors returned by [`FlowSolver::solve`](crate::FlowSolver::solve).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimisationError {
    /// The flow constraints admit no solution.
    #[error("the flow model is infeasible")]
    Infeasible,
    /// The objective is unbounded below.
    #[error("the flow model is unbounded")]
    Unbounded,
    /// A binary variable came back outside the integrality tolerance.
    #[error("arc {from} -> {to} has non-integral value {value}")]
    NonIntegral {
        /// Tail of the offending arc.
        from: NodeId,
        /// Head of the offending arc.
        to: NodeId,
        /// Value reported by the solver.
        value: f64,
    },
    /// The backend failed for another reason.
    #[error("solver backend failed: {0}")]
    Solver(String),
}

/// Errors returned by [`RoutePlanner`](crate::RoutePlanner) and the stages it
/// runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// Fewer than two waypoints, or a waypoint outside the road network.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// No path connects a consecutive waypoint pair.
    #[error("no path connects waypoint {from} to waypoint {to}")]
    NoPath {
        /// Waypoint the segment starts from.
        from: NodeId,
        /// Waypoint the segment should reach.
        to: NodeId,
    },
    /// The stitched walk uses an edge the graph has no weight for.
    #[error("road graph has no edge weight for {from} -> {to}")]
    MissingEdge {
        /// Tail of the missing edge.
        from: NodeId,
        /// Head of the missing edge.
        to: NodeId,
    },
    /// The solver did not reach an optimal integral solution.
    #[error("optimisation failed: {0}")]
    Optimisation(#[from] OptimisationError),
    /// The solver's selection is not a single simple path.
    #[error("solver selection is not a single path: {reason}")]
    MalformedSolution {
        /// Which invariant the selection broke.
        reason: String,
    },
}

impl RouteError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSolution {
            reason: reason.into(),
        }
    }
}

impl From<GraphError> for RouteError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::UnknownNode(node) => {
                Self::invalid_input(format!("node {node} is not part of the road network"))
            }
            GraphError::NoPath { from, to } => Self::NoPath { from, to },
            GraphError::MissingEdge { from, to } => Self::MissingEdge { from, to },
            GraphError::InvalidWeight { .. } => Self::invalid_input(err.to_string()),
        }
    }
}
