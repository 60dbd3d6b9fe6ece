//! Facade crate for the waypath route planner.
//!
//! This crate re-exports the kernel types and exposes the exact LP solver
//! behind the `solver-lp` feature.
//!
//! ```
//! # #[cfg(feature = "solver-lp")]
//! # {
//! use waypath::{LpFlowSolver, NodeId, RoadNetwork, RoutePlanner};
//!
//! let network = RoadNetwork::from_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, 5.0)])
//!     .expect("valid edges");
//! let planner = RoutePlanner::new(LpFlowSolver::new());
//! let route = planner
//!     .plan(&network, &[NodeId::new(1), NodeId::new(3)])
//!     .expect("route exists");
//! assert_eq!(route.nodes(), &[NodeId::new(1), NodeId::new(2), NodeId::new(3)]);
//! # }
//! ```

#![forbid(unsafe_code)]

pub use waypath_core::{
    ArcSet, FlowArc, FlowConstraint, FlowProblem, FlowSolver, GraphError, NodeId, NodeRole,
    OptimisationError, PlanOutcome, RoadGraph, RoadNetwork, RoadNetworkBuilder, Route, RouteError,
    RoutePlanner, RoutePlannerConfig, Selection, reconstruct_route, stitch_segments,
};

#[cfg(feature = "solver-lp")]
pub use waypath_solver_lp::{LpFlowSolver, LpFlowSolverConfig};
