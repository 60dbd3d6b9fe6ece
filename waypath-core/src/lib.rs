//! Core domain types and the route optimisation kernel for Waypath.
//!
//! A request travels through four stages:
//!
//! 1. [`stitch_segments`] joins shortest paths between consecutive waypoints
//!    into one node walk.
//! 2. [`ArcSet::from_walk`] turns the walk into de-duplicated, weighted arcs.
//! 3. A [`FlowSolver`] selects the minimum-weight arc subset satisfying flow
//!    conservation between origin and destination (see [`FlowProblem`]).
//! 4. [`reconstruct_route`] walks the selection into an ordered [`Route`].
//!
//! [`RoutePlanner`] runs the stages in order and surfaces the first failure as
//! a [`RouteError`]. The road network is supplied by the caller through the
//! [`RoadGraph`] trait and is never mutated.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod arcs;
pub mod error;
pub mod flow;
pub mod graph;
mod node;
pub mod planner;
pub mod reconstruct;
pub mod route;
pub mod stitch;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use arcs::{ArcSet, FlowArc};
pub use error::{OptimisationError, RouteError};
pub use flow::{FlowConstraint, FlowProblem, FlowSolver, NodeRole, Selection};
pub use graph::{GraphError, RoadGraph, RoadNetwork, RoadNetworkBuilder};
pub use node::NodeId;
pub use planner::{PlanOutcome, RoutePlanner, RoutePlannerConfig};
pub use reconstruct::reconstruct_route;
pub use route::Route;
pub use stitch::stitch_segments;
