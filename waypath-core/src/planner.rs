//! End-to-end route planning: stitch, build arcs, optimise, reconstruct.

use log::{debug, warn};

use crate::{
    ArcSet, FlowProblem, FlowSolver, NodeId, RoadGraph, Route, RouteError, Selection,
    reconstruct_route, stitch_segments,
};

/// Configuration for [`RoutePlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlannerConfig {
    /// Largest accepted gap between the reconstructed route weight and the
    /// solver objective, scaled by `max(1, |objective|)`.
    pub objective_tolerance: f64,
}

impl Default for RoutePlannerConfig {
    fn default() -> Self {
        Self {
            objective_tolerance: 1e-6,
        }
    }
}

/// Everything a planning run produced, kept for inspection and testing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    /// Concatenated shortest-path walk through the waypoints.
    pub walk: Vec<NodeId>,
    /// Arcs drawn from the walk.
    pub arcs: ArcSet,
    /// The solver's selection over `arcs`.
    pub selection: Selection,
    /// The reconstructed route.
    pub route: Route,
}

impl PlanOutcome {
    /// The flow problem the selection answers.
    #[must_use]
    pub fn problem(&self) -> Option<FlowProblem<'_>> {
        let origin = self.walk.first().copied()?;
        let destination = self.walk.last().copied()?;
        Some(FlowProblem::new(&self.arcs, origin, destination))
    }
}

/// Plans minimum-weight routes through ordered waypoints.
///
/// The planner owns no request state; a single instance can serve concurrent
/// requests when its solver is `Sync`. The graph is borrowed per call.
///
/// # Examples
/// ```
/// use waypath_core::{
///     FlowProblem, FlowSolver, NodeId, OptimisationError, RoadNetwork, RoutePlanner, Selection,
/// };
///
/// /// Selects every arc; enough for a walk without alternatives.
/// struct TakeAll;
///
/// impl FlowSolver for TakeAll {
///     fn solve(&self, problem: &FlowProblem<'_>) -> Result<Selection, OptimisationError> {
///         let arcs = problem.arcs().arcs();
///         let objective = arcs.iter().map(|arc| arc.weight).sum();
///         Ok(Selection::new((0..arcs.len()).collect(), objective))
///     }
/// }
///
/// let network = RoadNetwork::from_edges([(1, 2, 1.0), (2, 3, 2.0)]).expect("valid network");
/// let planner = RoutePlanner::new(TakeAll);
/// let route = planner
///     .plan(&network, &[NodeId::new(1), NodeId::new(3)])
///     .expect("connected waypoints");
/// assert_eq!(route.nodes().len(), 3);
/// assert_eq!(route.total_weight(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct RoutePlanner<S> {
    solver: S,
    config: RoutePlannerConfig,
}

impl<S: FlowSolver> RoutePlanner<S> {
    /// Construct a planner with default configuration.
    pub fn new(solver: S) -> Self {
        Self::with_config(solver, RoutePlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(solver: S, config: RoutePlannerConfig) -> Self {
        Self { solver, config }
    }

    /// The configured solver.
    pub const fn solver(&self) -> &S {
        &self.solver
    }

    /// Plan a route through `waypoints` in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteError`] raised by any stage.
    pub fn plan<G>(&self, graph: &G, waypoints: &[NodeId]) -> Result<Route, RouteError>
    where
        G: RoadGraph + ?Sized,
    {
        self.plan_detailed(graph, waypoints)
            .map(|outcome| outcome.route)
    }

    /// Plan a route and keep the intermediate walk, arcs and selection.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteError`] raised by any stage.
    pub fn plan_detailed<G>(
        &self,
        graph: &G,
        waypoints: &[NodeId],
    ) -> Result<PlanOutcome, RouteError>
    where
        G: RoadGraph + ?Sized,
    {
        let walk = stitch_segments(graph, waypoints)?;
        let (Some(&origin), Some(&destination)) = (waypoints.first(), waypoints.last()) else {
            return Err(RouteError::invalid_input("waypoint sequence is empty"));
        };
        let arcs = ArcSet::from_walk(graph, &walk)?;
        if arcs.is_empty() {
            debug!("every waypoint resolves to {origin}; nothing to optimise");
            return Ok(PlanOutcome {
                walk,
                arcs,
                selection: Selection::empty(),
                route: Route::new(vec![origin], 0.0),
            });
        }
        let problem = FlowProblem::new(&arcs, origin, destination);

        let selection = self.solver.solve(&problem)?;
        debug!(
            "solver selected {} of {} arcs, objective {}",
            selection.len(),
            arcs.len(),
            selection.objective()
        );
        if !selection.is_flow_balanced(&problem) {
            warn!("solver selection violates flow conservation");
            return Err(RouteError::malformed(
                "selected arcs violate flow conservation",
            ));
        }

        let route = reconstruct_route(&arcs, &selection, origin, destination)?;
        self.check_objective(&route, &selection)?;
        Ok(PlanOutcome {
            walk,
            arcs,
            selection,
            route,
        })
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "objective cross-check compares floating-point totals"
    )]
    fn check_objective(&self, route: &Route, selection: &Selection) -> Result<(), RouteError> {
        let objective = selection.objective();
        let gap = (route.total_weight() - objective).abs();
        let scale = objective.abs().max(1.0);
        if gap.is_finite() && gap <= self.config.objective_tolerance * scale {
            return Ok(());
        }
        warn!(
            "route weight {} disagrees with solver objective {objective}",
            route.total_weight()
        );
        Err(RouteError::malformed(format!(
            "route weight {} disagrees with solver objective {objective}",
            route.total_weight()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ExhaustiveSolver, ScriptedSolver, diamond_network};
    use crate::{OptimisationError, RoadNetwork};
    use rstest::{fixture, rstest};

    fn nodes(raw: &[u64]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::new).collect()
    }

    #[fixture]
    fn network() -> RoadNetwork {
        diamond_network()
    }

    #[rstest]
    #[expect(clippy::float_cmp, reason = "small integral weights sum exactly")]
    fn direct_edge_yields_single_arc_route() {
        let network = RoadNetwork::from_edges([(1, 2, 0.75)]).expect("network");
        let planner = RoutePlanner::new(ExhaustiveSolver);
        let route = planner.plan(&network, &nodes(&[1, 2])).expect("route");
        assert_eq!(route.nodes(), nodes(&[1, 2]).as_slice());
        assert_eq!(route.total_weight(), 0.75);
    }

    #[rstest]
    fn solver_failure_is_propagated(network: RoadNetwork) {
        let planner = RoutePlanner::new(ScriptedSolver::failing(OptimisationError::Infeasible));
        let err = planner
            .plan(&network, &nodes(&[1, 4]))
            .expect_err("solver fails");
        assert_eq!(err, RouteError::Optimisation(OptimisationError::Infeasible));
    }

    #[rstest]
    fn unbalanced_selection_is_malformed(network: RoadNetwork) {
        let planner = RoutePlanner::new(ScriptedSolver::selecting(vec![0], 1.0));
        let err = planner
            .plan(&network, &nodes(&[1, 4]))
            .expect_err("dead end");
        assert!(matches!(err, RouteError::MalformedSolution { .. }));
    }

    #[rstest]
    fn objective_mismatch_is_malformed(network: RoadNetwork) {
        // The walk is 1 -> 3 -> 4, so arcs 0 and 1 form the whole path.
        let planner = RoutePlanner::new(ScriptedSolver::selecting(vec![0, 1], 10.0));
        let err = planner
            .plan(&network, &nodes(&[1, 4]))
            .expect_err("objective disagrees");
        match err {
            RouteError::MalformedSolution { reason } => assert!(reason.contains("objective")),
            other => panic!("expected MalformedSolution, found {other:?}"),
        }
    }

    #[rstest]
    fn repeated_waypoint_yields_single_node_route(network: RoadNetwork) {
        let planner = RoutePlanner::new(ExhaustiveSolver);
        let outcome = planner
            .plan_detailed(&network, &nodes(&[3, 3]))
            .expect("degenerate request");
        assert_eq!(outcome.route.nodes(), nodes(&[3]).as_slice());
        assert!(outcome.arcs.is_empty());
        assert!(outcome.selection.is_empty());
    }

    #[rstest]
    #[expect(clippy::float_cmp, reason = "small integral weights sum exactly")]
    fn returning_to_the_origin_plans_a_round_trip() {
        let network = RoadNetwork::from_edges([(1, 2, 3.0), (2, 1, 3.0), (2, 3, 1.0), (3, 1, 1.0)])
            .expect("network");
        let planner = RoutePlanner::new(ExhaustiveSolver);
        let route = planner.plan(&network, &nodes(&[1, 2, 1])).expect("round trip");
        assert_eq!(route.nodes(), nodes(&[1, 2, 3, 1]).as_slice());
        assert_eq!(route.total_weight(), 5.0);
    }

    #[rstest]
    fn outcome_exposes_balanced_problem(network: RoadNetwork) {
        let planner = RoutePlanner::new(ExhaustiveSolver);
        let outcome = planner
            .plan_detailed(&network, &nodes(&[1, 2, 4]))
            .expect("route");
        let problem = outcome.problem().expect("non-empty walk");
        assert!(outcome.selection.is_flow_balanced(&problem));
        assert_eq!(outcome.walk, nodes(&[1, 2, 4]));
    }
}
