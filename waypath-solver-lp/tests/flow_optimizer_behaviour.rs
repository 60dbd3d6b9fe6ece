//! Behavioural tests for the flow optimiser kernel using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use waypath_core::test_support::diamond_network;
use waypath_core::{NodeId, RoadNetwork, Route, RouteError, RoutePlanner};
use waypath_solver_lp::LpFlowSolver;

#[derive(Debug, Default)]
struct PlannerWorld {
    network: RefCell<RoadNetwork>,
    waypoints: RefCell<Vec<NodeId>>,
    outcome: RefCell<Option<Result<Route, RouteError>>>,
}

impl PlannerWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Result<Route, RouteError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_route(&self) -> Route {
        self.expect_outcome().expect("expected planning success")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_error(&self) -> RouteError {
        self.expect_outcome().expect_err("expected planning failure")
    }
}

#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn parse_nodes(list: &str) -> Vec<NodeId> {
    list.replace(" and ", ",")
        .split(',')
        .map(|raw| NodeId::new(raw.trim().parse().expect("numeric node id")))
        .collect()
}

#[expect(
    clippy::expect_used,
    reason = "fixture edges are static and known to be valid"
)]
fn network_from(edges: &[(u64, u64, f64)]) -> RoadNetwork {
    RoadNetwork::from_edges(edges.iter().copied()).expect("valid fixture edges")
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

#[given("a diamond road network")]
fn given_diamond(world: &PlannerWorld) {
    world.network.replace(diamond_network());
}

#[given("a road network with two disconnected edges")]
fn given_disconnected(world: &PlannerWorld) {
    world
        .network
        .replace(network_from(&[(1, 2, 1.0), (3, 4, 1.0)]));
}

#[given("a road network with one edge of weight {weight}")]
fn given_single_edge(world: &PlannerWorld, weight: f64) {
    world.network.replace(network_from(&[(1, 2, weight)]));
}

#[given("a road network with a loop back to the origin")]
fn given_loop(world: &PlannerWorld) {
    world.network.replace(network_from(&[
        (1, 2, 1.0),
        (2, 3, 1.0),
        (3, 1, 1.0),
        (1, 4, 3.0),
    ]));
}

#[given("a two-way road network between 1 and 2")]
fn given_two_way(world: &PlannerWorld) {
    world
        .network
        .replace(network_from(&[(1, 2, 1.0), (2, 1, 1.0)]));
}

#[given("a road network with a cheaper way back through 3")]
fn given_way_back(world: &PlannerWorld) {
    world.network.replace(network_from(&[
        (1, 2, 3.0),
        (2, 1, 3.0),
        (2, 3, 1.0),
        (3, 1, 1.0),
    ]));
}

#[given("waypoints {list}")]
fn given_waypoints(world: &PlannerWorld, list: String) {
    world.waypoints.replace(parse_nodes(&list));
}

#[given("the single waypoint {node}")]
fn given_single_waypoint(world: &PlannerWorld, node: u64) {
    world.waypoints.replace(vec![NodeId::new(node)]);
}

#[when("the route is planned")]
fn when_planned(world: &PlannerWorld) {
    let planner = RoutePlanner::new(LpFlowSolver::new());
    let outcome = planner.plan(&*world.network.borrow(), &world.waypoints.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("the route visits {list}")]
fn then_visits(world: &PlannerWorld, list: String) {
    let route = world.expect_route();
    assert_eq!(route.nodes(), parse_nodes(&list).as_slice());
}

#[then("the route weighs {weight}")]
#[expect(
    clippy::float_arithmetic,
    reason = "weights are compared with a floating-point tolerance"
)]
fn then_weighs(world: &PlannerWorld, weight: f64) {
    let route = world.expect_route();
    assert!((route.total_weight() - weight).abs() <= 1e-6);
}

#[then("planning fails with NoPath")]
fn then_no_path(world: &PlannerWorld) {
    assert!(matches!(world.expect_error(), RouteError::NoPath { .. }));
}

#[then("planning fails with InvalidInput")]
fn then_invalid_input(world: &PlannerWorld) {
    assert!(matches!(
        world.expect_error(),
        RouteError::InvalidInput { .. }
    ));
}

#[scenario(path = "tests/features/flow_optimizer.feature", index = 0)]
fn lighter_branch(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/flow_optimizer.feature", index = 1)]
fn disconnected_waypoints(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/flow_optimizer.feature", index = 2)]
fn single_waypoint(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/flow_optimizer.feature", index = 3)]
fn direct_edge(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/flow_optimizer.feature", index = 4)]
fn shortcut_detour(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/flow_optimizer.feature", index = 5)]
fn no_way_back(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/flow_optimizer.feature", index = 6)]
fn round_trip(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/flow_optimizer.feature", index = 7)]
fn repeated_waypoint(world: PlannerWorld) {
    let _ = world;
}
