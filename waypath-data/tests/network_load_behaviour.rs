//! Behavioural tests for network file loading.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use waypath_core::{NodeId, RoadGraph, RoadNetwork};
use waypath_data::{NetworkLoadError, load_road_network};

#[derive(Debug)]
struct LoadWorld {
    workspace: TempDir,
    path: RefCell<Option<Utf8PathBuf>>,
    outcome: RefCell<Option<Result<RoadNetwork, NetworkLoadError>>>,
}

impl LoadWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn file_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.workspace.path().join("network.json"))
            .expect("utf-8 temp path")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn write(&self, contents: &str) {
        let path = self.file_path();
        std::fs::write(&path, contents).expect("write network file");
        self.path.replace(Some(path));
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn with_outcome<T>(&self, check: impl FnOnce(&Result<RoadNetwork, NetworkLoadError>) -> T) -> T {
        let outcome = self.outcome.borrow();
        check(outcome.as_ref().expect("outcome should be recorded"))
    }
}

#[fixture]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn world() -> LoadWorld {
    LoadWorld {
        workspace: TempDir::new().expect("create temp dir"),
        path: RefCell::new(None),
        outcome: RefCell::new(None),
    }
}

#[given("a network file with a 2400 metre edge from 1 to 2")]
fn given_valid_file(world: &LoadWorld) {
    world.write(
        r#"{"nodes":[{"id":1,"lat":51.5,"lon":-0.12},{"id":2}],
            "edges":[{"from":1,"to":2,"length":2400.0}]}"#,
    );
}

#[given("no network file exists")]
fn given_missing_file(world: &LoadWorld) {
    world.path.replace(Some(world.file_path()));
}

#[given("a network file whose edge points at an undeclared node")]
fn given_undeclared(world: &LoadWorld) {
    world.write(r#"{"nodes":[{"id":1}],"edges":[{"from":1,"to":7,"length":10.0}]}"#);
}

#[when("the network file is loaded")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_loaded(world: &LoadWorld) {
    let path = world.path.borrow().clone().expect("path should be set");
    world.outcome.replace(Some(load_road_network(&path)));
}

#[then("the network has {count} nodes")]
fn then_node_count(world: &LoadWorld, count: usize) {
    world.with_outcome(|outcome| {
        assert!(matches!(outcome, Ok(network) if network.node_count() == count));
    });
}

#[then("the edge from {from} to {to} weighs {kilometres} kilometres")]
#[expect(
    clippy::float_arithmetic,
    reason = "weights are compared with a floating-point tolerance"
)]
fn then_edge_weight(world: &LoadWorld, from: u64, to: u64, kilometres: f64) {
    world.with_outcome(|outcome| {
        let weight = outcome
            .as_ref()
            .ok()
            .and_then(|network| network.edge_weight(NodeId::new(from), NodeId::new(to)).ok());
        assert!(weight.is_some_and(|value| (value - kilometres).abs() < 1e-9));
    });
}

#[then("loading fails with a read error")]
fn then_read_error(world: &LoadWorld) {
    world.with_outcome(|outcome| {
        assert!(matches!(outcome, Err(NetworkLoadError::Read { .. })));
    });
}

#[then("loading fails with an undeclared node error")]
fn then_undeclared(world: &LoadWorld) {
    world.with_outcome(|outcome| {
        assert!(matches!(
            outcome,
            Err(NetworkLoadError::UndeclaredNode { .. })
        ));
    });
}

#[scenario(path = "tests/features/network_load.feature", index = 0)]
fn valid_file(world: LoadWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/network_load.feature", index = 1)]
fn missing_file(world: LoadWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/network_load.feature", index = 2)]
fn undeclared_node(world: LoadWorld) {
    let _ = world;
}
