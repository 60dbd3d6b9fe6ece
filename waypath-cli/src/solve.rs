//! Solve command implementation for the waypath CLI.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use waypath_core::{FlowSolver, NodeId, RoadNetwork, Route, RoutePlanner};
use waypath_data::load_road_network;
use waypath_solver_lp::{LpFlowSolver, LpFlowSolverConfig};

use crate::{
    ARG_INTEGRALITY_TOLERANCE, ARG_NETWORK, ARG_WAYPOINTS, CliError, ENV_NETWORK, ENV_WAYPOINTS,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan the minimum-distance route through an ordered list of \
                 waypoints over a JSON road network file. Values can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Plan a route through waypoints"
)]
#[ortho_config(prefix = "WAYPATH")]
pub(crate) struct SolveArgs {
    /// Path to the JSON road network file.
    #[arg(long = ARG_NETWORK, value_name = "path")]
    #[serde(default)]
    pub(crate) network: Option<Utf8PathBuf>,
    /// Comma-separated node identifiers to visit in order.
    #[arg(long = ARG_WAYPOINTS, value_name = "ids")]
    #[serde(default)]
    pub(crate) waypoints: Option<String>,
    /// Distance from 0 or 1 within which solver values count as binary.
    #[arg(long = ARG_INTEGRALITY_TOLERANCE, value_name = "eps")]
    #[serde(default)]
    pub(crate) integrality_tolerance: Option<f64>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON road network file.
    pub(crate) network: Utf8PathBuf,
    /// Waypoints in visiting order.
    pub(crate) waypoints: Vec<NodeId>,
    /// Solver integrality tolerance.
    pub(crate) integrality_tolerance: f64,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.network, ARG_NETWORK)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let network = args.network.ok_or(CliError::MissingArgument {
            field: ARG_NETWORK,
            env: ENV_NETWORK,
        })?;
        let raw_waypoints = args.waypoints.ok_or(CliError::MissingArgument {
            field: ARG_WAYPOINTS,
            env: ENV_WAYPOINTS,
        })?;
        let waypoints = parse_waypoints(&raw_waypoints)?;

        let integrality_tolerance = args
            .integrality_tolerance
            .unwrap_or(LpFlowSolverConfig::default().integrality_tolerance);
        let in_range = integrality_tolerance > 0.0 && integrality_tolerance < 0.5;
        if !in_range {
            return Err(CliError::InvalidTolerance {
                value: integrality_tolerance,
            });
        }

        Ok(Self {
            network,
            waypoints,
            integrality_tolerance,
        })
    }
}

/// Parse a comma-separated list of node identifiers.
///
/// Entries are trimmed; at least two are required.
pub(crate) fn parse_waypoints(input: &str) -> Result<Vec<NodeId>, CliError> {
    let invalid = |reason: String| CliError::InvalidWaypoints {
        input: input.to_owned(),
        reason,
    };
    let waypoints = input
        .split(',')
        .map(str::trim)
        .map(|entry| {
            entry
                .parse::<u64>()
                .map(NodeId::new)
                .map_err(|err| invalid(format!("{entry:?} is not a node id: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if waypoints.len() < 2 {
        return Err(invalid(format!(
            "expected at least two waypoints, found {}",
            waypoints.len()
        )));
    }
    Ok(waypoints)
}

/// Whether `path` names a regular file, resolved through its parent
/// directory with capability-based IO.
fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// JSON document printed by the `solve` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SolveOutput {
    /// Route length in kilometres, rounded to two decimals.
    pub(crate) total_distance_km: f64,
    /// Route nodes in travel order.
    pub(crate) nodes: Vec<NodeId>,
    /// `[lat, lon]` pairs for route nodes with known coordinates.
    pub(crate) route: Vec<[f64; 2]>,
}

impl SolveOutput {
    fn new(route: &Route, network: &RoadNetwork) -> Self {
        Self {
            total_distance_km: round_to_centi(route.total_weight()),
            nodes: route.nodes().to_vec(),
            route: route
                .coordinates(network)
                .into_iter()
                .map(|coord| [coord.y, coord.x])
                .collect(),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "distances are rounded to two decimal places"
)]
fn round_to_centi(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds a flow solver for the current solve invocation.
pub(super) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Box<dyn FlowSolver>;
}

pub(super) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Box<dyn FlowSolver> {
        Box::new(LpFlowSolver::with_config(LpFlowSolverConfig {
            integrality_tolerance: config.integrality_tolerance,
        }))
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    run_solve_with(args, &DefaultSolveSolverBuilder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let output = execute_solve(args, builder)?;
    write_solve_output(writer, &output)
}

fn execute_solve(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
) -> Result<SolveOutput, CliError> {
    let config = resolve_solve_config(args)?;
    let network =
        load_road_network(&config.network).map_err(|source| CliError::LoadNetwork {
            path: config.network.clone(),
            source,
        })?;
    let planner = RoutePlanner::new(builder.build(&config));
    let route = planner.plan(&network, &config.waypoints)?;
    info!(
        "planned route of {} nodes through {} waypoints",
        route.nodes().len(),
        config.waypoints.len()
    );
    Ok(SolveOutput::new(&route, &network))
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn write_solve_output(writer: &mut dyn Write, output: &SolveOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerialiseRoute)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRoute)?;
    writer.write_all(b"\n").map_err(CliError::WriteRoute)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
