//! Command-line interface for the waypath route planner.
#![forbid(unsafe_code)]

mod error;
mod solve;

use clap::{Parser, Subcommand};

pub use error::CliError;

use solve::{SolveArgs, run_solve};

pub(crate) const ARG_NETWORK: &str = "network";
pub(crate) const ARG_WAYPOINTS: &str = "waypoints";
pub(crate) const ARG_INTEGRALITY_TOLERANCE: &str = "integrality-tolerance";
pub(crate) const ENV_NETWORK: &str = "WAYPATH_CMDS_SOLVE_NETWORK";
pub(crate) const ENV_WAYPOINTS: &str = "WAYPATH_CMDS_SOLVE_WAYPOINTS";

/// Run the waypath CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration, network
/// loading, planning or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waypath",
    about = "Minimum-distance routing through ordered waypoints",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a route through waypoints over a road network file.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
