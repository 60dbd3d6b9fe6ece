//! Error type for the waypath CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waypath_core::RouteError;
use waypath_data::NetworkLoadError;

/// Errors emitted by the waypath CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// The waypoint list could not be parsed.
    #[error("invalid waypoints {input:?}: {reason}")]
    InvalidWaypoints {
        /// Raw waypoint list.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
    /// The integrality tolerance is outside `(0, 0.5)`.
    #[error("integrality tolerance {value} must lie strictly between 0 and 0.5")]
    InvalidTolerance {
        /// Rejected tolerance.
        value: f64,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The road network could not be loaded.
    #[error("failed to load road network from {path:?}: {source}")]
    LoadNetwork {
        /// Network file path.
        path: Utf8PathBuf,
        /// Loader error.
        #[source]
        source: NetworkLoadError,
    },
    /// Route planning failed.
    #[error("failed to plan route: {0}")]
    Route(#[from] RouteError),
    /// Serialising the route failed.
    #[error("failed to serialise route: {0}")]
    SerialiseRoute(#[source] serde_json::Error),
    /// Writing the route failed.
    #[error("failed to write route: {0}")]
    WriteRoute(#[source] std::io::Error),
}
