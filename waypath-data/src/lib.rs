//! Road network loading for the waypath engine.
//!
//! Responsibilities:
//! - Read road networks from JSON network files.
//! - Convert lengths given in metres into the kilometre weights the kernel
//!   routes over.
//!
//! Boundaries:
//! - Do not encode routing rules (live in `waypath-core`).
//! - Filesystem access goes through `cap-std` with UTF-8 paths.
#![forbid(unsafe_code)]

pub mod network;

pub use network::{
    EdgeRecord, NetworkFile, NetworkLoadError, NodeRecord, load_road_network, parse_road_network,
};
