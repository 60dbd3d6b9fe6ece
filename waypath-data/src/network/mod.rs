//! JSON network files.
//!
//! A network file lists nodes with optional WGS84 coordinates and directed
//! edges with lengths in metres:
//!
//! ```json
//! {
//!   "nodes": [{ "id": 1, "lat": 55.95, "lon": -3.19 }, { "id": 2 }],
//!   "edges": [{ "from": 1, "to": 2, "length": 120.0, "bidirectional": true }]
//! }
//! ```
//!
//! Loaded networks weigh edges in kilometres.

mod error;

use std::collections::HashSet;
use std::io::{BufReader, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use geo::Coord;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use waypath_core::{NodeId, RoadNetwork};

pub use error::NetworkLoadError;

const METRES_PER_KILOMETRE: f64 = 1000.0;

/// A node entry in a network file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identifier.
    pub id: NodeId,
    /// Latitude in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl NodeRecord {
    fn coordinate(&self) -> Result<Option<Coord<f64>>, NetworkLoadError> {
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Ok(None);
        };
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(NetworkLoadError::InvalidCoordinate {
                node: self.id,
                lat,
                lon,
            });
        }
        Ok(Some(Coord { x: lon, y: lat }))
    }
}

/// A directed edge entry in a network file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Tail node.
    pub from: NodeId,
    /// Head node.
    pub to: NodeId,
    /// Length in metres.
    pub length: f64,
    /// Also add `to -> from` with the same length.
    #[serde(default)]
    pub bidirectional: bool,
}

/// The on-disk shape of a road network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkFile {
    /// Declared nodes.
    pub nodes: Vec<NodeRecord>,
    /// Directed edges between declared nodes.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl NetworkFile {
    /// Validate the file and build a [`RoadNetwork`] weighted in kilometres.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkLoadError`] when a node is declared twice, an edge
    /// references an undeclared node, a coordinate is out of range or an
    /// edge length is negative or not finite.
    #[expect(
        clippy::float_arithmetic,
        reason = "edge lengths are converted from metres to kilometres"
    )]
    pub fn into_road_network(self) -> Result<RoadNetwork, NetworkLoadError> {
        let mut builder = RoadNetwork::builder();
        let mut declared = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !declared.insert(node.id) {
                return Err(NetworkLoadError::DuplicateNode { node: node.id });
            }
            builder.add_node(node.id, node.coordinate()?);
        }

        for edge in &self.edges {
            for endpoint in [edge.from, edge.to] {
                if !declared.contains(&endpoint) {
                    return Err(NetworkLoadError::UndeclaredNode {
                        from: edge.from,
                        to: edge.to,
                        node: endpoint,
                    });
                }
            }
            let kilometres = edge.length / METRES_PER_KILOMETRE;
            if edge.bidirectional {
                builder.add_two_way_edge(edge.from, edge.to, kilometres)?;
            } else {
                builder.add_edge(edge.from, edge.to, kilometres)?;
            }
        }

        let network = builder.build();
        debug!(
            "built road network with {} nodes and {} edges",
            network.node_count(),
            network.edge_count()
        );
        Ok(network)
    }
}

/// Parse a network file from `reader`.
///
/// # Errors
///
/// Returns [`NetworkLoadError::Parse`] for malformed JSON and the
/// validation errors of [`NetworkFile::into_road_network`].
///
/// # Examples
/// ```
/// use waypath_core::{NodeId, RoadGraph};
/// use waypath_data::parse_road_network;
///
/// let json = r#"{"nodes":[{"id":1},{"id":2}],"edges":[{"from":1,"to":2,"length":250.0}]}"#;
/// let network = parse_road_network(json.as_bytes()).expect("valid network");
/// let weight = network.edge_weight(NodeId::new(1), NodeId::new(2)).expect("edge");
/// assert!((weight - 0.25).abs() < 1e-12);
/// ```
pub fn parse_road_network<R: Read>(reader: R) -> Result<RoadNetwork, NetworkLoadError> {
    let file: NetworkFile = serde_json::from_reader(reader)?;
    file.into_road_network()
}

/// Load a network file from `path`.
///
/// # Errors
///
/// Returns [`NetworkLoadError::Read`] when the file cannot be opened and the
/// errors of [`parse_road_network`] otherwise.
pub fn load_road_network(path: &Utf8Path) -> Result<RoadNetwork, NetworkLoadError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        NetworkLoadError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;
    parse_road_network(BufReader::new(file)).inspect_err(|err| {
        warn!("rejected network file {path}: {err}");
    })
}
