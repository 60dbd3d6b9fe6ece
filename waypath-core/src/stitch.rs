//! Join per-segment shortest paths into one node walk.

use log::debug;

use crate::{NodeId, RoadGraph, RouteError};

/// Concatenate the shortest paths between consecutive `waypoints`.
///
/// Every segment after the first drops its leading node, which repeats the
/// walk's current tail. Consecutive duplicate waypoints therefore add nothing.
/// The walk may still revisit nodes when segments overlap; flow conservation
/// in the optimiser resolves those.
///
/// # Errors
///
/// - [`RouteError::InvalidInput`] for fewer than two waypoints or a waypoint
///   outside the graph.
/// - [`RouteError::NoPath`] when a consecutive pair is disconnected.
///
/// # Examples
/// ```
/// use waypath_core::{NodeId, RoadNetwork, stitch_segments};
///
/// let network = RoadNetwork::from_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)])
///     .expect("valid network");
/// let waypoints = [NodeId::new(1), NodeId::new(3), NodeId::new(4)];
/// let walk = stitch_segments(&network, &waypoints).expect("connected");
/// let ids: Vec<u64> = walk.iter().map(|node| node.get()).collect();
/// assert_eq!(ids, vec![1, 2, 3, 4]);
/// ```
pub fn stitch_segments<G>(graph: &G, waypoints: &[NodeId]) -> Result<Vec<NodeId>, RouteError>
where
    G: RoadGraph + ?Sized,
{
    if waypoints.len() < 2 {
        return Err(RouteError::invalid_input(format!(
            "at least two waypoints are required, got {}",
            waypoints.len()
        )));
    }
    if let Some(unknown) = waypoints.iter().find(|node| !graph.contains(**node)) {
        return Err(RouteError::invalid_input(format!(
            "waypoint {unknown} is not part of the road network"
        )));
    }

    let mut walk: Vec<NodeId> = Vec::new();
    for pair in waypoints.windows(2) {
        let &[from, to] = pair else {
            continue;
        };
        let segment = graph.shortest_path(from, to)?;
        let skip = usize::from(!walk.is_empty());
        walk.extend(segment.into_iter().skip(skip));
    }
    debug!(
        "stitched {} waypoints into a walk of {} nodes",
        waypoints.len(),
        walk.len()
    );
    Ok(walk)
}
