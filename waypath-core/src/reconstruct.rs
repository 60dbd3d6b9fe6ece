//! Turn a solver selection back into an ordered route.

use std::collections::{HashMap, HashSet};

use crate::{ArcSet, FlowArc, NodeId, Route, RouteError, Selection};

/// Follow the selected arcs from `origin` to `destination`.
///
/// The selection must form exactly one simple path: every node has at most
/// one selected successor, the walk reaches `destination` without revisiting
/// a node, and it uses every selected arc.
///
/// When `origin` and `destination` coincide the path is a round trip that
/// closes on returning to the origin. An empty selection is then the route
/// that never leaves the origin.
///
/// # Errors
///
/// Returns [`RouteError::MalformedSolution`] when any of those invariants
/// fails. That points at the solver or the formulation, not at the input.
///
/// # Examples
/// ```
/// use waypath_core::{ArcSet, FlowArc, NodeId, Selection, reconstruct_route};
///
/// let mut arcs = ArcSet::default();
/// arcs.insert(FlowArc { from: NodeId::new(1), to: NodeId::new(2), weight: 1.0 });
/// arcs.insert(FlowArc { from: NodeId::new(2), to: NodeId::new(3), weight: 2.0 });
/// let selection = Selection::new(vec![1, 0], 3.0);
/// let route = reconstruct_route(&arcs, &selection, NodeId::new(1), NodeId::new(3))
///     .expect("single path");
/// assert_eq!(route.nodes(), &[NodeId::new(1), NodeId::new(2), NodeId::new(3)]);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "route weight accumulates floating-point arc lengths"
)]
pub fn reconstruct_route(
    arcs: &ArcSet,
    selection: &Selection,
    origin: NodeId,
    destination: NodeId,
) -> Result<Route, RouteError> {
    let successors = successor_map(arcs, selection)?;

    let mut nodes = vec![origin];
    let mut visited: HashSet<NodeId> = HashSet::from([origin]);
    let mut total_weight = 0.0;
    let mut current = origin;
    let stays_put = origin == destination && selection.is_empty();
    if !stays_put {
        loop {
            let arc = successors.get(&current).ok_or_else(|| {
                RouteError::malformed(format!(
                    "path stops at {current} before reaching {destination}"
                ))
            })?;
            if arc.to != destination && !visited.insert(arc.to) {
                return Err(RouteError::malformed(format!("path revisits {}", arc.to)));
            }
            nodes.push(arc.to);
            total_weight += arc.weight;
            current = arc.to;
            if current == destination {
                break;
            }
        }
    }

    let followed = nodes.len().saturating_sub(1);
    if followed != selection.len() {
        return Err(RouteError::malformed(format!(
            "{} of {} selected arcs lie off the path from {origin} to {destination}",
            selection.len().saturating_sub(followed),
            selection.len()
        )));
    }
    Ok(Route::new(nodes, total_weight))
}

fn successor_map<'a>(
    arcs: &'a ArcSet,
    selection: &Selection,
) -> Result<HashMap<NodeId, &'a FlowArc>, RouteError> {
    let mut successors: HashMap<NodeId, &FlowArc> = HashMap::with_capacity(selection.len());
    for &index in selection.arc_indices() {
        let arc = arcs
            .get(index)
            .ok_or_else(|| RouteError::malformed(format!("arc index {index} is out of range")))?;
        if successors.insert(arc.from, arc).is_some() {
            return Err(RouteError::malformed(format!(
                "{} has more than one selected successor",
                arc.from
            )));
        }
    }
    Ok(successors)
}
