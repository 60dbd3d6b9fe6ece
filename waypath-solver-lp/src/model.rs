//! `good_lp` modelling helpers for `LpFlowSolver`.
//!
//! This module turns the sparse constraint table of a [`FlowProblem`] into a
//! binary integer program, solves it and returns the raw variable values in
//! arc order. Interpreting those values is left to the caller.
//!
//! The program minimises the selected weight alone. Zero-weight arcs can
//! leave that optimum ambiguous, because a zero-weight cycle fits the balance
//! rows at no cost. When the arc set holds any, a second pass keeps the
//! length within [`LENGTH_SLACK`] of the optimum and minimises the number of
//! selected arcs, which drops such cycles.

use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable, constraint,
    default_solver, variable,
};
use waypath_core::{FlowConstraint, FlowProblem, OptimisationError};

/// Relative slack on the optimal length allowed in the arc-count pass,
/// scaled by `max(1, length)`.
const LENGTH_SLACK: f64 = 1e-9;

/// What a solve pass minimises.
#[derive(Debug, Clone, Copy)]
enum Goal {
    Length,
    ArcCount { length_bound: f64 },
}

/// A linear equality `expression == rhs` over the arc variables.
struct BalanceRow {
    expression: Expression,
    rhs: f64,
}

fn sum_of(indices: &[usize], variables: &[Variable]) -> Expression {
    indices
        .iter()
        .filter_map(|&index| variables.get(index))
        .map(|&var| Expression::from(var))
        .sum()
}

/// Emit the equality rows for one node.
///
/// Rows with no incident arcs are dropped when they ask for zero flow and
/// reported as infeasible when they ask for one unit.
fn balance_rows(
    row: &FlowConstraint,
    variables: &[Variable],
) -> Result<Vec<BalanceRow>, OptimisationError> {
    let outgoing = || sum_of(&row.outgoing, variables);
    let incoming = || sum_of(&row.incoming, variables);
    let fixed = |indices: &[usize], expression: Expression, units: usize| {
        if indices.is_empty() {
            return if units == 0 {
                Ok(None)
            } else {
                log::debug!("node {} needs flow but has no incident arcs", row.node);
                Err(OptimisationError::Infeasible)
            };
        }
        let rhs = if units == 0 { 0.0 } else { 1.0 };
        Ok(Some(BalanceRow { expression, rhs }))
    };

    let rows = match row.role.fixed_degrees() {
        Some((out_units, in_units)) => vec![
            fixed(&row.outgoing, outgoing(), out_units)?,
            fixed(&row.incoming, incoming(), in_units)?,
        ],
        None if row.outgoing.is_empty() && row.incoming.is_empty() => Vec::new(),
        None => vec![Some(BalanceRow {
            expression: outgoing() - incoming(),
            rhs: 0.0,
        })],
    };
    Ok(rows.into_iter().flatten().collect())
}

fn map_resolution_error(err: ResolutionError) -> OptimisationError {
    match err {
        ResolutionError::Infeasible => OptimisationError::Infeasible,
        ResolutionError::Unbounded => OptimisationError::Unbounded,
        other => OptimisationError::Solver(other.to_string()),
    }
}

/// Solve the binary flow program for `problem`.
///
/// Returns one value per arc, in [`ArcSet`](waypath_core::ArcSet) order.
#[expect(
    clippy::float_arithmetic,
    reason = "the length bound is derived from floating-point solver output"
)]
pub(crate) fn solve_binary_flow(problem: &FlowProblem<'_>) -> Result<Vec<f64>, OptimisationError> {
    let arcs = problem.arcs().arcs();
    let shortest = solve_pass(problem, Goal::Length)?;
    if !arcs.iter().any(|arc| arc.weight <= 0.0) {
        return Ok(shortest);
    }
    let length: f64 = arcs
        .iter()
        .zip(&shortest)
        .map(|(arc, value)| arc.weight * value)
        .sum();
    let length_bound = length + LENGTH_SLACK * length.abs().max(1.0);
    log::debug!("zero-weight arcs present; minimising arc count within length {length_bound}");
    solve_pass(problem, Goal::ArcCount { length_bound })
}

fn solve_pass(problem: &FlowProblem<'_>, goal: Goal) -> Result<Vec<f64>, OptimisationError> {
    let arcs = problem.arcs().arcs();
    let mut vars = ProblemVariables::new();
    let selected: Vec<Variable> = arcs
        .iter()
        .map(|arc| vars.add(variable().binary().name(format!("x_{}_{}", arc.from, arc.to))))
        .collect();

    let mut rows = Vec::new();
    for row in problem.constraints() {
        rows.extend(balance_rows(&row, &selected)?);
    }
    if selected.is_empty() {
        return Ok(Vec::new());
    }

    let length: Expression = arcs
        .iter()
        .zip(&selected)
        .map(|(arc, &var)| arc.weight * var)
        .sum();
    let (objective, bound) = match goal {
        Goal::Length => (length, None),
        Goal::ArcCount { length_bound } => {
            let count: Expression = selected.iter().map(|&var| Expression::from(var)).sum();
            (count, Some((length, length_bound)))
        }
    };
    let mut model = vars.minimise(objective).using(default_solver);
    for BalanceRow { expression, rhs } in rows {
        model = model.with(constraint!(expression == rhs));
    }
    if let Some((expression, limit)) = bound {
        model = model.with(constraint!(expression <= limit));
    }

    log::debug!(
        "solving binary flow model ({goal:?}) with {} variables",
        selected.len()
    );
    let solution = model.solve().map_err(map_resolution_error)?;
    Ok(selected.iter().map(|&var| solution.value(var)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use waypath_core::{ArcSet, FlowArc, NodeId, NodeRole};

    fn arcs(edges: &[(u64, u64, f64)]) -> ArcSet {
        let mut set = ArcSet::default();
        for &(from, to, weight) in edges {
            set.insert(FlowArc {
                from: NodeId::new(from),
                to: NodeId::new(to),
                weight,
            });
        }
        set
    }

    #[rstest]
    fn source_without_arcs_is_infeasible() {
        let set = arcs(&[(2, 3, 1.0)]);
        let problem = FlowProblem::new(&set, NodeId::new(1), NodeId::new(3));
        let err = solve_binary_flow(&problem).expect_err("origin is isolated");
        assert_eq!(err, OptimisationError::Infeasible);
    }

    fn selected(values: &[f64]) -> Vec<usize> {
        values
            .iter()
            .enumerate()
            .filter(|(_, value)| **value > 0.5)
            .map(|(index, _)| index)
            .collect()
    }

    #[rstest]
    fn round_trip_without_arcs_is_infeasible() {
        let set = ArcSet::default();
        let problem = FlowProblem::new(&set, NodeId::new(1), NodeId::new(1));
        let err = solve_binary_flow(&problem).expect_err("no cycle to select");
        assert_eq!(err, OptimisationError::Infeasible);
    }

    #[rstest]
    fn round_trip_selects_the_cheapest_cycle() {
        // Walk 1 -> 2 -> 3 -> 1 plus the heavier direct way back.
        let set = arcs(&[(1, 2, 3.0), (2, 3, 1.0), (3, 1, 1.0), (2, 1, 3.0)]);
        let problem = FlowProblem::new(&set, NodeId::new(1), NodeId::new(1));
        let values = solve_binary_flow(&problem).expect("cycle exists");
        assert_eq!(selected(&values), vec![0, 1, 2]);
    }

    #[rstest]
    fn lighter_path_beats_fewer_arcs() {
        // 1 -> 4 directly weighs 3; the three-arc path is 1e-7 lighter.
        let set = arcs(&[
            (1, 4, 3.0),
            (1, 2, 1.0),
            (2, 3, 1.0),
            (3, 4, 0.999_999_9),
        ]);
        let problem = FlowProblem::new(&set, NodeId::new(1), NodeId::new(4));
        let values = solve_binary_flow(&problem).expect("feasible");
        assert_eq!(selected(&values), vec![1, 2, 3]);
    }

    #[rstest]
    fn zero_weight_cycles_stay_unselected() {
        let set = arcs(&[(1, 2, 1.0), (2, 3, 0.0), (3, 2, 0.0), (2, 4, 1.0)]);
        let problem = FlowProblem::new(&set, NodeId::new(1), NodeId::new(4));
        let values = solve_binary_flow(&problem).expect("feasible");
        assert_eq!(selected(&values), vec![0, 3]);
    }

    #[rstest]
    fn transit_rows_balance_both_directions() {
        let set = arcs(&[(1, 2, 1.0), (2, 3, 1.0)]);
        let problem = FlowProblem::new(&set, NodeId::new(1), NodeId::new(3));
        let rows = problem.constraints();
        let transit = rows
            .iter()
            .find(|row| row.role == NodeRole::Transit)
            .expect("node 2 is transit");
        let mut vars = ProblemVariables::new();
        let selected: Vec<Variable> = (0..set.len())
            .map(|_| vars.add(variable().binary()))
            .collect();
        let emitted = balance_rows(transit, &selected).expect("rows");
        assert_eq!(emitted.len(), 1);
    }
}
