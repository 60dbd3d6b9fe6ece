//! `LpFlowSolver` implementation backed by `good_lp`.

use std::time::Instant;

use waypath_core::{FlowProblem, FlowSolver, OptimisationError, Selection};

use crate::model::solve_binary_flow;

/// Configuration for [`LpFlowSolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct LpFlowSolverConfig {
    /// Distance from 0 or 1 within which a solved variable counts as binary.
    pub integrality_tolerance: f64,
}

impl Default for LpFlowSolverConfig {
    fn default() -> Self {
        Self {
            integrality_tolerance: 1e-6,
        }
    }
}

/// Exact solver for the binary flow program.
///
/// The objective is the selected weight alone. When the arc set contains
/// zero-weight arcs a second pass removes redundant arcs, allowing the length
/// to grow by at most `1e-9 * max(1, length)` over the optimum; well inside
/// the planner's objective cross-check.
///
/// # Examples
/// ```
/// use waypath_core::{ArcSet, FlowArc, FlowProblem, FlowSolver, NodeId};
/// use waypath_solver_lp::LpFlowSolver;
///
/// let mut arcs = ArcSet::default();
/// for (from, to, weight) in [(1, 2, 1.0), (2, 4, 5.0), (1, 3, 2.0), (3, 4, 2.0)] {
///     arcs.insert(FlowArc { from: NodeId::new(from), to: NodeId::new(to), weight });
/// }
/// let problem = FlowProblem::new(&arcs, NodeId::new(1), NodeId::new(4));
/// let selection = LpFlowSolver::default().solve(&problem).expect("feasible");
/// assert_eq!(selection.arc_indices(), &[2, 3]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LpFlowSolver {
    config: LpFlowSolverConfig,
}

impl LpFlowSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: LpFlowSolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &LpFlowSolverConfig {
        &self.config
    }
}

impl FlowSolver for LpFlowSolver {
    fn solve(&self, problem: &FlowProblem<'_>) -> Result<Selection, OptimisationError> {
        let started_at = Instant::now();
        let values = solve_binary_flow(problem)?;
        let selection = read_selection(problem, &values, self.config.integrality_tolerance)?;
        log::info!(
            "selected {} of {} arcs (objective {}) in {:?}",
            selection.len(),
            problem.arcs().len(),
            selection.objective(),
            started_at.elapsed()
        );
        Ok(selection)
    }
}

/// Interpret solved variable values as a [`Selection`].
///
/// The objective is evaluated from the raw values so that the caller can
/// cross-check it against the reconstructed route.
#[expect(
    clippy::float_arithmetic,
    reason = "objective and integrality checks use floating-point solver output"
)]
fn read_selection(
    problem: &FlowProblem<'_>,
    values: &[f64],
    tolerance: f64,
) -> Result<Selection, OptimisationError> {
    let arcs = problem.arcs().arcs();
    if values.len() != arcs.len() {
        return Err(OptimisationError::Solver(format!(
            "solver returned {} values for {} arcs",
            values.len(),
            arcs.len()
        )));
    }

    let mut selected = Vec::new();
    let mut objective = 0.0;
    for (index, (arc, &value)) in arcs.iter().zip(values).enumerate() {
        objective += arc.weight * value;
        if (value - 1.0).abs() <= tolerance {
            selected.push(index);
        } else if value.abs() > tolerance {
            log::warn!(
                "arc {} -> {} came back with non-integral value {value}",
                arc.from,
                arc.to
            );
            return Err(OptimisationError::NonIntegral {
                from: arc.from,
                to: arc.to,
                value,
            });
        }
    }
    Ok(Selection::new(selected, objective))
}
