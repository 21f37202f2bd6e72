//! MILP backend over `good_lp`.
//!
//! Translates a [`LinearModel`] into a `good_lp` problem and solves it with
//! the bundled `microlp` solver. The backend proves optimality or reports
//! infeasibility; it has no anytime incumbent, so [`SolveOutcome::Feasible`]
//! is never produced here (it exists for backends that can time out with a
//! partial result). Search counters (conflicts, branches) are not exposed
//! by `microlp` and stay `None`; wall time is measured around the call, and
//! the best bound equals the objective once optimality is proven.
//!
//! Constant constraints (no variable terms — e.g. a hard skill demand with
//! zero qualified nurses) are screened before translation: an unsatisfied
//! one is infeasibility, not a backend error.

use std::time::Instant;

use good_lp::{constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel};
use tracing::debug;

use super::{
    Comparison, LinearModel, LpSolver, SolveOutcome, SolveStats, SolvedModel, SolverConfig,
    SolverError, VarDomain,
};

/// `good_lp`/`microlp`-backed solver.
///
/// The [`SolverConfig`] time limit and worker count are forwarded where a
/// backend supports them; `microlp` runs single-threaded to completion.
#[derive(Debug, Clone, Default)]
pub struct MilpSolver;

impl MilpSolver {
    /// Creates a new backend.
    pub fn new() -> Self {
        Self
    }
}

impl LpSolver for MilpSolver {
    fn solve(&self, model: &LinearModel, config: &SolverConfig) -> Result<SolveOutcome, SolverError> {
        let started = Instant::now();

        // Constant constraints never reach the backend
        for c in model.constraints() {
            if c.terms.is_empty() && !c.holds(&[]) {
                debug!(
                    "model '{}' has an unsatisfiable constant constraint, reporting no solution",
                    model.name()
                );
                return Ok(SolveOutcome::NoSolution);
            }
        }

        debug!(
            "solving '{}': {} vars, {} constraints, budget {:?}, {} workers",
            model.name(),
            model.var_count(),
            model.constraint_count(),
            config.time_limit,
            config.num_workers,
        );

        let mut vars = ProblemVariables::new();
        let handles: Vec<good_lp::Variable> = model
            .domains()
            .iter()
            .map(|domain| match domain {
                VarDomain::Bool => vars.add(variable().binary()),
                VarDomain::Int { min, max } => {
                    vars.add(variable().integer().min(*min as f64).max(*max as f64))
                }
            })
            .collect();

        let mut objective = Expression::from(0);
        for &(coeff, var) in model.objective() {
            objective += coeff as f64 * handles[var.index()];
        }
        let objective_expr = objective.clone();

        let mut problem = vars.minimise(objective).using(default_solver);
        for c in model.constraints() {
            if c.terms.is_empty() {
                continue;
            }
            let mut lhs = Expression::from(0);
            for &(coeff, var) in &c.terms {
                lhs += coeff as f64 * handles[var.index()];
            }
            let rhs = c.rhs as f64;
            problem = problem.with(match c.cmp {
                Comparison::Eq => constraint!(lhs == rhs),
                Comparison::Le => constraint!(lhs <= rhs),
                Comparison::Ge => constraint!(lhs >= rhs),
            });
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<i64> = handles
                    .iter()
                    .map(|&v| solution.value(v).round() as i64)
                    .collect();
                let objective = solution.eval(objective_expr);
                let stats = SolveStats {
                    objective,
                    best_bound: Some(objective),
                    wall_time_sec: started.elapsed().as_secs_f64(),
                    conflicts: None,
                    branches: None,
                };
                Ok(SolveOutcome::Optimal(SolvedModel::new(values, stats)))
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::NoSolution),
            Err(ResolutionError::Unbounded) => Err(SolverError::new(format!(
                "model '{}' has an unbounded objective",
                model.name()
            ))),
            Err(other) => Err(SolverError::new(format!(
                "backend failure on model '{}': {other}",
                model.name()
            ))),
        }
    }
}
