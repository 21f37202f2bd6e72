//! Tiered solve cascade.
//!
//! [`RosterScheduler`] walks the three tiers in order and stops at the
//! first that produces a roster:
//!
//! 1. strict model (every rule hard)
//! 2. relaxed model (rest, night-limit, and skill rules penalized)
//! 3. greedy fill (always succeeds)
//!
//! A solver "no solution" — true infeasibility or a timeout with no
//! incumbent — is a control-flow signal that advances the cascade, never an
//! error. The two failure modes that do surface are request rejection
//! (validation) and an unrecoverable backend fault.
//!
//! Each call is synchronous, runs at most one tier at a time, and shares no
//! state with other calls; concurrent requests are fully isolated.

use std::fmt;
use std::time::Duration;

use tracing::info;

use crate::cp::{RelaxedModelBuilder, StrictModelBuilder};
use crate::models::{SolveRequest, SolveResponse, SolveStatus, WeekBuckets};
use crate::solver::{LpSolver, MilpSolver, SolveOutcome, SolverConfig, SolverError};
use crate::validation::{validate_request, ValidationError};

use super::greedy::GreedyScheduler;
use super::stats::{pack_heuristic, pack_model_solution};

const RELAXED_MESSAGE: &str = "Relaxations applied: soft night-to-morning rule, \
     soft weekly limits, soft skill requirements; minimum totals dropped";
const HEURISTIC_MESSAGE: &str =
    "Both roster models found no solution; returned a greedy fallback schedule";

/// Terminal failure of a solve call.
///
/// Solver "no solution" outcomes never appear here — they advance the
/// cascade instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The request failed precondition checks; reported upward unchanged.
    InvalidRequest(Vec<ValidationError>),
    /// The external solver failed unrecoverably.
    Solver(SolverError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidRequest(errors) => {
                write!(f, "invalid request: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            SolveError::Solver(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<SolverError> for SolveError {
    fn from(e: SolverError) -> Self {
        SolveError::Solver(e)
    }
}

/// The solve cascade controller.
///
/// # Example
///
/// ```
/// use u_roster::models::{SolveRequest, SolveStatus};
/// use u_roster::scheduler::RosterScheduler;
///
/// let request = SolveRequest::new(
///     vec!["N1".into(), "N2".into()],
///     vec!["Mon".into(), "Tue".into()],
///     vec!["Day".into()],
/// )
/// .with_uniform_demand(1);
///
/// let response = RosterScheduler::new().solve(&request).unwrap();
/// assert_eq!(response.status, SolveStatus::StrictOptimal);
/// assert_eq!(response.assignments.len(), 2);
/// ```
pub struct RosterScheduler<S: LpSolver = MilpSolver> {
    solver: S,
    strict_config: SolverConfig,
    relaxed_config: SolverConfig,
}

impl RosterScheduler<MilpSolver> {
    /// Creates a scheduler with the default MILP backend and budgets
    /// (strict 15 s, relaxed 10 s, 8 workers).
    pub fn new() -> Self {
        Self {
            solver: MilpSolver::new(),
            strict_config: SolverConfig::with_time_limit(Duration::from_secs(15)),
            relaxed_config: SolverConfig::with_time_limit(Duration::from_secs(10)),
        }
    }
}

impl Default for RosterScheduler<MilpSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LpSolver> RosterScheduler<S> {
    /// Swaps in a different solver backend, keeping the configured budgets.
    pub fn with_solver<T: LpSolver>(self, solver: T) -> RosterScheduler<T> {
        RosterScheduler {
            solver,
            strict_config: self.strict_config,
            relaxed_config: self.relaxed_config,
        }
    }

    /// Sets the strict tier's solver budget.
    pub fn with_strict_config(mut self, config: SolverConfig) -> Self {
        self.strict_config = config;
        self
    }

    /// Sets the relaxed tier's solver budget.
    pub fn with_relaxed_config(mut self, config: SolverConfig) -> Self {
        self.relaxed_config = config;
        self
    }

    /// Solves a rostering request through the cascade.
    ///
    /// Every valid request yields a response — the greedy tier cannot fail.
    pub fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        validate_request(request).map_err(SolveError::InvalidRequest)?;

        let weeks = WeekBuckets::for_days(&request.days, request.week_index_by_day.as_ref());

        let (strict, vars) = StrictModelBuilder::new(request, &weeks).build();
        info!(
            "solving strict roster model: {} vars, {} constraints",
            strict.var_count(),
            strict.constraint_count()
        );
        match self.solver.solve(&strict, &self.strict_config)? {
            SolveOutcome::Optimal(solved) => {
                return Ok(pack_model_solution(
                    request,
                    &vars,
                    &solved,
                    SolveStatus::StrictOptimal,
                    None,
                ))
            }
            SolveOutcome::Feasible(solved) => {
                return Ok(pack_model_solution(
                    request,
                    &vars,
                    &solved,
                    SolveStatus::StrictFeasible,
                    None,
                ))
            }
            SolveOutcome::NoSolution => {}
        }

        info!("strict model found no solution, relaxing operational rules");
        let (relaxed, vars) = RelaxedModelBuilder::new(request, &weeks).build();
        match self.solver.solve(&relaxed, &self.relaxed_config)? {
            SolveOutcome::Optimal(solved) => {
                return Ok(pack_model_solution(
                    request,
                    &vars,
                    &solved,
                    SolveStatus::RelaxedOptimal,
                    Some(RELAXED_MESSAGE.to_string()),
                ))
            }
            SolveOutcome::Feasible(solved) => {
                return Ok(pack_model_solution(
                    request,
                    &vars,
                    &solved,
                    SolveStatus::RelaxedFeasible,
                    Some(RELAXED_MESSAGE.to_string()),
                ))
            }
            SolveOutcome::NoSolution => {}
        }

        info!("relaxed model found no solution, using the greedy fallback");
        let assignments = GreedyScheduler::new().schedule(request);
        Ok(pack_heuristic(request, assignments, HEURISTIC_MESSAGE))
    }
}
