//! Linear-model IR and the solver seam.
//!
//! Roster model builders emit a [`LinearModel`] — boolean/integer decision
//! variables, linear constraints with integer coefficients, and a linear
//! minimization objective — and hand it to any [`LpSolver`] implementation.
//! The solver is an external collaborator: the cascade only sees the three
//! outcomes of [`SolveOutcome`], and treats each solve as a blocking call
//! bounded by the [`SolverConfig`] time budget.
//!
//! "No solution" (timeout with nothing found, or true infeasibility) is a
//! control-flow signal, not an error; [`SolverError`] is reserved for
//! unrecoverable backend failures, which are fatal to the request.

mod milp;

pub use milp::MilpSolver;

use std::fmt;
use std::time::Duration;

/// Handle to a decision variable within one [`LinearModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Position in the model's variable table.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarDomain {
    /// {0, 1}.
    Bool,
    /// Integer within [min, max].
    Int { min: i64, max: i64 },
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

/// A linear constraint: `Σ coeff·var  cmp  rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub terms: Vec<(i64, VarId)>,
    pub cmp: Comparison,
    pub rhs: i64,
}

impl LinearConstraint {
    /// Whether the constraint holds for a value assignment.
    pub fn holds(&self, values: &[i64]) -> bool {
        let lhs: i64 = self
            .terms
            .iter()
            .map(|&(coeff, var)| coeff * values[var.index()])
            .sum();
        match self.cmp {
            Comparison::Eq => lhs == self.rhs,
            Comparison::Le => lhs <= self.rhs,
            Comparison::Ge => lhs >= self.rhs,
        }
    }
}

/// An integer linear program in minimization form.
#[derive(Debug, Clone)]
pub struct LinearModel {
    name: String,
    domains: Vec<VarDomain>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(i64, VarId)>,
}

impl LinearModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domains: Vec::new(),
            constraints: Vec::new(),
            objective: Vec::new(),
        }
    }

    /// Adds a boolean decision variable.
    pub fn bool_var(&mut self) -> VarId {
        self.domains.push(VarDomain::Bool);
        VarId(self.domains.len() - 1)
    }

    /// Adds a bounded integer decision variable.
    pub fn int_var(&mut self, min: i64, max: i64) -> VarId {
        self.domains.push(VarDomain::Int { min, max });
        VarId(self.domains.len() - 1)
    }

    /// Adds `Σ terms == rhs`.
    pub fn add_eq(&mut self, terms: Vec<(i64, VarId)>, rhs: i64) {
        self.constraints.push(LinearConstraint {
            terms,
            cmp: Comparison::Eq,
            rhs,
        });
    }

    /// Adds `Σ terms <= rhs`.
    pub fn add_le(&mut self, terms: Vec<(i64, VarId)>, rhs: i64) {
        self.constraints.push(LinearConstraint {
            terms,
            cmp: Comparison::Le,
            rhs,
        });
    }

    /// Adds `Σ terms >= rhs`.
    pub fn add_ge(&mut self, terms: Vec<(i64, VarId)>, rhs: i64) {
        self.constraints.push(LinearConstraint {
            terms,
            cmp: Comparison::Ge,
            rhs,
        });
    }

    /// Adds a minimization objective term. Repeated variables accumulate.
    pub fn add_objective_term(&mut self, coeff: i64, var: VarId) {
        self.objective.push((coeff, var));
    }

    /// Model name (diagnostics only).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable domains, indexed by [`VarId::index`].
    pub fn domains(&self) -> &[VarDomain] {
        &self.domains
    }

    /// All constraints.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Objective terms (minimization).
    pub fn objective(&self) -> &[(i64, VarId)] {
        &self.objective
    }

    /// Number of decision variables.
    pub fn var_count(&self) -> usize {
        self.domains.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

/// Per-solve limits and hints passed through to the backend.
///
/// The time limit is the only bound on a solve call; there is no
/// cancellation path. The worker count is a hint — backends without
/// parallel search ignore it.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Wall-clock budget for one solve call.
    pub time_limit: Duration,
    /// Internal search workers the backend may use.
    pub num_workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(15),
            num_workers: 8,
        }
    }
}

impl SolverConfig {
    /// Creates a config with the given time budget.
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit,
            ..Self::default()
        }
    }
}

/// Diagnostics reported by a backend when a solution was found.
///
/// `conflicts` and `branches` are search counters; backends that do not
/// expose them report `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveStats {
    /// Objective value of the returned solution.
    pub objective: f64,
    /// Best proven lower bound, when available.
    pub best_bound: Option<f64>,
    /// Wall time spent in the solve call.
    pub wall_time_sec: f64,
    /// Conflict count, when the backend reports it.
    pub conflicts: Option<i64>,
    /// Branch count, when the backend reports it.
    pub branches: Option<i64>,
}

/// A value assignment returned by a backend.
#[derive(Debug, Clone)]
pub struct SolvedModel {
    values: Vec<i64>,
    /// Solve diagnostics.
    pub stats: SolveStats,
}

impl SolvedModel {
    /// Creates a solved model from raw values.
    pub fn new(values: Vec<i64>, stats: SolveStats) -> Self {
        Self { values, stats }
    }

    /// Value of a decision variable.
    #[inline]
    pub fn value(&self, var: VarId) -> i64 {
        self.values[var.index()]
    }

    /// All values, indexed by [`VarId::index`].
    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// Outcome of one solve call.
///
/// The cascade controller pattern-matches on this: `Optimal` and `Feasible`
/// terminate the cascade, `NoSolution` advances it to the next tier.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// Proven optimal solution.
    Optimal(SolvedModel),
    /// Feasible incumbent found within the time budget, optimality unproven.
    Feasible(SolvedModel),
    /// Nothing found: true infeasibility or a timeout with no incumbent.
    NoSolution,
}

impl SolveOutcome {
    /// The solution, if one was found.
    pub fn solution(&self) -> Option<&SolvedModel> {
        match self {
            SolveOutcome::Optimal(s) | SolveOutcome::Feasible(s) => Some(s),
            SolveOutcome::NoSolution => None,
        }
    }

    /// Whether a solution was found.
    pub fn is_solution_found(&self) -> bool {
        self.solution().is_some()
    }
}

/// Unrecoverable backend failure (e.g. a malformed model). Fatal to the
/// request — never absorbed by the cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverError {
    /// Human-readable description.
    pub message: String,
}

impl SolverError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solver failure: {}", self.message)
    }
}

impl std::error::Error for SolverError {}

/// An external integer-linear-program solver.
pub trait LpSolver {
    /// Solves `model` within `config` limits.
    ///
    /// Returns `Ok(SolveOutcome::NoSolution)` for infeasibility or an empty
    /// timeout, and `Err` only for unrecoverable backend failures.
    fn solve(&self, model: &LinearModel, config: &SolverConfig) -> Result<SolveOutcome, SolverError>;
}
