//! Solve response model.
//!
//! The packed result of a solve call: which tier answered, the assignment
//! list, remaining understaffing, per-nurse statistics, and solver
//! diagnostics. Every valid request produces a response — the heuristic
//! tier guarantees it.

use serde::{Deserialize, Serialize};

/// Which tier produced the roster, and whether it was proven optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// Strict model, proven optimal.
    StrictOptimal,
    /// Strict model, feasible incumbent within the time budget.
    StrictFeasible,
    /// Relaxed model, proven optimal.
    RelaxedOptimal,
    /// Relaxed model, feasible incumbent within the time budget.
    RelaxedFeasible,
    /// Greedy fallback; both model tiers failed.
    Heuristic,
}

impl SolveStatus {
    /// Whether this status came from a constraint-model tier (as opposed to
    /// the greedy fallback).
    pub fn is_model_tier(&self) -> bool {
        !matches!(self, SolveStatus::Heuristic)
    }
}

/// One nurse working one shift on one day — the atomic roster unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub day: String,
    pub shift: String,
    pub nurse: String,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(day: impl Into<String>, shift: impl Into<String>, nurse: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            shift: shift.into(),
            nurse: nurse.into(),
        }
    }
}

/// A shift that remained below demand. Emitted only when `missing > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Understaffing {
    pub day: String,
    pub shift: String,
    /// Headcount still missing after assignment.
    pub missing: u32,
}

/// Per-nurse roster statistics. One entry per nurse in the request,
/// regardless of tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NurseStats {
    pub nurse: String,
    /// Total shifts assigned across the horizon.
    pub assigned_shifts: u32,
    /// Shifts worked above the nurse's maximum (0 on the heuristic tier,
    /// which tracks no overtime concept).
    pub overtime: u32,
    /// Night shifts assigned (0 when no shift label matches "night").
    pub nights: u32,
}

/// Solver diagnostics and tier commentary.
///
/// Model tiers fill the numeric fields when the backend reports them; the
/// heuristic tier fills only `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_bound: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_time_sec: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<i64>,
}

/// The complete result of one solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    pub status: SolveStatus,
    /// Objective value from a model tier; absent on the heuristic path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<i64>,
    pub assignments: Vec<Assignment>,
    pub understaffed: Vec<Understaffing>,
    pub nurse_stats: Vec<NurseStats>,
    #[serde(default)]
    pub details: SolveDetails,
}

impl SolveResponse {
    /// Assignments for one nurse, in roster order.
    pub fn assignments_for_nurse(&self, nurse: &str) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.nurse == nurse).collect()
    }

    /// Total headcount still missing across the horizon.
    pub fn total_missing(&self) -> u32 {
        self.understaffed.iter().map(|u| u.missing).sum()
    }

    /// Stats entry for one nurse.
    pub fn stats_for(&self, nurse: &str) -> Option<&NurseStats> {
        self.nurse_stats.iter().find(|s| s.nurse == nurse)
    }
}
