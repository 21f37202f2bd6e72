//! Relaxed roster model.
//!
//! Rebuilt from the same backbone as the strict model when the strict tier
//! finds no solution. Coverage, one-shift-per-day, availability, and the
//! per-nurse maximum (with overtime slack) stay hard; the remaining rules
//! become penalized violation variables:
//!
//! - **Night→morning**: a boolean per (nurse, adjacent day pair), floored by
//!   `v >= night_i + morning_{i+1} - 1` — forced to 1 exactly when both are
//!   assigned, free to drop to 0 otherwise (minimization pushes it there).
//! - **Weekly nights**: an overflow per (nurse, bucket), floored by
//!   `nights - 2`.
//! - **Weekly rest**: an overflow per (nurse, bucket), floored by
//!   `worked - cap`.
//! - **Skill coverage**: a shortage per (day, shift, skill), capped at the
//!   requirement, with `qualified + shortage >= requirement`.
//!
//! The per-nurse *minimum* is dropped entirely rather than softened: keeping
//! it in any form could reintroduce the very infeasibility this tier exists
//! to escape, so the relaxed roster may under-schedule a nurse below the
//! configured minimum without signaling it.

use crate::models::{SolveRequest, WeekBuckets};
use crate::solver::{LinearModel, VarId};

use super::{apply_base_objective, apply_core_rules, RosterVars};

/// Builds the relaxed roster model.
pub struct RelaxedModelBuilder<'a> {
    request: &'a SolveRequest,
    weeks: &'a WeekBuckets,
}

impl<'a> RelaxedModelBuilder<'a> {
    /// Creates a builder over a validated request.
    pub fn new(request: &'a SolveRequest, weeks: &'a WeekBuckets) -> Self {
        Self { request, weeks }
    }

    /// Builds the model and its variable table.
    pub fn build(&self) -> (LinearModel, RosterVars) {
        let request = self.request;
        let weights = request.effective_weights();
        let mut model = LinearModel::new("roster_relaxed");
        let vars = RosterVars::declare(&mut model, request);

        apply_core_rules(&mut model, &vars, request);

        // Per-nurse maximum stays hard via overtime slack; the minimum is
        // dropped (see module docs)
        for (n, nurse) in request.nurses.iter().enumerate() {
            let mut capped: Vec<(i64, VarId)> = Vec::new();
            for d in 0..request.days.len() {
                for s in 0..request.shifts.len() {
                    capped.push((1, vars.x(n, d, s)));
                }
            }
            capped.push((-1, vars.over(n)));
            model.add_le(capped, request.per_nurse_max(nurse) as i64);
        }

        // Soft night→morning adjacency
        let night = request.find_shift("night");
        if let (Some(night), Some(morning)) = (night, request.find_shift("morning")) {
            for n in 0..request.nurses.len() {
                for d in 0..request.days.len().saturating_sub(1) {
                    let violation = model.bool_var();
                    // violation >= night_d + morning_{d+1} - 1
                    model.add_ge(
                        vec![
                            (1, violation),
                            (-1, vars.x(n, d, night)),
                            (-1, vars.x(n, d + 1, morning)),
                        ],
                        -1,
                    );
                    model.add_objective_term(weights.night_morning_penalty, violation);
                }
            }
        }

        // Soft weekly night cap
        if let Some(night) = night {
            for n in 0..request.nurses.len() {
                for bucket in self.weeks.groups() {
                    let overflow = model.int_var(0, bucket.len() as i64);
                    // nights - overflow <= 2
                    let mut terms: Vec<(i64, VarId)> =
                        bucket.iter().map(|&d| (1, vars.x(n, d, night))).collect();
                    terms.push((-1, overflow));
                    model.add_le(terms, 2);
                    model.add_objective_term(weights.weekly_night_over_penalty, overflow);
                }
            }
        }

        // Soft weekly rest
        for n in 0..request.nurses.len() {
            for bucket in self.weeks.groups() {
                let cap = super::weekly_work_cap(bucket.len());
                let overflow = model.int_var(0, bucket.len() as i64);
                // worked - overflow <= cap
                let mut terms: Vec<(i64, VarId)> = Vec::new();
                for &d in bucket {
                    for s in 0..request.shifts.len() {
                        terms.push((1, vars.x(n, d, s)));
                    }
                }
                terms.push((-1, overflow));
                model.add_le(terms, cap);
                model.add_objective_term(weights.weekly_overwork_penalty, overflow);
            }
        }

        // Soft skill coverage
        for (d, day) in request.days.iter().enumerate() {
            for (s, shift) in request.shifts.iter().enumerate() {
                for (skill, need) in request.required_skills_for(day, shift) {
                    let shortage = model.int_var(0, need as i64);
                    let mut terms: Vec<(i64, VarId)> = request
                        .nurses
                        .iter()
                        .enumerate()
                        .filter(|(_, nurse)| request.has_skill(nurse, skill))
                        .map(|(n, _)| (1, vars.x(n, d, s)))
                        .collect();
                    terms.push((1, shortage));
                    model.add_ge(terms, need as i64);
                    model.add_objective_term(weights.skill_shortage_penalty, shortage);
                }
            }
        }

        apply_base_objective(&mut model, &vars, request, &weights);

        (model, vars)
    }
}
