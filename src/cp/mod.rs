//! Roster model builders.
//!
//! Bridges the rostering domain to the [`solver`](crate::solver) IR. Both
//! builders share one variable layout and one hard backbone; they differ in
//! which operational rules stay hard:
//!
//! - [`StrictModelBuilder`]: every rule is a hard constraint; only
//!   understaffing and overtime are absorbed by penalized slack.
//! - [`RelaxedModelBuilder`]: rest, night-limit, and skill rules become
//!   penalized violation variables so the model stays solvable under
//!   conflicting rules.
//!
//! # Reference
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Laborie et al. (2018), "IBM ILOG CP Optimizer for Scheduling"

mod relaxed;
mod strict;

pub use relaxed::RelaxedModelBuilder;
pub use strict::StrictModelBuilder;

use crate::models::{SolveRequest, Weights};
use crate::solver::{LinearModel, VarId};

/// Flat offset-indexed variable table shared by both roster models.
///
/// One boolean per (nurse, day, shift) meaning "nurse works this shift",
/// one understaff slack per (day, shift), and one overtime slack per nurse.
/// Offsets are precomputed so every constraint rule can address variables
/// without composite-key lookups.
#[derive(Debug, Clone)]
pub struct RosterVars {
    num_days: usize,
    num_shifts: usize,
    x: Vec<VarId>,
    under: Vec<VarId>,
    over: Vec<VarId>,
}

impl RosterVars {
    /// Declares the full variable table on a model.
    ///
    /// Understaff slack on a cell is bounded by that cell's demand (the
    /// coverage equality can never need more), overtime slack by the total
    /// number of shift slots.
    pub fn declare(model: &mut LinearModel, request: &SolveRequest) -> Self {
        let num_nurses = request.nurses.len();
        let num_days = request.days.len();
        let num_shifts = request.shifts.len();

        let x = (0..num_nurses * num_days * num_shifts)
            .map(|_| model.bool_var())
            .collect();
        let mut under = Vec::with_capacity(num_days * num_shifts);
        for day in &request.days {
            for shift in &request.shifts {
                under.push(model.int_var(0, request.demand_for(day, shift) as i64));
            }
        }
        let over = (0..num_nurses)
            .map(|_| model.int_var(0, (num_days * num_shifts) as i64))
            .collect();

        Self {
            num_days,
            num_shifts,
            x,
            under,
            over,
        }
    }

    /// Decision variable: nurse `n` works shift `s` on day `d`.
    #[inline]
    pub fn x(&self, n: usize, d: usize, s: usize) -> VarId {
        self.x[(n * self.num_days + d) * self.num_shifts + s]
    }

    /// Understaff slack on (day `d`, shift `s`).
    #[inline]
    pub fn under(&self, d: usize, s: usize) -> VarId {
        self.under[d * self.num_shifts + s]
    }

    /// Overtime slack for nurse `n`.
    #[inline]
    pub fn over(&self, n: usize) -> VarId {
        self.over[n]
    }
}

/// Working-day cap for one week bucket: at most 5 working days per week —
/// two days off in a full ISO week. Shorter buckets are bounded by their own
/// length, so the rule only bites on buckets of 6 days or more.
pub(crate) fn weekly_work_cap(bucket_len: usize) -> i64 {
    bucket_len.min(5) as i64
}

/// Applies the hard backbone both tiers keep:
///
/// 1. Coverage: assigned + understaff slack == demand, exactly. Slack
///    absorbs shortfall only; surplus is impossible under the equality.
/// 2. At most one shift per nurse per day.
/// 3. Hard zero on unavailable (nurse, day, shift) cells.
pub(crate) fn apply_core_rules(model: &mut LinearModel, vars: &RosterVars, request: &SolveRequest) {
    for (d, day) in request.days.iter().enumerate() {
        for (s, shift) in request.shifts.iter().enumerate() {
            let mut terms: Vec<(i64, VarId)> =
                (0..request.nurses.len()).map(|n| (1, vars.x(n, d, s))).collect();
            terms.push((1, vars.under(d, s)));
            model.add_eq(terms, request.demand_for(day, shift) as i64);
        }
    }

    for n in 0..request.nurses.len() {
        for d in 0..request.days.len() {
            let terms = (0..request.shifts.len()).map(|s| (1, vars.x(n, d, s))).collect();
            model.add_le(terms, 1);
        }
    }

    for (n, nurse) in request.nurses.iter().enumerate() {
        for (d, day) in request.days.iter().enumerate() {
            for (s, shift) in request.shifts.iter().enumerate() {
                if !request.is_available(nurse, day, shift) {
                    model.add_eq(vec![(1, vars.x(n, d, s))], 0);
                }
            }
        }
    }
}

/// Adds the objective terms both tiers share: understaffing, overtime, and
/// the non-zero preference penalties.
pub(crate) fn apply_base_objective(
    model: &mut LinearModel,
    vars: &RosterVars,
    request: &SolveRequest,
    weights: &Weights,
) {
    for d in 0..request.days.len() {
        for s in 0..request.shifts.len() {
            model.add_objective_term(weights.understaff_penalty, vars.under(d, s));
        }
    }
    for n in 0..request.nurses.len() {
        model.add_objective_term(weights.overtime_penalty, vars.over(n));
    }
    for (n, nurse) in request.nurses.iter().enumerate() {
        for (d, day) in request.days.iter().enumerate() {
            for (s, shift) in request.shifts.iter().enumerate() {
                let penalty = request.preference_penalty(nurse, day, shift);
                if penalty != 0 {
                    model.add_objective_term(
                        weights.preference_penalty_multiplier * penalty,
                        vars.x(n, d, s),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> SolveRequest {
        SolveRequest::new(
            vec!["N1".into(), "N2".into()],
            vec!["Mon".into(), "Tue".into()],
            vec!["Morning".into(), "Night".into()],
        )
        .with_uniform_demand(1)
    }

    #[test]
    fn test_variable_layout() {
        let request = sample_request();
        let mut model = LinearModel::new("layout");
        let vars = RosterVars::declare(&mut model, &request);

        // 2 nurses × 2 days × 2 shifts + 4 under + 2 over
        assert_eq!(model.var_count(), 8 + 4 + 2);

        // Offsets are distinct across the whole table
        let mut seen = std::collections::HashSet::new();
        for n in 0..2 {
            for d in 0..2 {
                for s in 0..2 {
                    assert!(seen.insert(vars.x(n, d, s)));
                }
            }
        }
        for d in 0..2 {
            for s in 0..2 {
                assert!(seen.insert(vars.under(d, s)));
            }
        }
        assert!(seen.insert(vars.over(0)));
        assert!(seen.insert(vars.over(1)));
    }

    #[test]
    fn test_core_rule_counts() {
        let request = sample_request();
        let mut model = LinearModel::new("core");
        let vars = RosterVars::declare(&mut model, &request);
        apply_core_rules(&mut model, &vars, &request);

        // 4 coverage equalities + 4 one-shift-per-day, no availability zeros
        assert_eq!(model.constraint_count(), 8);
    }

    #[test]
    fn test_availability_pins_to_zero() {
        let request = sample_request().with_unavailable("N1", "Mon", "Night");
        let mut model = LinearModel::new("avail");
        let vars = RosterVars::declare(&mut model, &request);
        apply_core_rules(&mut model, &vars, &request);

        assert_eq!(model.constraint_count(), 9);
        let pin = model.constraints().last().unwrap();
        assert_eq!(pin.terms, vec![(1, vars.x(0, 0, 1))]);
        assert_eq!(pin.rhs, 0);
    }

    #[test]
    fn test_base_objective_skips_zero_preferences() {
        let request = sample_request().with_preference("N2", "Tue", "Night", 4);
        let mut model = LinearModel::new("objective");
        let vars = RosterVars::declare(&mut model, &request);
        apply_base_objective(&mut model, &vars, &request, &Weights::default());

        // 4 understaff terms + 2 overtime terms + exactly 1 preference term
        assert_eq!(model.objective().len(), 7);
        assert!(model.objective().contains(&(4, vars.x(1, 1, 1))));
    }
}
