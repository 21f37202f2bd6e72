//! Strict roster model.
//!
//! Every operational rule is a hard constraint. The only violations the
//! model tolerates — and prices — are understaffed shifts and shifts worked
//! above a nurse's maximum.
//!
//! # Hard rules
//!
//! 1. Coverage equality with understaff slack (shared backbone)
//! 2. At most one shift per nurse per day (shared backbone)
//! 3. Unavailable cells pinned to zero (shared backbone)
//! 4. Per-nurse totals: `total >= min` and `total - overtime <= max`
//! 5. Night→morning adjacency: no night shift directly followed by a
//!    morning shift the next day
//! 6. At most 2 night shifts per nurse per week bucket
//! 7. Weekly rest: at most 5 working days per nurse per week bucket
//!    (two days off in a full week)
//! 8. Skill coverage: each (day, shift, skill) requirement met by qualified
//!    nurses, with no slack
//!
//! Rules 5 and 6 apply only when a shift label matches the canonical
//! "night" (and for rule 5, "morning") name; without a match the rule is
//! skipped entirely rather than treated as zero-occurrence.

use crate::models::{SolveRequest, WeekBuckets};
use crate::solver::{LinearModel, VarId};

use super::{apply_base_objective, apply_core_rules, RosterVars};

/// Builds the strict roster model.
///
/// # Example
/// ```
/// use u_roster::cp::StrictModelBuilder;
/// use u_roster::models::{SolveRequest, WeekBuckets};
///
/// let request = SolveRequest::new(
///     vec!["N1".into()],
///     vec!["Mon".into()],
///     vec!["Day".into()],
/// )
/// .with_uniform_demand(1);
/// let weeks = WeekBuckets::for_days(&request.days, None);
///
/// let (model, _vars) = StrictModelBuilder::new(&request, &weeks).build();
/// assert!(model.constraint_count() > 0);
/// ```
pub struct StrictModelBuilder<'a> {
    request: &'a SolveRequest,
    weeks: &'a WeekBuckets,
}

impl<'a> StrictModelBuilder<'a> {
    /// Creates a builder over a validated request.
    pub fn new(request: &'a SolveRequest, weeks: &'a WeekBuckets) -> Self {
        Self { request, weeks }
    }

    /// Builds the model and its variable table.
    pub fn build(&self) -> (LinearModel, RosterVars) {
        let request = self.request;
        let mut model = LinearModel::new("roster_strict");
        let vars = RosterVars::declare(&mut model, request);

        apply_core_rules(&mut model, &vars, request);

        // 4) per-nurse totals with overtime slack on the upper bound
        for (n, nurse) in request.nurses.iter().enumerate() {
            let mut total: Vec<(i64, VarId)> = Vec::new();
            for d in 0..request.days.len() {
                for s in 0..request.shifts.len() {
                    total.push((1, vars.x(n, d, s)));
                }
            }

            let min = request.per_nurse_min(nurse) as i64;
            if min > 0 {
                model.add_ge(total.clone(), min);
            }

            let mut capped = total;
            capped.push((-1, vars.over(n)));
            model.add_le(capped, request.per_nurse_max(nurse) as i64);
        }

        // 5) no night shift directly before a morning shift
        let night = request.find_shift("night");
        if let (Some(night), Some(morning)) = (night, request.find_shift("morning")) {
            for n in 0..request.nurses.len() {
                for d in 0..request.days.len().saturating_sub(1) {
                    model.add_le(vec![(1, vars.x(n, d, night)), (1, vars.x(n, d + 1, morning))], 1);
                }
            }
        }

        // 6) at most 2 nights per week bucket
        if let Some(night) = night {
            for n in 0..request.nurses.len() {
                for bucket in self.weeks.groups() {
                    let terms = bucket.iter().map(|&d| (1, vars.x(n, d, night))).collect();
                    model.add_le(terms, 2);
                }
            }
        }

        // 7) weekly rest: at most 5 working days per week bucket
        for n in 0..request.nurses.len() {
            for bucket in self.weeks.groups() {
                let cap = super::weekly_work_cap(bucket.len());
                let mut terms: Vec<(i64, VarId)> = Vec::new();
                for &d in bucket {
                    for s in 0..request.shifts.len() {
                        terms.push((1, vars.x(n, d, s)));
                    }
                }
                model.add_le(terms, cap);
            }
        }

        // 8) skill coverage, hard
        for (d, day) in request.days.iter().enumerate() {
            for (s, shift) in request.shifts.iter().enumerate() {
                for (skill, need) in request.required_skills_for(day, shift) {
                    let qualified: Vec<(i64, VarId)> = request
                        .nurses
                        .iter()
                        .enumerate()
                        .filter(|(_, nurse)| request.has_skill(nurse, skill))
                        .map(|(n, _)| (1, vars.x(n, d, s)))
                        .collect();
                    // With no qualified nurses this is a constant 0 >= need,
                    // which the solver reports as no solution
                    model.add_ge(qualified, need as i64);
                }
            }
        }

        apply_base_objective(&mut model, &vars, request, &request.effective_weights());

        (model, vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(request: &SolveRequest) -> (LinearModel, RosterVars) {
        let weeks = WeekBuckets::for_days(&request.days, request.week_index_by_day.as_ref());
        StrictModelBuilder::new(request, &weeks).build()
    }

    fn two_day_request() -> SolveRequest {
        SolveRequest::new(
            vec!["N1".into(), "N2".into()],
            vec!["Mon".into(), "Tue".into()],
            vec!["Morning".into(), "Night".into()],
        )
        .with_uniform_demand(1)
    }

    /// Value vector with the given x-cells set, everything else zero.
    fn values_with(model: &LinearModel, cells: &[VarId]) -> Vec<i64> {
        let mut values = vec![0; model.var_count()];
        for cell in cells {
            values[cell.index()] = 1;
        }
        values
    }

    #[test]
    fn test_adjacency_rule_present_with_canonical_shifts() {
        let request = two_day_request();
        let (model, vars) = build(&request);

        // Working Night on Mon and Morning on Tue must violate a constraint
        let mut values = values_with(&model, &[vars.x(0, 0, 1), vars.x(0, 1, 0)]);
        // Satisfy coverage equalities via slack so only adjacency can fail
        values[vars.under(0, 0).index()] = 1;
        values[vars.under(1, 1).index()] = 1;
        assert!(model.constraints().iter().any(|c| !c.holds(&values)));
    }

    #[test]
    fn test_adjacency_rule_skipped_without_canonical_shifts() {
        let mut request = two_day_request();
        request.shifts = vec!["Early".into(), "Late".into()];
        request.demand.clear();
        let request = request.with_uniform_demand(1);

        let (with_canonical, _) = build(&two_day_request());
        let (without, _) = build(&request);
        // 2 adjacency + 2 weekly-night constraints disappear
        assert_eq!(
            with_canonical.constraint_count() - without.constraint_count(),
            4
        );
    }

    #[test]
    fn test_weekly_rest_caps_full_week_at_five() {
        // 7 opaque labels form one bucket; each nurse gets at most 5 shifts
        let request = SolveRequest::new(
            vec!["N1".into()],
            (1..=7).map(|i| format!("d{i}")).collect(),
            vec!["Day".into()],
        )
        .with_uniform_demand(1);
        let (model, vars) = build(&request);

        let rest = model
            .constraints()
            .iter()
            .find(|c| c.cmp == crate::solver::Comparison::Le && c.rhs == 5 && c.terms.len() == 7)
            .expect("weekly rest constraint");

        // Working 6 of 7 days violates the cap, 5 does not
        let six_days: Vec<VarId> = (0..6).map(|d| vars.x(0, d, 0)).collect();
        assert!(!rest.holds(&values_with(&model, &six_days)));
        assert!(rest.holds(&values_with(&model, &six_days[..5])));
    }

    #[test]
    fn test_weekly_rest_never_binds_short_buckets() {
        // A 2-day bucket stays schedulable on both days
        let request = two_day_request();
        let (model, vars) = build(&request);

        // N1 works both days; the night seats go unstaffed through slack
        let mut values = values_with(&model, &[vars.x(0, 0, 0), vars.x(0, 1, 0)]);
        values[vars.under(0, 1).index()] = 1;
        values[vars.under(1, 1).index()] = 1;
        assert!(model.constraints().iter().all(|c| c.holds(&values)));
    }

    #[test]
    fn test_min_total_constraint_only_when_positive() {
        let mut request = two_day_request();
        let baseline = build(&request).0.constraint_count();

        request.min_total_shifts_per_nurse =
            Some([("N1".to_string(), 1u32)].into_iter().collect());
        let with_min = build(&request).0.constraint_count();
        assert_eq!(with_min, baseline + 1);
    }

    #[test]
    fn test_skill_rule_counts_only_qualified() {
        let request = two_day_request()
            .with_skill("N2", "Senior")
            .with_required_skill("Mon", "Night", "Senior", 1);
        let (model, vars) = build(&request);

        let skill = model
            .constraints()
            .iter()
            .find(|c| c.cmp == crate::solver::Comparison::Ge && c.rhs == 1)
            .expect("skill constraint");
        assert_eq!(skill.terms, vec![(1, vars.x(1, 0, 1))]);
    }

    #[test]
    fn test_skill_rule_with_no_qualified_nurse_is_constant() {
        let request = two_day_request().with_required_skill("Mon", "Night", "Senior", 2);
        let (model, _) = build(&request);

        let constant = model
            .constraints()
            .iter()
            .find(|c| c.terms.is_empty())
            .expect("constant skill constraint");
        assert!(!constant.holds(&[]));
    }

    #[test]
    fn test_objective_includes_overtime_and_understaffing() {
        let request = two_day_request();
        let (model, vars) = build(&request);
        assert!(model.objective().contains(&(50, vars.under(0, 0))));
        assert!(model.objective().contains(&(10, vars.over(1))));
    }
}
