//! Result packing and per-nurse statistics.
//!
//! Converts a solved variable assignment (either model tier) or the greedy
//! scheduler's direct assignment list into a [`SolveResponse`]: assignments
//! in day→shift→nurse order, only positive understaffing records, and one
//! [`NurseStats`] per nurse regardless of tier.

use std::collections::HashMap;

use crate::cp::RosterVars;
use crate::models::{
    shift_eq, Assignment, NurseStats, SolveDetails, SolveRequest, SolveResponse, SolveStatus,
    Understaffing,
};
use crate::solver::SolvedModel;

/// Packs a model-tier solution.
pub(crate) fn pack_model_solution(
    request: &SolveRequest,
    vars: &RosterVars,
    solved: &SolvedModel,
    status: SolveStatus,
    message: Option<String>,
) -> SolveResponse {
    let mut assignments = Vec::new();
    for (d, day) in request.days.iter().enumerate() {
        for (s, shift) in request.shifts.iter().enumerate() {
            for (n, nurse) in request.nurses.iter().enumerate() {
                if solved.value(vars.x(n, d, s)) == 1 {
                    assignments.push(Assignment::new(day, shift, nurse));
                }
            }
        }
    }

    let mut understaffed = Vec::new();
    for (d, day) in request.days.iter().enumerate() {
        for (s, shift) in request.shifts.iter().enumerate() {
            let missing = solved.value(vars.under(d, s));
            if missing > 0 {
                understaffed.push(Understaffing {
                    day: day.clone(),
                    shift: shift.clone(),
                    missing: missing as u32,
                });
            }
        }
    }

    let night = request.find_shift("night");
    let nurse_stats = request
        .nurses
        .iter()
        .enumerate()
        .map(|(n, nurse)| {
            let assigned: i64 = (0..request.days.len())
                .flat_map(|d| (0..request.shifts.len()).map(move |s| (d, s)))
                .map(|(d, s)| solved.value(vars.x(n, d, s)))
                .sum();
            let nights: i64 = match night {
                Some(s) => (0..request.days.len())
                    .map(|d| solved.value(vars.x(n, d, s)))
                    .sum(),
                None => 0,
            };
            NurseStats {
                nurse: nurse.clone(),
                assigned_shifts: assigned as u32,
                overtime: solved.value(vars.over(n)) as u32,
                nights: nights as u32,
            }
        })
        .collect();

    SolveResponse {
        status,
        objective_value: Some(solved.stats.objective.round() as i64),
        assignments,
        understaffed,
        nurse_stats,
        details: SolveDetails {
            message,
            best_bound: solved.stats.best_bound,
            wall_time_sec: Some(solved.stats.wall_time_sec),
            conflicts: solved.stats.conflicts,
            branches: solved.stats.branches,
        },
    }
}

/// Packs the greedy tier's assignment list. No objective and no solver
/// diagnostics exist on this path; understaffing is computed post hoc and
/// overtime is 0 (the heuristic tracks no overtime concept).
pub(crate) fn pack_heuristic(
    request: &SolveRequest,
    assignments: Vec<Assignment>,
    message: impl Into<String>,
) -> SolveResponse {
    let mut filled: HashMap<(&str, &str), u32> = HashMap::new();
    for a in &assignments {
        *filled.entry((a.day.as_str(), a.shift.as_str())).or_insert(0) += 1;
    }

    let mut understaffed = Vec::new();
    for day in &request.days {
        for shift in &request.shifts {
            let assigned = filled
                .get(&(day.as_str(), shift.as_str()))
                .copied()
                .unwrap_or(0);
            let missing = request.demand_for(day, shift).saturating_sub(assigned);
            if missing > 0 {
                understaffed.push(Understaffing {
                    day: day.clone(),
                    shift: shift.clone(),
                    missing,
                });
            }
        }
    }

    let nurse_stats = request
        .nurses
        .iter()
        .map(|nurse| {
            let mine: Vec<&Assignment> = assignments.iter().filter(|a| &a.nurse == nurse).collect();
            NurseStats {
                nurse: nurse.clone(),
                assigned_shifts: mine.len() as u32,
                overtime: 0,
                nights: mine.iter().filter(|a| shift_eq(&a.shift, "night")).count() as u32,
            }
        })
        .collect();

    SolveResponse {
        status: SolveStatus::Heuristic,
        objective_value: None,
        assignments,
        understaffed,
        nurse_stats,
        details: SolveDetails {
            message: Some(message.into()),
            ..SolveDetails::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{LinearModel, SolveStats};

    fn sample_request() -> SolveRequest {
        SolveRequest::new(
            vec!["N1".into(), "N2".into()],
            vec!["Mon".into(), "Tue".into()],
            vec!["Morning".into(), "Night".into()],
        )
        .with_uniform_demand(1)
    }

    fn stats(objective: f64) -> SolveStats {
        SolveStats {
            objective,
            best_bound: Some(objective),
            wall_time_sec: 0.05,
            conflicts: None,
            branches: None,
        }
    }

    #[test]
    fn test_pack_model_solution() {
        let request = sample_request();
        let mut model = LinearModel::new("pack");
        let vars = RosterVars::declare(&mut model, &request);

        let mut values = vec![0; model.var_count()];
        values[vars.x(0, 0, 0).index()] = 1; // N1 Mon Morning
        values[vars.x(0, 1, 1).index()] = 1; // N1 Tue Night
        values[vars.x(1, 0, 1).index()] = 1; // N2 Mon Night
        values[vars.under(1, 0).index()] = 1; // Tue Morning short by 1
        values[vars.over(0).index()] = 1;

        let solved = SolvedModel::new(values, stats(60.0));
        let response = pack_model_solution(
            &request,
            &vars,
            &solved,
            SolveStatus::StrictOptimal,
            None,
        );

        assert_eq!(response.status, SolveStatus::StrictOptimal);
        assert_eq!(response.objective_value, Some(60));
        // Day→shift→nurse order
        assert_eq!(
            response.assignments,
            vec![
                Assignment::new("Mon", "Morning", "N1"),
                Assignment::new("Mon", "Night", "N2"),
                Assignment::new("Tue", "Night", "N1"),
            ]
        );
        assert_eq!(
            response.understaffed,
            vec![Understaffing {
                day: "Tue".into(),
                shift: "Morning".into(),
                missing: 1,
            }]
        );
        assert_eq!(
            response.nurse_stats,
            vec![
                NurseStats {
                    nurse: "N1".into(),
                    assigned_shifts: 2,
                    overtime: 1,
                    nights: 1,
                },
                NurseStats {
                    nurse: "N2".into(),
                    assigned_shifts: 1,
                    overtime: 0,
                    nights: 1,
                },
            ]
        );
        assert_eq!(response.details.wall_time_sec, Some(0.05));
    }

    #[test]
    fn test_pack_model_nights_zero_without_night_label() {
        let request = SolveRequest::new(
            vec!["N1".into()],
            vec!["Mon".into()],
            vec!["Early".into()],
        )
        .with_uniform_demand(1);

        let mut model = LinearModel::new("pack");
        let vars = RosterVars::declare(&mut model, &request);
        let mut values = vec![0; model.var_count()];
        values[vars.x(0, 0, 0).index()] = 1;

        let solved = SolvedModel::new(values, stats(0.0));
        let response =
            pack_model_solution(&request, &vars, &solved, SolveStatus::StrictOptimal, None);
        assert_eq!(response.nurse_stats[0].nights, 0);
        assert_eq!(response.nurse_stats[0].assigned_shifts, 1);
    }

    #[test]
    fn test_pack_heuristic() {
        let request = sample_request();
        let assignments = vec![
            Assignment::new("Mon", "Morning", "N1"),
            Assignment::new("Mon", "Night", "N2"),
        ];

        let response = pack_heuristic(&request, assignments, "fallback");
        assert_eq!(response.status, SolveStatus::Heuristic);
        assert_eq!(response.objective_value, None);
        assert_eq!(response.total_missing(), 2); // Tue fully unstaffed
        assert_eq!(response.details.message.as_deref(), Some("fallback"));

        let n2 = response.stats_for("N2").unwrap();
        assert_eq!(n2.assigned_shifts, 1);
        assert_eq!(n2.nights, 1);
        assert_eq!(n2.overtime, 0);
    }

    #[test]
    fn test_pack_heuristic_always_emits_stats() {
        let request = sample_request();
        let response = pack_heuristic(&request, Vec::new(), "empty");
        assert_eq!(response.nurse_stats.len(), 2);
        assert!(response
            .nurse_stats
            .iter()
            .all(|s| s.assigned_shifts == 0 && s.nights == 0));
    }
}
