//! Roster quality metrics (KPIs).
//!
//! Computes standard rostering performance indicators from a packed
//! response and its originating request.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage Rate | assigned headcount / demanded headcount |
//! | Understaffed Total | Sum of missing headcount |
//! | Fairness Spread | max − min assigned shifts across nurses |
//! | Night Share | night shifts / assigned shifts |
//! | Preference Cost | Sum of preference penalties over assignments |

use crate::models::{SolveRequest, SolveResponse};

/// Roster performance indicators.
#[derive(Debug, Clone)]
pub struct RosterKpi {
    /// Fraction of demanded headcount actually staffed (0.0..1.0;
    /// 1.0 when nothing was demanded).
    pub coverage_rate: f64,
    /// Total headcount missing across the horizon.
    pub understaffed_total: u32,
    /// Difference between the most and least assigned nurse.
    pub fairness_spread: u32,
    /// Fraction of assigned shifts that are night shifts.
    pub night_share: f64,
    /// Total preference penalty incurred by the roster.
    pub preference_cost: i64,
}

impl RosterKpi {
    /// Computes KPIs from a response and its request.
    pub fn calculate(request: &SolveRequest, response: &SolveResponse) -> Self {
        let demanded: u32 = request
            .days
            .iter()
            .flat_map(|day| request.shifts.iter().map(move |shift| request.demand_for(day, shift)))
            .sum();
        let assigned = response.assignments.len() as u32;

        let coverage_rate = if demanded == 0 {
            1.0
        } else {
            f64::from(assigned.min(demanded)) / f64::from(demanded)
        };

        let (min_assigned, max_assigned) = response
            .nurse_stats
            .iter()
            .fold((u32::MAX, 0), |(lo, hi), s| {
                (lo.min(s.assigned_shifts), hi.max(s.assigned_shifts))
            });
        let fairness_spread = if response.nurse_stats.is_empty() {
            0
        } else {
            max_assigned - min_assigned
        };

        let nights: u32 = response.nurse_stats.iter().map(|s| s.nights).sum();
        let night_share = if assigned == 0 {
            0.0
        } else {
            f64::from(nights) / f64::from(assigned)
        };

        let preference_cost = response
            .assignments
            .iter()
            .map(|a| request.preference_penalty(&a.nurse, &a.day, &a.shift))
            .sum();

        Self {
            coverage_rate,
            understaffed_total: response.total_missing(),
            fairness_spread,
            night_share,
            preference_cost,
        }
    }

    /// Whether the roster meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, max_spread: u32) -> bool {
        self.coverage_rate >= min_coverage && self.fairness_spread <= max_spread
    }
}
