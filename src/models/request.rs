//! Solve request model and lookup tables.
//!
//! A [`SolveRequest`] carries the full rostering problem: the nurse, day,
//! and shift rosters, the demand table, and the optional availability,
//! preference, skill, per-nurse-total, week-bucket, and weight tables.
//!
//! All optional tables have total-domain lookup helpers with documented
//! defaults — a missing entry at any nesting level is never an error.
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering", §3

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Nested availability table: nurse → day → shift → {0, 1}.
pub type AvailabilityTable = HashMap<String, HashMap<String, HashMap<String, u8>>>;
/// Nested preference table: nurse → day → shift → penalty (higher = disliked).
pub type PreferenceTable = HashMap<String, HashMap<String, HashMap<String, i64>>>;
/// Nested skill requirement table: day → shift → skill → minimum headcount.
pub type SkillRequirementTable = HashMap<String, HashMap<String, HashMap<String, u32>>>;

/// Compares two shift labels case-insensitively, ignoring surrounding
/// whitespace. Used to recognize the canonical "night" and "morning" labels.
pub fn shift_eq(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Penalty coefficients for the objective.
///
/// The first three apply to both model tiers; the remaining four price the
/// rule violations that only the relaxed tier permits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Penalty per missing nurse on a shift.
    pub understaff_penalty: i64,
    /// Penalty per shift worked above a nurse's maximum.
    pub overtime_penalty: i64,
    /// Multiplier applied to per-(nurse, day, shift) preference penalties.
    pub preference_penalty_multiplier: i64,
    /// Penalty per night→morning adjacency violation (relaxed tier only).
    pub night_morning_penalty: i64,
    /// Penalty per night above the weekly cap (relaxed tier only).
    pub weekly_night_over_penalty: i64,
    /// Penalty per shift above the weekly working-day cap (relaxed tier only).
    pub weekly_overwork_penalty: i64,
    /// Penalty per missing skill-qualified nurse (relaxed tier only).
    pub skill_shortage_penalty: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            understaff_penalty: 50,
            overtime_penalty: 10,
            preference_penalty_multiplier: 1,
            night_morning_penalty: 100,
            weekly_night_over_penalty: 80,
            weekly_overwork_penalty: 60,
            skill_shortage_penalty: 80,
        }
    }
}

/// A rostering problem instance.
///
/// `nurses`, `days`, and `shifts` are ordered; day order is semantically
/// significant (adjacency rules, week buckets) and nurse order fixes the
/// scan order of the greedy fallback.
///
/// # Example
///
/// ```
/// use u_roster::models::SolveRequest;
///
/// let request = SolveRequest::new(
///     vec!["N1".into(), "N2".into()],
///     vec!["Mon".into(), "Tue".into()],
///     vec!["Morning".into(), "Night".into()],
/// )
/// .with_demand("Mon", "Morning", 1)
/// .with_demand("Mon", "Night", 1)
/// .with_demand("Tue", "Morning", 1)
/// .with_demand("Tue", "Night", 1);
///
/// assert!(request.is_available("N1", "Mon", "Night"));
/// assert_eq!(request.demand_for("Mon", "Night"), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Nurse identifiers (unique).
    pub nurses: Vec<String>,
    /// Day identifiers in chronological order (ISO dates or opaque labels).
    pub days: Vec<String>,
    /// Shift identifiers in daily order.
    pub shifts: Vec<String>,
    /// Required headcount per day × shift. Every pair must be present.
    pub demand: HashMap<String, HashMap<String, u32>>,

    /// Minimum total shifts per nurse across the horizon (default 0).
    #[serde(default)]
    pub min_total_shifts_per_nurse: Option<HashMap<String, u32>>,
    /// Maximum total shifts per nurse (default: number of days).
    #[serde(default)]
    pub max_total_shifts_per_nurse: Option<HashMap<String, u32>>,
    /// Legacy alias for the maximum; consulted only when
    /// `max_total_shifts_per_nurse` has no entry for the nurse.
    #[serde(default)]
    pub max_shifts_per_nurse: Option<HashMap<String, u32>>,

    /// Availability flags; a missing entry at any level means available.
    #[serde(default)]
    pub availability: Option<AvailabilityTable>,
    /// Preference penalties; a missing entry at any level means 0.
    #[serde(default)]
    pub preferences: Option<PreferenceTable>,
    /// Skills held per nurse.
    #[serde(default)]
    pub nurse_skills: Option<HashMap<String, Vec<String>>>,
    /// Minimum skill-qualified headcount per day × shift × skill.
    #[serde(default)]
    pub required_skills: Option<SkillRequirementTable>,
    /// Explicit day → week-bucket map; derived when absent.
    #[serde(default)]
    pub week_index_by_day: Option<HashMap<String, u32>>,
    /// Penalty coefficients; defaults apply when absent.
    #[serde(default)]
    pub weights: Option<Weights>,
}

impl SolveRequest {
    /// Creates a request with empty demand and no optional tables.
    pub fn new(nurses: Vec<String>, days: Vec<String>, shifts: Vec<String>) -> Self {
        Self {
            nurses,
            days,
            shifts,
            ..Self::default()
        }
    }

    /// Sets the demand for one day × shift cell.
    pub fn with_demand(mut self, day: impl Into<String>, shift: impl Into<String>, required: u32) -> Self {
        self.demand
            .entry(day.into())
            .or_default()
            .insert(shift.into(), required);
        self
    }

    /// Fills every day × shift cell with the same demand.
    pub fn with_uniform_demand(mut self, required: u32) -> Self {
        for day in &self.days {
            let row = self.demand.entry(day.clone()).or_default();
            for shift in &self.shifts {
                row.insert(shift.clone(), required);
            }
        }
        self
    }

    /// Marks one nurse × day × shift cell unavailable.
    pub fn with_unavailable(
        mut self,
        nurse: impl Into<String>,
        day: impl Into<String>,
        shift: impl Into<String>,
    ) -> Self {
        self.availability
            .get_or_insert_with(HashMap::new)
            .entry(nurse.into())
            .or_default()
            .entry(day.into())
            .or_default()
            .insert(shift.into(), 0);
        self
    }

    /// Sets a preference penalty for one nurse × day × shift cell.
    pub fn with_preference(
        mut self,
        nurse: impl Into<String>,
        day: impl Into<String>,
        shift: impl Into<String>,
        penalty: i64,
    ) -> Self {
        self.preferences
            .get_or_insert_with(HashMap::new)
            .entry(nurse.into())
            .or_default()
            .entry(day.into())
            .or_default()
            .insert(shift.into(), penalty);
        self
    }

    /// Grants a skill to a nurse.
    pub fn with_skill(mut self, nurse: impl Into<String>, skill: impl Into<String>) -> Self {
        self.nurse_skills
            .get_or_insert_with(HashMap::new)
            .entry(nurse.into())
            .or_default()
            .push(skill.into());
        self
    }

    /// Requires a minimum skill-qualified headcount on one day × shift cell.
    pub fn with_required_skill(
        mut self,
        day: impl Into<String>,
        shift: impl Into<String>,
        skill: impl Into<String>,
        count: u32,
    ) -> Self {
        self.required_skills
            .get_or_insert_with(HashMap::new)
            .entry(day.into())
            .or_default()
            .entry(shift.into())
            .or_default()
            .insert(skill.into(), count);
        self
    }

    /// Sets the penalty coefficients.
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Returns the effective weights (defaults when none were supplied).
    pub fn effective_weights(&self) -> Weights {
        self.weights.clone().unwrap_or_default()
    }

    /// Required headcount for a day × shift cell, 0 when missing.
    ///
    /// Validation guarantees presence before solving; the default only
    /// matters for direct lookups on unvalidated requests.
    pub fn demand_for(&self, day: &str, shift: &str) -> u32 {
        self.demand
            .get(day)
            .and_then(|row| row.get(shift))
            .copied()
            .unwrap_or(0)
    }

    /// Whether a nurse may work a shift. Fails open: a missing entry at any
    /// nesting level means available.
    pub fn is_available(&self, nurse: &str, day: &str, shift: &str) -> bool {
        match &self.availability {
            None => true,
            Some(table) => table
                .get(nurse)
                .and_then(|by_day| by_day.get(day))
                .and_then(|by_shift| by_shift.get(shift))
                .map_or(true, |&flag| flag != 0),
        }
    }

    /// Preference penalty for assigning a nurse to a shift, 0 when missing.
    pub fn preference_penalty(&self, nurse: &str, day: &str, shift: &str) -> i64 {
        match &self.preferences {
            None => 0,
            Some(table) => table
                .get(nurse)
                .and_then(|by_day| by_day.get(day))
                .and_then(|by_shift| by_shift.get(shift))
                .copied()
                .unwrap_or(0),
        }
    }

    /// Whether a nurse holds a skill.
    pub fn has_skill(&self, nurse: &str, skill: &str) -> bool {
        match &self.nurse_skills {
            None => false,
            Some(table) => table
                .get(nurse)
                .map_or(false, |skills| skills.iter().any(|s| s == skill)),
        }
    }

    /// Skill requirements on a day × shift cell, sorted by skill label so
    /// that iteration order is deterministic. Zero requirements are dropped.
    pub fn required_skills_for(&self, day: &str, shift: &str) -> Vec<(&str, u32)> {
        let mut needs: Vec<(&str, u32)> = match &self.required_skills {
            None => Vec::new(),
            Some(table) => table
                .get(day)
                .and_then(|by_shift| by_shift.get(shift))
                .map(|by_skill| {
                    by_skill
                        .iter()
                        .filter(|(_, &need)| need > 0)
                        .map(|(skill, &need)| (skill.as_str(), need))
                        .collect()
                })
                .unwrap_or_default(),
        };
        needs.sort_by_key(|&(skill, _)| skill);
        needs
    }

    /// Minimum total shifts across the horizon for a nurse (default 0).
    pub fn per_nurse_min(&self, nurse: &str) -> u32 {
        self.min_total_shifts_per_nurse
            .as_ref()
            .and_then(|table| table.get(nurse))
            .copied()
            .unwrap_or(0)
    }

    /// Maximum total shifts across the horizon for a nurse.
    ///
    /// Precedence: `max_total_shifts_per_nurse`, then the legacy
    /// `max_shifts_per_nurse` alias, then the number of days (unconstrained).
    pub fn per_nurse_max(&self, nurse: &str) -> u32 {
        self.max_total_shifts_per_nurse
            .as_ref()
            .and_then(|table| table.get(nurse))
            .or_else(|| {
                self.max_shifts_per_nurse
                    .as_ref()
                    .and_then(|table| table.get(nurse))
            })
            .copied()
            .unwrap_or(self.days.len() as u32)
    }

    /// Index of the first shift matching a canonical label ("night",
    /// "morning"), or `None` — in which case every rule depending on that
    /// label is skipped.
    pub fn find_shift(&self, canonical: &str) -> Option<usize> {
        self.shifts.iter().position(|s| shift_eq(s, canonical))
    }
}
