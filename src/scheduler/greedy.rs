//! Greedy fallback scheduler.
//!
//! # Algorithm
//!
//! Iterates (day, shift) cells in input order. For each cell:
//!
//! 1. Fill skill-required seats first: for each required skill (sorted by
//!    label), scan nurses in input order and take the first available,
//!    not-yet-used-today nurse holding the skill, until the quota is met or
//!    candidates run out.
//! 2. Fill remaining seats up to demand with the same scan, skill-agnostic.
//! 3. Chosen nurses are marked used for the day, enforcing the
//!    one-shift-per-day rule by construction.
//!
//! A pure function of input order — no randomness, no tie-breaking state —
//! so repeated runs produce identical rosters. It cannot fail: exhausted
//! candidates simply leave the cell understaffed.
//!
//! # Complexity
//! O(days × shifts × nurses × skills).

use crate::models::{Assignment, SolveRequest};

/// Deterministic greedy roster fill. Last resort of the solve cascade, but
/// usable standalone as a fast baseline.
///
/// # Example
///
/// ```
/// use u_roster::scheduler::GreedyScheduler;
/// use u_roster::models::SolveRequest;
///
/// let request = SolveRequest::new(
///     vec!["N1".into(), "N2".into()],
///     vec!["Mon".into()],
///     vec!["Day".into()],
/// )
/// .with_uniform_demand(1);
///
/// let roster = GreedyScheduler::new().schedule(&request);
/// assert_eq!(roster.len(), 1);
/// assert_eq!(roster[0].nurse, "N1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler;

impl GreedyScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Fills the roster greedily. Always returns, possibly with fewer
    /// assignments than demand.
    pub fn schedule(&self, request: &SolveRequest) -> Vec<Assignment> {
        let num_nurses = request.nurses.len();
        let mut assignments = Vec::new();
        // used[n * days + d]: nurse n already works on day d
        let mut used = vec![false; num_nurses * request.days.len()];

        for (d, day) in request.days.iter().enumerate() {
            for shift in &request.shifts {
                let demand = request.demand_for(day, shift) as usize;
                let mut chosen: Vec<usize> = Vec::new();

                for (skill, need) in request.required_skills_for(day, shift) {
                    let mut have = chosen
                        .iter()
                        .filter(|&&n| request.has_skill(&request.nurses[n], skill))
                        .count();
                    for (n, nurse) in request.nurses.iter().enumerate() {
                        if have >= need as usize {
                            break;
                        }
                        if request.is_available(nurse, day, shift)
                            && !used[n * request.days.len() + d]
                            && request.has_skill(nurse, skill)
                        {
                            chosen.push(n);
                            used[n * request.days.len() + d] = true;
                            have += 1;
                        }
                    }
                }

                for (n, nurse) in request.nurses.iter().enumerate() {
                    if chosen.len() >= demand {
                        break;
                    }
                    if request.is_available(nurse, day, shift) && !used[n * request.days.len() + d] {
                        chosen.push(n);
                        used[n * request.days.len() + d] = true;
                    }
                }

                for n in chosen {
                    assignments.push(Assignment::new(day, shift, &request.nurses[n]));
                }
            }
        }

        assignments
    }
}
