//! Nurse rostering engine for the U-Engine ecosystem.
//!
//! Assigns nurses to shifts over a multi-day horizon so that staffing demand
//! is met while hard operational rules (availability, one shift per day,
//! weekly rest, skill coverage) and soft preferences are respected. When no
//! fully compliant roster exists the engine degrades gracefully through a
//! three-tier cascade:
//!
//! 1. **Strict** — every operational rule is a hard constraint; only
//!    understaffing and overtime are absorbed by penalized slack.
//! 2. **Relaxed** — rest, night-limit, and skill rules become penalized
//!    violations so a roster exists even under conflicting rules.
//! 3. **Heuristic** — a deterministic greedy fill that always returns a
//!    (possibly understaffed) roster.
//!
//! # Modules
//!
//! - **`models`**: request/response types — `SolveRequest`, `Weights`,
//!   `SolveResponse`, `Assignment`, `NurseStats`, `WeekBuckets`
//! - **`validation`**: input integrity checks (demand completeness,
//!   duplicate IDs)
//! - **`solver`**: linear-model IR and the `LpSolver` seam to the external
//!   MILP backend
//! - **`cp`**: strict and relaxed roster model builders
//! - **`scheduler`**: the solve cascade, greedy fallback, result packing,
//!   and roster KPIs
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod cp;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;
