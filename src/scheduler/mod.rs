//! Solve cascade, greedy fallback, and roster KPIs.
//!
//! [`RosterScheduler`] is the entry point: it validates a request and walks
//! the strict → relaxed → greedy cascade until a tier answers. The greedy
//! tier is also exposed directly as [`GreedyScheduler`] for fast baseline
//! rosters, and [`RosterKpi`] summarizes the quality of any packed response.
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4

mod cascade;
mod greedy;
mod kpi;
mod stats;

pub use cascade::{RosterScheduler, SolveError};
pub use greedy::GreedyScheduler;
pub use kpi::RosterKpi;
