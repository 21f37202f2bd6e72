//! Rostering domain models.
//!
//! Request types describe a rostering problem (nurses, days, shifts,
//! demand, and the optional availability/preference/skill tables);
//! response types describe a packed solution. The derived [`WeekBuckets`]
//! mapping drives the weekly rules.
//!
//! All wire-facing types serialize with `serde`.

mod calendar;
mod request;
mod response;

pub use calendar::WeekBuckets;
pub use request::{
    shift_eq, AvailabilityTable, PreferenceTable, SkillRequirementTable, SolveRequest, Weights,
};
pub use response::{
    Assignment, NurseStats, SolveDetails, SolveResponse, SolveStatus, Understaffing,
};
