//! Input validation for rostering requests.
//!
//! Checks structural integrity before any model is built. Detects:
//! - Missing demand entries (every day × shift must be present)
//! - Duplicate nurse, day, or shift identifiers
//!
//! A failed check rejects the request; it is never absorbed by the solve
//! cascade. Optional tables (availability, preferences, skills, weights,
//! week map) are deliberately not validated — every lookup on them has a
//! documented default.

use crate::models::SolveRequest;
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A day × shift cell has no demand entry.
    MissingDemand,
    /// Two entities share the same identifier.
    DuplicateId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a rostering request.
///
/// Checks:
/// 1. No duplicate nurse IDs
/// 2. No duplicate day IDs
/// 3. No duplicate shift IDs
/// 4. A demand entry exists for every day × shift pair
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &SolveRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let mut nurse_ids = HashSet::new();
    for nurse in &request.nurses {
        if !nurse_ids.insert(nurse.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate nurse ID: {nurse}"),
            ));
        }
    }

    let mut day_ids = HashSet::new();
    for day in &request.days {
        if !day_ids.insert(day.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate day ID: {day}"),
            ));
        }
    }

    let mut shift_ids = HashSet::new();
    for shift in &request.shifts {
        if !shift_ids.insert(shift.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift ID: {shift}"),
            ));
        }
    }

    for day in &request.days {
        match request.demand.get(day) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingDemand,
                format!("Demand missing for day '{day}'"),
            )),
            Some(row) => {
                for shift in &request.shifts {
                    if !row.contains_key(shift) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::MissingDemand,
                            format!("Demand missing for day '{day}', shift '{shift}'"),
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SolveRequest {
        SolveRequest::new(
            vec!["N1".into(), "N2".into()],
            vec!["Mon".into(), "Tue".into()],
            vec!["Morning".into(), "Night".into()],
        )
        .with_uniform_demand(1)
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_missing_demand_day() {
        let mut req = valid_request();
        req.demand.remove("Tue");

        let errors = validate_request(&req).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingDemand && e.message.contains("Tue")));
    }

    #[test]
    fn test_missing_demand_cell() {
        let mut req = valid_request();
        req.demand.get_mut("Mon").unwrap().remove("Night");

        let errors = validate_request(&req).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingDemand);
        assert!(errors[0].message.contains("Night"));
    }

    #[test]
    fn test_duplicate_nurse_id() {
        let mut req = valid_request();
        req.nurses.push("N1".into());

        let errors = validate_request(&req).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("nurse")));
    }

    #[test]
    fn test_duplicate_day_and_shift_ids() {
        let mut req = valid_request();
        req.days.push("Mon".into());
        req.shifts.push("Night".into());

        let errors = validate_request(&req).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("day ID")));
        assert!(errors.iter().any(|e| e.message.contains("shift ID")));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut req = valid_request();
        req.nurses.push("N2".into());
        req.demand.remove("Mon");

        let errors = validate_request(&req).unwrap_err();
        assert!(errors.len() >= 3); // duplicate + two missing cells
    }

    #[test]
    fn test_extra_demand_entries_allowed() {
        // Demand rows for unknown days are ignored, not rejected
        let req = valid_request().with_demand("Wed", "Night", 2);
        assert!(validate_request(&req).is_ok());
    }
}
