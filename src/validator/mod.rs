//! Post-hoc schedule validation, grounded on the
//! teacher's `validator::hard_constraints` double-booking checks, generalized
//! from (teacher, room) pairs to the room/instructor/student triple this
//! system requires, plus day-containment, alignment, domain-compliance, and
//! completeness checks the teacher's crate doesn't need.
//!
//! This is a standalone re-check over an already-produced
//! [`ScheduleOutput`]; the solver itself already guarantees these
//! properties by construction; this module exists so a schedule saved to
//! disk can be independently re-verified (the `validate` CLI subcommand).

mod hard_constraints;

pub use hard_constraints::*;

use crate::catalog::Catalog;
use crate::types::{ScheduleOutput, SessionOccurrence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub property: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    pub total_records: usize,
}

/// Re-checks every universal property against a produced
/// [`ScheduleOutput`]. `expected_occurrences`, when supplied (the Instance
/// Generator's output for the same catalog/config), drives the
/// completeness check; pass `None` to skip it (e.g. re-validating a
/// schedule file without regenerating the occurrence list).
pub fn validate_schedule(
    output: &ScheduleOutput,
    catalog: &Catalog,
    expected_occurrences: Option<&[SessionOccurrence]>,
) -> ValidationReport {
    let mut violations = Vec::new();

    violations.extend(check_room_conflicts(&output.schedule));
    violations.extend(check_instructor_conflicts(&output.schedule));
    violations.extend(check_student_conflicts(&output.schedule));
    violations.extend(check_alignment(&output.schedule));
    violations.extend(check_domain_compliance(&output.schedule, catalog));
    violations.extend(check_project_grouping(&output.schedule));

    if let Some(occurrences) = expected_occurrences {
        violations.extend(check_completeness(&output.schedule, occurrences));
    }

    ValidationReport {
        is_valid: violations.iter().all(|v| v.severity != Severity::Error),
        total_records: output.schedule.len(),
        violations,
    }
}
