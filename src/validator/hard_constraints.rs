//! One check function per universal property, operating on the
//! flattened [`ScheduleRecord`] stream, grounded on the teacher's
//! `validator::hard_constraints::check_{teacher,student,room}_conflicts`,
//! generalized to a third resource kind (room/instructor/student) and to
//! the day-containment/alignment/domain/project-grouping properties this
//! system additionally requires.

use super::{Severity, Violation};
use crate::catalog::Catalog;
use crate::types::{RoomType, ScheduleRecord, SessionKind, SessionOccurrence};
use std::collections::{HashMap, HashSet};

fn overlaps(a_start: u32, a_len: u32, b_start: u32, b_len: u32) -> bool {
    a_start < b_start + b_len && b_start < a_start + a_len
}

/// Absolute in-day sub-slot start, recovered from a record's
/// `start_period`/`start_subslot_in_period` fields (inverse of the
/// extractor's split). A period is always 90 minutes, so
/// `base_slot_minutes`, and from it `subslots_per_period`, is recoverable
/// from `duration_minutes / duration_subslots` without assuming the
/// session's own length spans a whole period (45-minute sessions don't).
fn absolute_start(record: &ScheduleRecord) -> u32 {
    let base_slot_minutes = (record.duration_minutes / record.duration_subslots.max(1)).max(1);
    let subslots_per_period = (90 / base_slot_minutes).max(1);
    (record.start_period - 1) * subslots_per_period + record.start_subslot_in_period
}

/// Checks one exclusion property: pairs of records that key-match (same
/// day and same resource key) must have disjoint sub-slot intervals.
fn check_resource_conflicts<K: Eq + std::hash::Hash + Clone>(
    records: &[ScheduleRecord],
    property: &str,
    key_of: impl Fn(&ScheduleRecord) -> Option<K>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut by_day_resource: HashMap<(String, K), Vec<&ScheduleRecord>> = HashMap::new();
    for record in records {
        if let Some(key) = key_of(record) {
            by_day_resource
                .entry((record.day.clone(), key))
                .or_default()
                .push(record);
        }
    }

    for group in by_day_resource.values() {
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let a = group[i];
                let b = group[j];
                let a_start = absolute_start(a);
                let b_start = absolute_start(b);
                if overlaps(a_start, a.duration_subslots, b_start, b.duration_subslots) {
                    violations.push(Violation {
                        property: property.to_string(),
                        message: format!(
                            "course '{}' double-booked against '{}' on {} ({}..{} overlaps {}..{})",
                            a.course_id,
                            b.course_id,
                            a.day,
                            a_start,
                            a_start + a.duration_subslots,
                            b_start,
                            b_start + b.duration_subslots
                        ),
                        severity: Severity::Error,
                    });
                }
            }
        }
    }

    violations
}

pub fn check_room_conflicts(records: &[ScheduleRecord]) -> Vec<Violation> {
    check_resource_conflicts(records, "NoRoomDoubleBooking", |r| Some(r.room_id.clone()))
}

pub fn check_instructor_conflicts(records: &[ScheduleRecord]) -> Vec<Violation> {
    check_resource_conflicts(records, "NoInstructorDoubleBooking", |r| {
        r.instructor_id.clone()
    })
}

pub fn check_student_conflicts(records: &[ScheduleRecord]) -> Vec<Violation> {
    check_resource_conflicts(records, "NoStudentDoubleBooking", |r| {
        Some(r.section_id.clone())
    })
}

/// Alignment: any record of duration >= 2 sub-slots starts at an even
/// sub-slot index within its day.
pub fn check_alignment(records: &[ScheduleRecord]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for record in records {
        let abs = absolute_start(record);
        if record.duration_subslots >= 2 && abs % 2 != 0 {
            violations.push(Violation {
                property: "Alignment".to_string(),
                message: format!(
                    "course '{}' on {} starts at odd sub-slot {} with duration {}",
                    record.course_id, record.day, abs, record.duration_subslots
                ),
                severity: Severity::Error,
            });
        }
    }
    violations
}

/// Domain compliance: room type admissible for the session kind (Lab
/// requires an exact lab-type match), and instructor qualified with the
/// correct role. Capacity is not re-checked here; the flattened record
/// doesn't carry `ignore_capacity` or cohort size, and capacity is already
/// fully enforced before the solver ever runs (`feasibility::room_candidates`).
pub fn check_domain_compliance(records: &[ScheduleRecord], catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    for record in records {
        if let Some(lab_type) = record.lab_type {
            if record.room_type != lab_type {
                violations.push(Violation {
                    property: "DomainCompliance".to_string(),
                    message: format!(
                        "course '{}' Lab record uses room type {:?}, expected lab type {:?}",
                        record.course_id, record.room_type, lab_type
                    ),
                    severity: Severity::Error,
                });
            }
        } else {
            let allowed = RoomType::admissible_for(record.kind);
            if !allowed.contains(&record.room_type) {
                violations.push(Violation {
                    property: "DomainCompliance".to_string(),
                    message: format!(
                        "course '{}' kind {:?} uses inadmissible room type {:?}",
                        record.course_id, record.kind, record.room_type
                    ),
                    severity: Severity::Error,
                });
            }
        }

        if let Some(instructor_id) = &record.instructor_id {
            match catalog.instructor(instructor_id) {
                Some(instructor) => {
                    if Some(instructor.role) != record.kind.required_role() {
                        violations.push(Violation {
                            property: "DomainCompliance".to_string(),
                            message: format!(
                                "instructor '{}' has role {:?}, required {:?} for kind {:?}",
                                instructor_id,
                                instructor.role,
                                record.kind.required_role(),
                                record.kind
                            ),
                            severity: Severity::Error,
                        });
                    }
                    if !instructor.qualified_for(&record.course_id) {
                        violations.push(Violation {
                            property: "DomainCompliance".to_string(),
                            message: format!(
                                "instructor '{}' is not qualified for course '{}'",
                                instructor_id, record.course_id
                            ),
                            severity: Severity::Error,
                        });
                    }
                }
                None => violations.push(Violation {
                    property: "DomainCompliance".to_string(),
                    message: format!("record references unknown instructor '{instructor_id}'"),
                    severity: Severity::Error,
                }),
            }
        }
    }

    violations
}

/// Project grouping: all Project records of the same group share a day.
pub fn check_project_grouping(records: &[ScheduleRecord]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut days_by_group: HashMap<&crate::types::GroupId, HashSet<&str>> = HashMap::new();
    for record in records {
        if record.kind == SessionKind::Project {
            days_by_group
                .entry(&record.group_id)
                .or_default()
                .insert(record.day.as_str());
        }
    }
    for (group_id, days) in days_by_group {
        if days.len() > 1 {
            violations.push(Violation {
                property: "ProjectGrouping".to_string(),
                message: format!(
                    "group '{}' has Project sessions spread across {} different days",
                    group_id,
                    days.len()
                ),
                severity: Severity::Error,
            });
        }
    }
    violations
}

/// Completeness: exactly the occurrences the Instance Generator
/// produced appear in the schedule, each contributing its cohort's record
/// count. Matched by total record count, since the flattened record shape
/// carries no occurrence id to match one-for-one.
pub fn check_completeness(
    records: &[ScheduleRecord],
    occurrences: &[SessionOccurrence],
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let expected_total: usize = occurrences.iter().map(|o| o.cohort.0.len()).sum();
    if records.len() != expected_total {
        violations.push(Violation {
            property: "Completeness".to_string(),
            message: format!(
                "schedule has {} records, expected {} (one per occurrence-cohort section)",
                records.len(),
                expected_total
            ),
            severity: Severity::Error,
        });
    }
    violations
}
