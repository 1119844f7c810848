//! Pre-catalog advisory checks, grounded on the teacher's
//! `parser::validation::validate_input`. These never fail the call. Unlike
//! the teacher, referential integrity (dangling group refs, duplicate ids,
//! missing lab types) is enforced by `Catalog::build` itself and is never
//! duplicated here; everything this module reports is a warning.

use crate::parser::RawCatalogInput;
use crate::types::{CourseId, SessionKind};
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct ValidationResult {
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Advisory-only sanity checks over a loaded (not-yet-built) catalog input.
pub fn validate_input(input: &RawCatalogInput) -> ValidationResult {
    let mut result = ValidationResult::default();

    let course_ids: HashSet<&CourseId> = input.courses.iter().map(|c| &c.id).collect();

    for section in &input.sections {
        if !input.groups.iter().any(|g| g.id == section.group_id) {
            // Catalog::build will reject this as a hard error; still worth a
            // distinct warning here for callers that only run validate_input.
            result.add_warning(format!(
                "section '{}' references group '{}', which will fail catalog construction",
                section.id, section.group_id
            ));
        }
    }

    for course in &input.courses {
        for kind in &course.kinds {
            let role = kind.kind.required_role();
            if role.is_none() {
                continue;
            }
            let role = role.unwrap();
            let has_qualified = input
                .instructors
                .iter()
                .any(|i| i.role == role && i.qualified_for(&course.id));
            if !has_qualified {
                result.add_warning(format!(
                    "course '{}' kind {:?} has no qualified instructor of role {:?}",
                    course.id, kind.kind, role
                ));
            }
        }
    }

    let max_room_capacity = input.rooms.iter().map(|r| r.capacity).max().unwrap_or(0);
    for group in &input.groups {
        if group.students_count > max_room_capacity {
            result.add_warning(format!(
                "group '{}' has {} students, exceeding the largest room's capacity ({})",
                group.id, group.students_count, max_room_capacity
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Course, CourseKind, Instructor, Role};

    #[test]
    fn warns_when_no_instructor_qualified_for_a_course() {
        let input = RawCatalogInput {
            courses: vec![Course {
                id: CourseId::from("c1"),
                name: String::new(),
                year: 1,
                major: None,
                is_project: false,
                full_year: false,
                kinds: vec![CourseKind {
                    kind: SessionKind::Lecture,
                    length_minutes: 90,
                    lab_type: None,
                    sessions_per_week: None,
                    max_sections_together: 1,
                    ignore_capacity: false,
                }],
            }],
            instructors: vec![Instructor {
                id: crate::types::InstructorId::from("i1"),
                name: String::new(),
                role: Role::Ta,
                qualified_courses: [CourseId::from("c1")].into_iter().collect(),
            }],
            ..Default::default()
        };
        let result = validate_input(&input);
        assert_eq!(result.warnings.len(), 1);
    }
}
