//! Feasibility Pre-Check: static per-occurrence domain non-emptiness.

use crate::catalog::Catalog;
use crate::types::{InstructorId, RoomId, RoomType, SessionOccurrence};
use log::warn;
use std::collections::HashMap;

/// Candidate rooms and instructors for one occurrence, computed once and
/// reused unchanged by the Domain Builder.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub rooms: Vec<RoomId>,
    pub instructors: Vec<InstructorId>,
}

pub fn room_candidates(catalog: &Catalog, occurrence: &SessionOccurrence) -> Vec<RoomId> {
    let admissible = RoomType::admissible_for(occurrence.kind);
    let mut rooms: Vec<RoomId> = catalog
        .rooms()
        .iter()
        .filter(|room| {
            let type_ok = match occurrence.lab_type {
                Some(lab_type) => room.room_type == lab_type,
                None => admissible.contains(&room.room_type),
            };
            let capacity_ok =
                occurrence.ignore_capacity || room.capacity >= occurrence.expected_students;
            type_ok && capacity_ok
        })
        .map(|room| room.id.clone())
        .collect();
    rooms.sort();
    rooms
}

pub fn instructor_candidates(
    catalog: &Catalog,
    occurrence: &SessionOccurrence,
) -> Vec<InstructorId> {
    if !occurrence.has_instructor {
        return Vec::new();
    }
    let Some(role) = occurrence.kind.required_role() else {
        return Vec::new();
    };
    let mut instructors: Vec<InstructorId> = catalog
        .instructors()
        .iter()
        .filter(|instructor| {
            instructor.role == role && instructor.qualified_for(&occurrence.course_id)
        })
        .map(|instructor| instructor.id.clone())
        .collect();
    instructors.sort();
    instructors
}

/// Computes candidates for every occurrence, collecting an `InvalidInput`
/// message for each occurrence whose room or instructor domain is empty.
/// The solver must not be entered while any message is returned.
pub fn check_feasibility(
    catalog: &Catalog,
    occurrences: &[SessionOccurrence],
) -> (HashMap<crate::types::OccurrenceId, Candidates>, Vec<String>) {
    let mut candidates = HashMap::new();
    let mut errors = Vec::new();

    for occurrence in occurrences {
        let rooms = room_candidates(catalog, occurrence);
        let instructors = instructor_candidates(catalog, occurrence);

        if rooms.is_empty() {
            errors.push(format!(
                "occurrence '{}' has no candidate room",
                occurrence.id
            ));
        }
        if occurrence.has_instructor && instructors.is_empty() {
            errors.push(format!(
                "occurrence '{}' has no candidate instructor",
                occurrence.id
            ));
        }
        if instructors.len() == 1 && occurrence.has_instructor {
            warn!(
                "occurrence '{}' has exactly one qualified instructor candidate",
                occurrence.id
            );
        }

        candidates.insert(occurrence.id.clone(), Candidates { rooms, instructors });
    }

    (candidates, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cohort, CourseId, Instructor, InstructorId, Role, Room, SessionKind};

    fn occurrence(kind: SessionKind, lab_type: Option<RoomType>) -> SessionOccurrence {
        SessionOccurrence {
            id: crate::types::OccurrenceId::from("o1"),
            course_id: CourseId::from("c1"),
            kind,
            cohort: Cohort::new([]),
            expected_students: 20,
            length_subslots: 2,
            sessions_per_week: 1,
            lab_type,
            has_instructor: !matches!(kind, SessionKind::Project),
            ignore_capacity: false,
            repetition_index: 0,
            year: 1,
            group_id: None,
        }
    }

    #[test]
    fn empty_room_domain_is_reported() {
        let (catalog, _) = Catalog::build(vec![], vec![], vec![], vec![], vec![]).unwrap();
        let occ = occurrence(SessionKind::Lecture, None);
        let (_candidates, errors) = check_feasibility(&catalog, &[occ]);
        assert_eq!(errors.len(), 2); // no room, no instructor
    }

    #[test]
    fn lab_matches_only_declared_lab_type() {
        let rooms = vec![
            Room {
                id: crate::types::RoomId::from("physics"),
                room_type: RoomType::PhysicsLab,
                capacity: 40,
                building: String::new(),
            },
            Room {
                id: crate::types::RoomId::from("chem"),
                room_type: RoomType::ChemistryLab,
                capacity: 40,
                building: String::new(),
            },
        ];
        let (catalog, _) = Catalog::build(rooms, vec![], vec![], vec![], vec![]).unwrap();
        let occ = occurrence(SessionKind::Lab, Some(RoomType::PhysicsLab));
        let rooms = room_candidates(&catalog, &occ);
        assert_eq!(rooms, vec![crate::types::RoomId::from("physics")]);
    }

    #[test]
    fn instructor_role_must_match_kind() {
        let instructors = vec![
            Instructor {
                id: InstructorId::from("prof"),
                name: String::new(),
                role: Role::Professor,
                qualified_courses: [CourseId::from("c1")].into_iter().collect(),
            },
            Instructor {
                id: InstructorId::from("ta"),
                name: String::new(),
                role: Role::Ta,
                qualified_courses: [CourseId::from("c1")].into_iter().collect(),
            },
        ];
        let (catalog, _) = Catalog::build(vec![], instructors, vec![], vec![], vec![]).unwrap();
        let occ = occurrence(SessionKind::Lecture, None);
        let candidates = instructor_candidates(&catalog, &occ);
        assert_eq!(candidates, vec![InstructorId::from("prof")]);
    }
}
