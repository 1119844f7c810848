//! Advisory post-pass: a deterministic single-occurrence-move optimizer,
//! grounded on the teacher's section-balance pass (`scheduler/optimizer.rs`)
//! but repurposed here from enrollment balance to slot-preference moves. Runs
//! once after a successful solve; never runs during search and never turns a
//! feasible solve into an infeasible one.

use crate::scheduler::domain::OccurrenceDomain;
use crate::scheduler::solver::placements_conflict;
use crate::types::{Assignment, OccurrenceId, ScheduleConfig, SessionOccurrence};
use log::debug;
use std::collections::HashMap;

const MAX_PASSES: u32 = 10;

/// First and last period of the day are the "undesirable band"; anything
/// else is preferred. A day with fewer than 3 periods has no undesirable
/// interior, so nothing is ever moved.
fn in_undesirable_band(local_start_subslot: u32, config: &ScheduleConfig) -> bool {
    if config.periods_per_day < 3 {
        return false;
    }
    let subslots_per_period = config.subslots_per_period();
    let period = local_start_subslot / subslots_per_period;
    period == 0 || period == config.periods_per_day - 1
}

/// Tries to move each occurrence currently placed in an undesirable band
/// into a preferred band, keeping its room and instructor fixed. A move is
/// kept only if it introduces no conflict with any other current
/// assignment; otherwise the occurrence stays where the solver left it.
pub fn optimize_slot_preferences(
    occurrences: &[SessionOccurrence],
    domains: &[OccurrenceDomain],
    config: &ScheduleConfig,
    mut assignments: Vec<Assignment>,
) -> Vec<Assignment> {
    let occurrence_by_id: HashMap<&OccurrenceId, &SessionOccurrence> =
        occurrences.iter().map(|o| (&o.id, o)).collect();
    let domain_by_id: HashMap<&OccurrenceId, &OccurrenceDomain> =
        domains.iter().map(|d| (&d.occurrence_id, d)).collect();

    let mut order: Vec<usize> = (0..assignments.len()).collect();
    order.sort_by(|&a, &b| assignments[a].occurrence_id.cmp(&assignments[b].occurrence_id));

    let mut moved_total = 0u32;
    for _pass in 0..MAX_PASSES {
        let mut moved_this_pass = false;

        for &idx in &order {
            let occurrence_id = assignments[idx].occurrence_id.clone();
            let Some(&occurrence) = occurrence_by_id.get(&occurrence_id) else {
                continue;
            };
            let Some(&domain) = domain_by_id.get(&occurrence_id) else {
                continue;
            };

            let subslots_per_day = config.subslots_per_day();
            let local_start =
                assignments[idx].start_subslot - assignments[idx].day * subslots_per_day;
            if !in_undesirable_band(local_start, config) {
                continue;
            }

            let candidate = domain
                .start_day
                .iter()
                .filter(|&&(s, day)| {
                    day == assignments[idx].day
                        && !in_undesirable_band(s - day * subslots_per_day, config)
                })
                .find(|&&(s, day)| {
                    !conflicts_with_others(
                        occurrences,
                        &assignments,
                        idx,
                        occurrence,
                        day,
                        s,
                        &assignments[idx].room_id,
                        assignments[idx].instructor_id.as_ref(),
                    )
                });

            if let Some(&(new_start, new_day)) = candidate {
                assignments[idx].start_subslot = new_start;
                assignments[idx].day = new_day;
                moved_this_pass = true;
                moved_total += 1;
            }
        }

        if !moved_this_pass {
            break;
        }
    }

    debug!("advisory pass moved {moved_total} occurrence(s) into a preferred band");
    assignments
}

#[allow(clippy::too_many_arguments)]
fn conflicts_with_others(
    occurrences: &[SessionOccurrence],
    assignments: &[Assignment],
    moving_idx: usize,
    moving_occurrence: &SessionOccurrence,
    new_day: u32,
    new_start: u32,
    room_id: &crate::types::RoomId,
    instructor_id: Option<&crate::types::InstructorId>,
) -> bool {
    let occurrence_by_id: HashMap<&OccurrenceId, &SessionOccurrence> =
        occurrences.iter().map(|o| (&o.id, o)).collect();

    assignments
        .iter()
        .enumerate()
        .filter(|(other_idx, _)| *other_idx != moving_idx)
        .any(|(_, other)| {
            let Some(&other_occurrence) = occurrence_by_id.get(&other.occurrence_id) else {
                return false;
            };
            let same_room = other.room_id == *room_id;
            let same_instructor =
                instructor_id.is_some() && other.instructor_id.as_ref() == instructor_id;
            placements_conflict(
                moving_occurrence,
                new_day,
                new_start,
                other_occurrence,
                other.day,
                other.start_subslot,
                same_room,
                same_instructor,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cohort, CourseId, InstructorId, RoomId, SectionId, SessionKind};

    fn occurrence(id: &str) -> SessionOccurrence {
        SessionOccurrence {
            id: OccurrenceId::from(id),
            course_id: CourseId::from("c1"),
            kind: SessionKind::Lecture,
            cohort: Cohort::new([SectionId::from("s1")]),
            expected_students: 20,
            length_subslots: 2,
            sessions_per_week: 1,
            lab_type: None,
            has_instructor: true,
            ignore_capacity: false,
            repetition_index: 0,
            year: 1,
            group_id: None,
        }
    }

    #[test]
    fn moves_a_lone_occurrence_out_of_the_first_period() {
        let config = ScheduleConfig::default();
        let occ = occurrence("o1");
        let domain = OccurrenceDomain {
            occurrence_id: occ.id.clone(),
            starts: (0..config.total_subslots()).collect(),
            start_day: (0..config.total_subslots())
                .map(|s| (s, s / config.subslots_per_day()))
                .collect(),
            rooms: vec![RoomId::from("r1")],
            instructors: vec![InstructorId::from("i1")],
        };
        let assignment = Assignment {
            occurrence_id: occ.id.clone(),
            day: 0,
            start_subslot: 0,
            room_id: RoomId::from("r1"),
            instructor_id: Some(InstructorId::from("i1")),
        };

        let result =
            optimize_slot_preferences(&[occ], &[domain], &config, vec![assignment.clone()]);
        assert_ne!(result[0].start_subslot, assignment.start_subslot);
        let local = result[0].start_subslot - result[0].day * config.subslots_per_day();
        assert!(!in_undesirable_band(local, &config));
    }

    #[test]
    fn never_moves_into_a_conflict() {
        let config = ScheduleConfig::default();
        let a = occurrence("o1");
        let b = occurrence("o2");
        let subslots_per_day = config.subslots_per_day();
        let subslots_per_period = config.subslots_per_period();
        let preferred_start = subslots_per_period; // second period, in-bounds and preferred
        let domain_a = OccurrenceDomain {
            occurrence_id: a.id.clone(),
            starts: (0..subslots_per_day).collect(),
            start_day: (0..subslots_per_day).map(|s| (s, 0)).collect(),
            rooms: vec![RoomId::from("r1")],
            instructors: vec![InstructorId::from("i1")],
        };
        let domain_b = domain_a.clone();
        let assignment_a = Assignment {
            occurrence_id: a.id.clone(),
            day: 0,
            start_subslot: 0,
            room_id: RoomId::from("r1"),
            instructor_id: Some(InstructorId::from("i1")),
        };
        let assignment_b = Assignment {
            occurrence_id: b.id.clone(),
            day: 0,
            start_subslot: preferred_start,
            room_id: RoomId::from("r1"),
            instructor_id: Some(InstructorId::from("i1")),
        };

        let result = optimize_slot_preferences(
            &[a, b],
            &[domain_a, domain_b],
            &config,
            vec![assignment_a, assignment_b],
        );
        // o1 cannot move into o2's slot (shares the room); it must stay put.
        assert_eq!(result[0].start_subslot, 0);
    }
}
