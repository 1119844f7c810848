//! Result Extractor: turns internal assignments into the external
//! `ScheduleRecord` shape, one record per (occurrence, contained section).

use crate::catalog::Catalog;
use crate::types::{Assignment, ScheduleConfig, ScheduleRecord, SessionOccurrence};
use chrono::NaiveTime;
use std::collections::HashMap;

/// Renders the `"HH:MM-HH:MM"` wall-clock span for a sub-slot window,
/// derived from `day_start_clock` + `base_slot_minutes`.
fn time_slot_string(config: &ScheduleConfig, local_start_subslot: u32, length_subslots: u32) -> String {
    let start_of_day = NaiveTime::parse_from_str(&config.day_start_clock, "%H:%M")
        .unwrap_or_else(|_| NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    let offset_minutes = (local_start_subslot * config.base_slot_minutes) as i64;
    let duration_minutes = (length_subslots * config.base_slot_minutes) as i64;
    let start = start_of_day + chrono::Duration::minutes(offset_minutes);
    let end = start + chrono::Duration::minutes(duration_minutes);
    format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
}

fn extract_one(
    catalog: &Catalog,
    config: &ScheduleConfig,
    occurrence: &SessionOccurrence,
    assignment: &Assignment,
) -> Vec<ScheduleRecord> {
    let subslots_per_day = config.subslots_per_day();
    let subslots_per_period = config.subslots_per_period();
    let local_start = assignment.start_subslot - assignment.day * subslots_per_day;
    let start_period = local_start / subslots_per_period + 1;
    let start_subslot_in_period = local_start % subslots_per_period;
    let duration_periods =
        (occurrence.length_subslots + subslots_per_period - 1) / subslots_per_period;
    let duration_minutes = occurrence.length_subslots * config.base_slot_minutes;
    let time_slot = time_slot_string(config, local_start, occurrence.length_subslots);

    let room = catalog.room(&assignment.room_id);
    let room_type = room.map(|r| r.room_type).unwrap_or(crate::types::RoomType::Classroom);
    let building = room.map(|r| r.building.clone()).unwrap_or_default();

    occurrence
        .cohort
        .0
        .iter()
        .filter_map(|section_id| {
            let section = catalog.section(section_id)?;
            Some(ScheduleRecord {
                course_id: occurrence.course_id.clone(),
                kind: occurrence.kind,
                day: config.day_name(assignment.day).to_string(),
                start_period,
                start_subslot_in_period,
                duration_subslots: occurrence.length_subslots,
                duration_periods,
                duration_minutes,
                room_id: assignment.room_id.clone(),
                room_type,
                building: building.clone(),
                instructor_id: assignment.instructor_id.clone(),
                group_id: section.group_id.clone(),
                section_id: section_id.clone(),
                year: occurrence.year,
                lab_type: occurrence.lab_type,
                time_slot: time_slot.clone(),
            })
        })
        .collect()
}

/// Expands every assignment into one or more `ScheduleRecord`s, sorted into
/// a stable, reader-friendly order (day, start, course).
pub fn extract_records(
    catalog: &Catalog,
    config: &ScheduleConfig,
    occurrences: &[SessionOccurrence],
    assignments: &[Assignment],
) -> Vec<ScheduleRecord> {
    let by_occurrence: HashMap<_, _> = occurrences.iter().map(|o| (o.id.clone(), o)).collect();

    let mut records = Vec::new();
    for assignment in assignments {
        if let Some(occurrence) = by_occurrence.get(&assignment.occurrence_id) {
            records.extend(extract_one(catalog, config, occurrence, assignment));
        }
    }

    records.sort_by(|a, b| {
        (a.day.clone(), a.start_period, a.course_id.clone(), a.section_id.clone()).cmp(&(
            b.day.clone(),
            b.start_period,
            b.course_id.clone(),
            b.section_id.clone(),
        ))
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Cohort, Course, CourseId, CourseKind, Group, GroupId, OccurrenceId, Room, RoomId,
        RoomType, Section, SectionId, SessionKind,
    };

    fn fixture() -> (Catalog, ScheduleConfig, SessionOccurrence, Assignment) {
        let groups = vec![Group {
            id: GroupId::from("g1"),
            year: 1,
            specialization: None,
            students_count: 20,
        }];
        let sections = vec![Section {
            id: SectionId::from("s1"),
            group_id: GroupId::from("g1"),
            students_count: 20,
        }];
        let rooms = vec![Room {
            id: RoomId::from("r1"),
            room_type: RoomType::Classroom,
            capacity: 50,
            building: "Main".to_string(),
        }];
        let courses = vec![Course {
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
                sessions_per_week: Some(1),
                max_sections_together: 1,
                ignore_capacity: false,
            }],
        }];
        let (catalog, _) = Catalog::build(rooms, vec![], groups, sections, courses).unwrap();
        let config = ScheduleConfig::default();
        let occurrence = SessionOccurrence {
            id: OccurrenceId::from("o1"),
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
            group_id: Some(GroupId::from("g1")),
        };
        let assignment = Assignment {
            occurrence_id: OccurrenceId::from("o1"),
            day: 1,
            start_subslot: config.subslots_per_day() + 2,
            room_id: RoomId::from("r1"),
            instructor_id: None,
        };
        (catalog, config, occurrence, assignment)
    }

    #[test]
    fn produces_one_record_per_section_in_cohort() {
        let (catalog, config, occurrence, assignment) = fixture();
        let records = extract_one(&catalog, &config, &occurrence, &assignment);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].day, "Monday");
        assert_eq!(records[0].start_period, 2);
    }

    #[test]
    fn time_slot_reflects_day_start_and_offset() {
        let config = ScheduleConfig::default();
        let slot = time_slot_string(&config, 2, 2);
        assert_eq!(slot, "10:30-12:00");
    }
}
