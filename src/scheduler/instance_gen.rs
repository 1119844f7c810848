//! Instance Generator: expands courses into atomic session occurrences.

use crate::catalog::Catalog;
use crate::error::{Result, SchedulerError};
use crate::types::{
    Cohort, Course, CourseKind, Group, OccurrenceId, ScheduleConfig, SessionKind,
    SessionOccurrence,
};
use log::debug;

pub fn generate_instances(
    catalog: &Catalog,
    config: &ScheduleConfig,
) -> Result<Vec<SessionOccurrence>> {
    let mut occurrences = Vec::new();

    for course in catalog.courses() {
        let mut eligible = catalog.eligible_groups(course);
        eligible.sort_by(|a, b| a.id.cmp(&b.id));

        for kind in &course.kinds {
            let subslots = config.length_to_subslots(kind.length_minutes).ok_or_else(|| {
                SchedulerError::UnalignedLength {
                    course_id: course.id.to_string(),
                    kind: format!("{:?}", kind.kind),
                    length_minutes: kind.length_minutes,
                    base_slot_minutes: config.base_slot_minutes,
                }
            })?;

            let mut made = generate_for_kind(catalog, course, kind, &eligible, subslots, config)?;
            occurrences.append(&mut made);
        }
    }

    occurrences.sort_by(|a, b| {
        (a.year, &a.course_id, a.kind, a.cohort.sort_key(), a.repetition_index).cmp(&(
            b.year,
            &b.course_id,
            b.kind,
            b.cohort.sort_key(),
            b.repetition_index,
        ))
    });

    debug!("generated {} occurrences", occurrences.len());
    Ok(occurrences)
}

fn generate_for_kind(
    catalog: &Catalog,
    course: &Course,
    kind: &CourseKind,
    eligible: &[&Group],
    subslots: u32,
    config: &ScheduleConfig,
) -> Result<Vec<SessionOccurrence>> {
    if course.is_project {
        return Ok(project_occurrences(catalog, course, kind, eligible, config));
    }

    if course.full_year && matches!(kind.kind, SessionKind::Lecture | SessionKind::Lab) {
        return Ok(full_year_occurrence(catalog, course, kind, eligible, subslots));
    }

    match kind.kind {
        SessionKind::Lecture => Ok(lecture_occurrences(catalog, course, kind, eligible, subslots)),
        SessionKind::Tut => Ok(tut_occurrences(catalog, course, kind, eligible, subslots)),
        SessionKind::Lab => Ok(lab_occurrences(catalog, course, kind, eligible, subslots)),
        SessionKind::Project => Ok(project_occurrences(catalog, course, kind, eligible, config)),
    }
}

fn occurrence_id(course: &Course, kind: &CourseKind, cohort: &Cohort, repetition_index: u32) -> OccurrenceId {
    OccurrenceId::from(format!(
        "{}:{:?}:{}:{}",
        course.id, kind.kind, cohort.sort_key(), repetition_index
    ).as_str())
}

fn lecture_occurrences(
    catalog: &Catalog,
    course: &Course,
    kind: &CourseKind,
    eligible: &[&Group],
    subslots: u32,
) -> Vec<SessionOccurrence> {
    let sessions_per_week = kind.resolved_sessions_per_week();
    let mut out = Vec::new();
    for group in eligible {
        let mut section_ids = catalog.sections_of_group(&group.id).to_vec();
        section_ids.sort();
        let cohort = Cohort::new(section_ids);
        for rep in 0..sessions_per_week {
            out.push(SessionOccurrence {
                id: occurrence_id(course, kind, &cohort, rep),
                course_id: course.id.clone(),
                kind: kind.kind,
                cohort: cohort.clone(),
                expected_students: group.students_count,
                length_subslots: subslots,
                sessions_per_week,
                lab_type: kind.lab_type,
                has_instructor: true,
                ignore_capacity: kind.ignore_capacity,
                repetition_index: rep,
                year: course.year,
                group_id: Some(group.id.clone()),
            });
        }
    }
    out
}

fn tut_occurrences(
    catalog: &Catalog,
    course: &Course,
    kind: &CourseKind,
    eligible: &[&Group],
    subslots: u32,
) -> Vec<SessionOccurrence> {
    let sessions_per_week = kind.resolved_sessions_per_week();
    let mut out = Vec::new();
    for group in eligible {
        let mut section_ids = catalog.sections_of_group(&group.id).to_vec();
        section_ids.sort();
        for section_id in section_ids {
            let section = catalog.section(&section_id).expect("indexed section");
            let cohort = Cohort::new([section_id.clone()]);
            for rep in 0..sessions_per_week {
                out.push(SessionOccurrence {
                    id: occurrence_id(course, kind, &cohort, rep),
                    course_id: course.id.clone(),
                    kind: kind.kind,
                    cohort: cohort.clone(),
                    expected_students: section.students_count,
                    length_subslots: subslots,
                    sessions_per_week,
                    lab_type: kind.lab_type,
                    has_instructor: true,
                    ignore_capacity: kind.ignore_capacity,
                    repetition_index: rep,
                    year: course.year,
                    group_id: Some(group.id.clone()),
                });
            }
        }
    }
    out
}

fn lab_occurrences(
    catalog: &Catalog,
    course: &Course,
    kind: &CourseKind,
    eligible: &[&Group],
    subslots: u32,
) -> Vec<SessionOccurrence> {
    let sessions_per_week = kind.resolved_sessions_per_week();
    let bundle_size = kind.max_sections_together.max(1) as usize;
    let mut out = Vec::new();
    for group in eligible {
        let mut section_ids = catalog.sections_of_group(&group.id).to_vec();
        section_ids.sort();
        for bundle in section_ids.chunks(bundle_size) {
            let expected: u32 = bundle
                .iter()
                .filter_map(|id| catalog.section(id))
                .map(|s| s.students_count)
                .sum();
            let cohort = Cohort::new(bundle.iter().cloned());
            for rep in 0..sessions_per_week {
                out.push(SessionOccurrence {
                    id: occurrence_id(course, kind, &cohort, rep),
                    course_id: course.id.clone(),
                    kind: kind.kind,
                    cohort: cohort.clone(),
                    expected_students: expected,
                    length_subslots: subslots,
                    sessions_per_week,
                    lab_type: kind.lab_type,
                    has_instructor: true,
                    ignore_capacity: kind.ignore_capacity,
                    repetition_index: rep,
                    year: course.year,
                    group_id: Some(group.id.clone()),
                });
            }
        }
    }
    out
}

/// Project kind: length coerced to a full day regardless of declared value,
/// one occurrence per eligible group, `sessions_per_week = 1`, no instructor.
fn project_occurrences(
    catalog: &Catalog,
    course: &Course,
    kind: &CourseKind,
    eligible: &[&Group],
    config: &ScheduleConfig,
) -> Vec<SessionOccurrence> {
    let full_day_subslots = config.subslots_per_day();
    let mut out = Vec::new();
    for group in eligible {
        let mut section_ids = catalog.sections_of_group(&group.id).to_vec();
        section_ids.sort();
        let cohort = Cohort::new(section_ids);
        out.push(SessionOccurrence {
            id: occurrence_id(course, kind, &cohort, 0),
            course_id: course.id.clone(),
            kind: kind.kind,
            cohort,
            expected_students: group.students_count,
            length_subslots: full_day_subslots,
            sessions_per_week: 1,
            lab_type: kind.lab_type,
            has_instructor: false,
            ignore_capacity: kind.ignore_capacity,
            repetition_index: 0,
            year: course.year,
            group_id: Some(group.id.clone()),
        });
    }
    out
}

/// A single occurrence per kind whose cohort spans every section of every
/// eligible group for the course's year (the `full_year` rule).
fn full_year_occurrence(
    catalog: &Catalog,
    course: &Course,
    kind: &CourseKind,
    eligible: &[&Group],
    subslots: u32,
) -> Vec<SessionOccurrence> {
    let sessions_per_week = kind.resolved_sessions_per_week();
    let mut sections: Vec<_> = eligible
        .iter()
        .flat_map(|g| catalog.sections_of_group(&g.id).to_vec())
        .collect();
    sections.sort();
    sections.dedup();
    let expected_students: u32 = eligible.iter().map(|g| g.students_count).sum();
    let cohort = Cohort::new(sections);

    vec![SessionOccurrence {
        id: occurrence_id(course, kind, &cohort, 0),
        course_id: course.id.clone(),
        kind: kind.kind,
        cohort,
        expected_students,
        length_subslots: subslots,
        sessions_per_week,
        lab_type: kind.lab_type,
        has_instructor: true,
        ignore_capacity: kind.ignore_capacity,
        repetition_index: 0,
        year: course.year,
        group_id: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Group, GroupId, Section, SectionId};

    fn minimal_catalog() -> Catalog {
        let group = Group {
            id: GroupId::from("g1"),
            year: 1,
            specialization: None,
            students_count: 40,
        };
        let sections = vec![
            Section {
                id: SectionId::from("s1"),
                group_id: GroupId::from("g1"),
                students_count: 20,
            },
            Section {
                id: SectionId::from("s2"),
                group_id: GroupId::from("g1"),
                students_count: 20,
            },
        ];
        let course = Course {
            id: crate::types::CourseId::from("c1"),
            name: "Intro".to_string(),
            year: 1,
            major: None,
            is_project: false,
            full_year: false,
            kinds: vec![
                CourseKind {
                    kind: SessionKind::Lecture,
                    length_minutes: 90,
                    lab_type: None,
                    sessions_per_week: None,
                    max_sections_together: 1,
                    ignore_capacity: false,
                },
                CourseKind {
                    kind: SessionKind::Tut,
                    length_minutes: 45,
                    lab_type: None,
                    sessions_per_week: None,
                    max_sections_together: 1,
                    ignore_capacity: false,
                },
            ],
        };
        Catalog::build(vec![], vec![], vec![group], sections, vec![course])
            .unwrap()
            .0
    }

    #[test]
    fn lecture_repeats_default_twice_tut_once_per_section() {
        let catalog = minimal_catalog();
        let config = ScheduleConfig::default();
        let occurrences = generate_instances(&catalog, &config).unwrap();

        let lectures: Vec<_> = occurrences
            .iter()
            .filter(|o| o.kind == SessionKind::Lecture)
            .collect();
        let tuts: Vec<_> = occurrences
            .iter()
            .filter(|o| o.kind == SessionKind::Tut)
            .collect();

        assert_eq!(lectures.len(), 2);
        assert_eq!(tuts.len(), 2);
        assert!(lectures.iter().all(|o| o.cohort.0.len() == 2));
        assert!(tuts.iter().all(|o| o.cohort.0.len() == 1));
    }

    #[test]
    fn ordering_is_deterministic() {
        let catalog = minimal_catalog();
        let config = ScheduleConfig::default();
        let first = generate_instances(&catalog, &config).unwrap();
        let second = generate_instances(&catalog, &config).unwrap();
        let first_ids: Vec<_> = first.iter().map(|o| o.id.clone()).collect();
        let second_ids: Vec<_> = second.iter().map(|o| o.id.clone()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn unaligned_length_is_fatal() {
        let mut catalog_inputs = (vec![], vec![], vec![], vec![], vec![]);
        let course = Course {
            id: crate::types::CourseId::from("bad"),
            name: String::new(),
            year: 1,
            major: None,
            is_project: false,
            full_year: false,
            kinds: vec![CourseKind {
                kind: SessionKind::Lecture,
                length_minutes: 50,
                lab_type: None,
                sessions_per_week: None,
                max_sections_together: 1,
                ignore_capacity: false,
            }],
        };
        catalog_inputs.4.push(course);
        let (catalog, _) = Catalog::build(
            catalog_inputs.0,
            catalog_inputs.1,
            catalog_inputs.2,
            catalog_inputs.3,
            catalog_inputs.4,
        )
        .unwrap();
        let config = ScheduleConfig::default();
        assert!(generate_instances(&catalog, &config).is_err());
    }
}
