//! Normalized, read-only in-memory view over the raw input entities.

use crate::error::{Result, SchedulerError};
use crate::types::{
    Course, CourseId, Group, GroupId, Instructor, InstructorId, Room, RoomId, SessionKind,
    Section, SectionId,
};
use std::collections::HashMap;

/// Built once per solve and never mutated afterwards. Every lookup is by
/// reference into the owned vectors, mirroring the teacher's
/// `section_index_map` pattern.
#[derive(Debug)]
pub struct Catalog {
    rooms: Vec<Room>,
    instructors: Vec<Instructor>,
    groups: Vec<Group>,
    sections: Vec<Section>,
    courses: Vec<Course>,

    room_index: HashMap<RoomId, usize>,
    instructor_index: HashMap<InstructorId, usize>,
    group_index: HashMap<GroupId, usize>,
    section_index: HashMap<SectionId, usize>,
    course_index: HashMap<CourseId, usize>,

    /// Sections owned by each group, in declaration order.
    sections_by_group: HashMap<GroupId, Vec<SectionId>>,
}

/// Non-fatal observations collected alongside a successfully built catalog.
#[derive(Debug, Default, Clone)]
pub struct CatalogWarnings {
    pub messages: Vec<String>,
}

impl Catalog {
    pub fn build(
        rooms: Vec<Room>,
        instructors: Vec<Instructor>,
        groups: Vec<Group>,
        sections: Vec<Section>,
        courses: Vec<Course>,
    ) -> Result<(Catalog, CatalogWarnings)> {
        let mut errors = Vec::new();
        let mut warnings = CatalogWarnings::default();

        let room_index = index_unique(&rooms, |r| &r.id, "room", &mut errors);
        let instructor_index = index_unique(&instructors, |i| &i.id, "instructor", &mut errors);
        let group_index = index_unique(&groups, |g| &g.id, "group", &mut errors);
        let section_index = index_unique(&sections, |s| &s.id, "section", &mut errors);
        let course_index = index_unique(&courses, |c| &c.id, "course", &mut errors);

        let mut sections_by_group: HashMap<GroupId, Vec<SectionId>> = HashMap::new();
        for section in &sections {
            if group_index.contains_key(&section.group_id) {
                sections_by_group
                    .entry(section.group_id.clone())
                    .or_default()
                    .push(section.id.clone());
            } else {
                errors.push(format!(
                    "section '{}' references unknown group '{}'",
                    section.id, section.group_id
                ));
            }
        }

        let course_ids: std::collections::HashSet<&CourseId> =
            courses.iter().map(|c| &c.id).collect();
        for instructor in &instructors {
            for course_id in &instructor.qualified_courses {
                if !course_ids.contains(course_id) {
                    warnings.messages.push(format!(
                        "instructor '{}' lists unknown course '{}' in qualified_courses",
                        instructor.id, course_id
                    ));
                }
            }
        }

        for course in &courses {
            for kind in &course.kinds {
                if kind.kind == SessionKind::Lab && kind.lab_type.is_none() {
                    errors.push(format!(
                        "course '{}' declares a Lab kind with no lab_type",
                        course.id
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(SchedulerError::InvalidInput(errors.join("; ")).into());
        }

        Ok((
            Catalog {
                rooms,
                instructors,
                groups,
                sections,
                courses,
                room_index,
                instructor_index,
                group_index,
                section_index,
                course_index,
                sections_by_group,
            },
            warnings,
        ))
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.room_index.get(id).map(|&i| &self.rooms[i])
    }

    pub fn instructor(&self, id: &InstructorId) -> Option<&Instructor> {
        self.instructor_index.get(id).map(|&i| &self.instructors[i])
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.group_index.get(id).map(|&i| &self.groups[i])
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.section_index.get(id).map(|&i| &self.sections[i])
    }

    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.course_index.get(id).map(|&i| &self.courses[i])
    }

    /// Sections owned by a group, in the order they were declared in the
    /// input (callers that need a stable bundle order sort the returned ids
    /// themselves; `SectionId` is `Ord`).
    pub fn sections_of_group(&self, group_id: &GroupId) -> &[SectionId] {
        self.sections_by_group
            .get(group_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Groups matching a course's year and (major-is-null-or-matching) rule.
    pub fn eligible_groups(&self, course: &Course) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|g| g.year == course.year && g.matches_major(course.major.as_deref()))
            .collect()
    }
}

fn index_unique<T, F>(
    items: &[T],
    key: F,
    label: &str,
    errors: &mut Vec<String>,
) -> HashMap<T::Id, usize>
where
    F: Fn(&T) -> &T::Id,
    T: HasId,
{
    let mut map = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        let id = key(item).clone();
        if map.insert(id.clone(), i).is_some() {
            errors.push(format!("duplicate {label} id '{id}'"));
        }
    }
    map
}

/// Minimal bound so `index_unique` can be written once for every entity kind.
trait HasId {
    type Id: std::hash::Hash + Eq + Clone + std::fmt::Display;
}

impl HasId for Room {
    type Id = RoomId;
}
impl HasId for Instructor {
    type Id = InstructorId;
}
impl HasId for Group {
    type Id = GroupId;
}
impl HasId for Section {
    type Id = SectionId;
}
impl HasId for Course {
    type Id = CourseId;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseKind, Role};

    fn room(id: &str) -> Room {
        Room {
            id: RoomId::from(id),
            room_type: crate::types::RoomType::Classroom,
            capacity: 50,
            building: String::new(),
        }
    }

    #[test]
    fn rejects_dangling_section_group() {
        let sections = vec![Section {
            id: SectionId::from("s1"),
            group_id: GroupId::from("missing"),
            students_count: 20,
        }];
        let result = Catalog::build(vec![], vec![], vec![], sections, vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_lab_without_lab_type() {
        let course = Course {
            id: CourseId::from("c1"),
            name: String::new(),
            year: 1,
            major: None,
            is_project: false,
            full_year: false,
            kinds: vec![CourseKind {
                kind: SessionKind::Lab,
                length_minutes: 90,
                lab_type: None,
                sessions_per_week: None,
                max_sections_together: 1,
                ignore_capacity: false,
            }],
        };
        let result = Catalog::build(vec![], vec![], vec![], vec![], vec![course]);
        assert!(result.is_err());
    }

    #[test]
    fn warns_on_unknown_qualification() {
        let instructor = Instructor {
            id: InstructorId::from("i1"),
            name: String::new(),
            role: Role::Professor,
            qualified_courses: [CourseId::from("ghost")].into_iter().collect(),
        };
        let (_catalog, warnings) =
            Catalog::build(vec![room("r1")], vec![instructor], vec![], vec![], vec![]).unwrap();
        assert_eq!(warnings.messages.len(), 1);
    }
}
