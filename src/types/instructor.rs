use super::{CourseId, InstructorId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Professor,
    #[serde(rename = "TA")]
    Ta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    pub id: InstructorId,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub qualified_courses: HashSet<CourseId>,
}

impl Instructor {
    pub fn qualified_for(&self, course_id: &CourseId) -> bool {
        self.qualified_courses.contains(course_id)
    }
}
