use super::{CourseId, RoomType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    Lecture,
    Tut,
    Lab,
    Project,
}

impl SessionKind {
    /// Required instructor role for this session kind, or `None` for kinds
    /// that never carry an instructor (Project).
    pub fn required_role(&self) -> Option<super::Role> {
        match self {
            SessionKind::Lecture => Some(super::Role::Professor),
            SessionKind::Tut | SessionKind::Lab => Some(super::Role::Ta),
            SessionKind::Project => None,
        }
    }
}

/// One teaching-format entry of a [`Course`] (a course may declare a Lecture,
/// a Tut, and a Lab all at once).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseKind {
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub length_minutes: u32,
    #[serde(default)]
    pub lab_type: Option<RoomType>,
    #[serde(default)]
    pub sessions_per_week: Option<u32>,
    #[serde(default = "default_max_sections_together")]
    pub max_sections_together: u32,
    #[serde(default)]
    pub ignore_capacity: bool,
}

fn default_max_sections_together() -> u32 {
    1
}

impl CourseKind {
    /// Resolve the declared-or-defaulted weekly session count.
    pub fn resolved_sessions_per_week(&self) -> u32 {
        self.sessions_per_week.unwrap_or(match self.kind {
            SessionKind::Lecture => 2,
            SessionKind::Tut | SessionKind::Lab | SessionKind::Project => 1,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    #[serde(default)]
    pub name: String,
    pub year: u32,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub is_project: bool,
    #[serde(default)]
    pub full_year: bool,
    pub kinds: Vec<CourseKind>,
}
