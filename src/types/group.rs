use super::GroupId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub year: u32,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub students_count: u32,
}

impl Group {
    /// True when a course open to `major` (None = every specialization) applies to this group.
    pub fn matches_major(&self, major: Option<&str>) -> bool {
        match major {
            None => true,
            Some(m) => self.specialization.as_deref() == Some(m),
        }
    }
}
