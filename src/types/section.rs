use super::{GroupId, SectionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub group_id: GroupId,
    #[serde(default)]
    pub students_count: u32,
}
