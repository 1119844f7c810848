use super::RoomId;
use serde::{Deserialize, Serialize};

/// The kinds of physical room the catalog distinguishes.
///
/// Wire format uses the space-separated names from the source data
/// (`"computer lab"`, not `"computer_lab"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Classroom,
    Theater,
    #[serde(rename = "computer lab")]
    ComputerLab,
    #[serde(rename = "electronics lab")]
    ElectronicsLab,
    #[serde(rename = "physics lab")]
    PhysicsLab,
    #[serde(rename = "chemistry lab")]
    ChemistryLab,
    #[serde(rename = "bio lab")]
    BioLab,
}

impl RoomType {
    /// Room types admissible for a given session type.
    pub fn admissible_for(session: super::SessionKind) -> &'static [RoomType] {
        use RoomType::*;
        match session {
            super::SessionKind::Lecture => &[Classroom, Theater],
            super::SessionKind::Tut => &[Classroom, ComputerLab],
            super::SessionKind::Lab => &[
                ComputerLab,
                ElectronicsLab,
                PhysicsLab,
                ChemistryLab,
                BioLab,
            ],
            super::SessionKind::Project => &[Theater, Classroom],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
    #[serde(default)]
    pub building: String,
}
