use super::{InstructorId, OccurrenceId, RoomId};
use serde::{Deserialize, Serialize};

/// A placement of one [`SessionOccurrence`](super::SessionOccurrence).
///
/// Created only when a consistent placement exists; removed on backtrack.
/// Its lifetime is bounded by the search frame that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub occurrence_id: OccurrenceId,
    pub day: u32,
    pub start_subslot: u32,
    pub room_id: RoomId,
    pub instructor_id: Option<InstructorId>,
}
