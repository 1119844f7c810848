use super::{CourseId, GroupId, InstructorId, OccurrenceId, RoomId, RoomType, SectionId, SessionKind};
use serde::{Deserialize, Serialize};

/// Top-level call status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SolveStatus {
    Success,
    InputError,
    Infeasible,
    Timeout,
}

/// One flattened schedule entry: one record per (occurrence, contained
/// section) as produced by the Result Extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub course_id: CourseId,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub day: String,
    pub start_period: u32,
    pub start_subslot_in_period: u32,
    pub duration_subslots: u32,
    pub duration_periods: u32,
    pub duration_minutes: u32,
    pub room_id: RoomId,
    pub room_type: RoomType,
    pub building: String,
    pub instructor_id: Option<InstructorId>,
    pub group_id: GroupId,
    pub section_id: SectionId,
    pub year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_type: Option<RoomType>,
    pub time_slot: String,
}

/// A pre-check or structural input problem, naming the offending occurrence
/// or entity where possible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputErrorEntry {
    pub occurrence_id: Option<OccurrenceId>,
    pub message: String,
}

/// The full external-facing result of a solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub status: SolveStatus,
    pub solve_time_seconds: f64,
    pub total_sessions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<ScheduleRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<InputErrorEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unscheduled: Vec<OccurrenceId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
