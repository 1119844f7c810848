use crate::types::OccurrenceId;
use thiserror::Error;

/// Domain-specific errors for the scheduler.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate ID found: {id_type} '{id}'")]
    DuplicateId { id_type: String, id: String },

    #[error("Section '{section_id}' references unknown group '{group_id}'")]
    UnknownGroup {
        section_id: String,
        group_id: String,
    },

    #[error("CourseKind '{course_id}'/{kind:?} has length {length_minutes} min, not a multiple of the {base_slot_minutes}-minute sub-slot")]
    UnalignedLength {
        course_id: String,
        kind: String,
        length_minutes: u32,
        base_slot_minutes: u32,
    },

    #[error("Course '{course_id}' declares a Lab kind with no lab_type")]
    MissingLabType { course_id: String },

    #[error("Occurrence '{occurrence_id}' has an empty {domain} domain")]
    EmptyDomain {
        occurrence_id: OccurrenceId,
        domain: String,
    },

    #[error("No feasible solution found")]
    Infeasible { unscheduled: Vec<OccurrenceId> },

    #[error("Solver timeout after {seconds} seconds")]
    Timeout {
        seconds: u64,
        unscheduled: Vec<OccurrenceId>,
    },

    #[error("Internal solver error: {0}")]
    Internal(String),
}

/// Use anyhow::Result at application boundaries.
pub type Result<T> = anyhow::Result<T>;
