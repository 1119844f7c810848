use super::{CourseId, GroupId, OccurrenceId, RoomType, SectionId, SessionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The sorted set of section ids that attend an occurrence together.
///
/// Stored as a `BTreeSet` so two cohorts compare equal regardless of
/// construction order and so conflict detection reduces to a set
/// intersection test.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cohort(pub BTreeSet<SectionId>);

impl Cohort {
    pub fn new(sections: impl IntoIterator<Item = SectionId>) -> Self {
        Self(sections.into_iter().collect())
    }

    pub fn shares_students_with(&self, other: &Cohort) -> bool {
        self.0.intersection(&other.0).next().is_some()
    }

    /// A short, stable identifier derived from the member sections, used for
    /// deterministic occurrence ordering.
    pub fn sort_key(&self) -> String {
        self.0
            .iter()
            .map(|s| s.0.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sort_key())
    }
}

/// An atomic placement unit: one (course, kind, cohort, repetition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOccurrence {
    pub id: OccurrenceId,
    pub course_id: CourseId,
    pub kind: SessionKind,
    pub cohort: Cohort,
    pub expected_students: u32,
    /// Length in sub-slots (already converted from minutes).
    pub length_subslots: u32,
    pub sessions_per_week: u32,
    pub lab_type: Option<RoomType>,
    pub has_instructor: bool,
    pub ignore_capacity: bool,
    /// Which repetition (0-based) of `sessions_per_week` this occurrence is.
    pub repetition_index: u32,
    /// Year of the owning course, retained for deterministic ordering.
    pub year: u32,
    /// The single eligible group this occurrence was generated for, when one
    /// exists (Project occurrences; used by the Project-grouping hard
    /// constraint). `None` for full-year occurrences whose cohort spans
    /// multiple groups.
    pub group_id: Option<GroupId>,
}
