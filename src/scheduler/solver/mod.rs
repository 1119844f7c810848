//! Solver: two interchangeable strategies over the same contract.

mod backtracking;
mod constraint_model;

pub use backtracking::solve_backtracking;
pub use constraint_model::solve_constraint_model;

use crate::scheduler::domain::OccurrenceDomain;
use crate::types::{Assignment, OccurrenceId, ScheduleConfig, SessionOccurrence, Strategy};
use std::time::{Duration, Instant};

/// Everything a solver strategy needs: the occurrences to place, their
/// precomputed domains (same order as `occurrences`), and the active config.
pub struct SolverInput<'a> {
    pub occurrences: &'a [SessionOccurrence],
    pub domains: &'a [OccurrenceDomain],
    pub config: &'a ScheduleConfig,
    pub deadline: Instant,
}

/// The result of a solve attempt.
#[derive(Debug, Clone)]
pub enum SolverOutcome {
    /// Every occurrence was placed.
    Scheduled(Vec<Assignment>),
    /// The deadline expired; carries the best complete assignment found so
    /// far, which may be empty.
    TimedOut(Vec<Assignment>),
    /// Pre-check passed but no assignment exists; carries the occurrences
    /// that could not be placed, when derivable.
    Unscheduled(Vec<OccurrenceId>),
}

pub fn solve(input: SolverInput<'_>, strategy: Strategy) -> SolverOutcome {
    match strategy {
        Strategy::Constraint => solve_constraint_model(input),
        Strategy::BacktrackSection | Strategy::BacktrackCourse => {
            let by_course = matches!(strategy, Strategy::BacktrackCourse);
            solve_backtracking(input, by_course)
        }
    }
}

pub fn deadline_from(max_time_seconds: u64) -> Instant {
    Instant::now() + Duration::from_secs(max_time_seconds)
}

/// True when two occurrences occupying the given placements would conflict:
/// same room, same instructor, or shared students, with overlapping
/// sub-slot intervals on the same day.
#[allow(clippy::too_many_arguments)]
pub fn placements_conflict(
    a: &SessionOccurrence,
    a_day: u32,
    a_start: u32,
    b: &SessionOccurrence,
    b_day: u32,
    b_start: u32,
    same_room: bool,
    same_instructor: bool,
) -> bool {
    if a_day != b_day {
        return false;
    }
    let overlap = intervals_overlap(
        a_start,
        a.length_subslots,
        b_start,
        b.length_subslots,
    );
    if !overlap {
        return false;
    }
    same_room || same_instructor || a.cohort.shares_students_with(&b.cohort)
}

pub fn intervals_overlap(a_start: u32, a_len: u32, b_start: u32, b_len: u32) -> bool {
    a_start < b_start + b_len && b_start < a_start + a_len
}
