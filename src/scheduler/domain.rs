//! Domain Builder: the explicit start/room/instructor domains per
//! occurrence.

use crate::scheduler::feasibility::Candidates;
use crate::types::{InstructorId, OccurrenceId, RoomId, ScheduleConfig, SessionOccurrence};
use std::collections::HashMap;

/// Explicit domains for one occurrence, plus the precomputed `(start, day)`
/// pair table the solver uses to link the two.
#[derive(Debug, Clone)]
pub struct OccurrenceDomain {
    pub occurrence_id: OccurrenceId,
    pub starts: Vec<u32>,
    pub start_day: Vec<(u32, u32)>,
    pub rooms: Vec<RoomId>,
    pub instructors: Vec<InstructorId>,
}

/// Enumerate valid start sub-slots for an occurrence of length `length`
/// sub-slots under `config`: no cross-day spans, and sessions of two
/// or more sub-slots must start on an even (period-aligned) index.
pub fn start_domain(length_subslots: u32, config: &ScheduleConfig) -> Vec<(u32, u32)> {
    let subslots_per_day = config.subslots_per_day();
    let total = config.total_subslots();
    let mut pairs = Vec::new();

    for s in 0..total {
        let day = s / subslots_per_day;
        let end_day = (s + length_subslots - 1) / subslots_per_day;
        if day != end_day {
            continue;
        }
        if length_subslots >= 2 && s % 2 != 0 {
            continue;
        }
        pairs.push((s, day));
    }
    pairs
}

pub fn build_domains(
    occurrences: &[SessionOccurrence],
    candidates: &HashMap<OccurrenceId, Candidates>,
    config: &ScheduleConfig,
) -> Vec<OccurrenceDomain> {
    occurrences
        .iter()
        .map(|occurrence| {
            let start_day = start_domain(occurrence.length_subslots, config);
            let starts = start_day.iter().map(|(s, _)| *s).collect();
            let candidates = candidates.get(&occurrence.id).cloned().unwrap_or_default();
            OccurrenceDomain {
                occurrence_id: occurrence.id.clone(),
                starts,
                start_day,
                rooms: candidates.rooms,
                instructors: candidates.instructors,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ninety_minute_session_only_starts_on_even_subslots() {
        let config = ScheduleConfig::default();
        let pairs = start_domain(2, &config);
        assert!(pairs.iter().all(|(s, _)| s % 2 == 0));
    }

    #[test]
    fn forty_five_minute_session_may_start_anywhere_within_day() {
        let config = ScheduleConfig::default();
        let pairs = start_domain(1, &config);
        // subslots_per_day - 0 valid starts (length 1 fits anywhere in-day)
        assert_eq!(pairs.len() as u32, config.total_subslots());
    }

    #[test]
    fn no_start_crosses_a_day_boundary() {
        let config = ScheduleConfig::default();
        let length = config.subslots_per_day();
        let pairs = start_domain(length, &config);
        // only one feasible start per day: the day's first sub-slot
        assert_eq!(pairs.len() as u32, config.days);
        for (s, day) in &pairs {
            assert_eq!(*s, day * config.subslots_per_day());
        }
    }

    #[test]
    fn day_is_determined_by_start() {
        let config = ScheduleConfig::default();
        for (s, day) in start_domain(2, &config) {
            assert_eq!(day, s / config.subslots_per_day());
        }
    }
}
