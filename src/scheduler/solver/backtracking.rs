//! Strategy B: hand-rolled backtracking with forward checking, a
//! course-by-course constructive search over the same placement contract
//! as the constraint model.

use super::{SolverInput, SolverOutcome};
use crate::types::{Assignment, InstructorId, OccurrenceId, RoomId, SectionId};
use log::{debug, info};
use std::collections::HashMap;
use std::time::Instant;

/// A fixed-size bit vector indexed by `resource_index * day_count * subslots_per_day
/// + day * subslots_per_day + subslot`.
struct Bitset {
    bits: Vec<bool>,
    subslots_per_day: u32,
    days: u32,
}

impl Bitset {
    fn new(resource_count: usize, days: u32, subslots_per_day: u32) -> Self {
        Self {
            bits: vec![false; resource_count * (days as usize) * (subslots_per_day as usize)],
            subslots_per_day,
            days,
        }
    }

    fn index(&self, resource: usize, day: u32, subslot: u32) -> usize {
        resource * (self.days as usize) * (self.subslots_per_day as usize)
            + (day as usize) * (self.subslots_per_day as usize)
            + subslot as usize
    }

    fn any_set(&self, resource: usize, day: u32, start: u32, len: u32) -> bool {
        (start..start + len).any(|s| self.bits[self.index(resource, day, s)])
    }

    fn set_range(&mut self, resource: usize, day: u32, start: u32, len: u32, value: bool) {
        for s in start..start + len {
            let idx = self.index(resource, day, s);
            self.bits[idx] = value;
        }
    }
}

fn build_index<T: Clone + Eq + std::hash::Hash + Ord>(values: impl Iterator<Item = T>) -> (Vec<T>, HashMap<T, usize>) {
    let mut unique: Vec<T> = values.collect();
    unique.sort();
    unique.dedup();
    let index = unique
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, v)| (v, i))
        .collect();
    (unique, index)
}

/// Determine the search order: by occurrence (course-major, the order
/// occurrences were generated in) or by section (group all of a section's
/// occurrences together before moving to the next section).
fn search_order(input: &SolverInput<'_>, by_course: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..input.occurrences.len()).collect();
    if by_course {
        return order;
    }
    order.sort_by(|&a, &b| {
        let key = |i: usize| {
            let occ = &input.occurrences[i];
            (
                occ.cohort.0.iter().next().cloned(),
                occ.course_id.clone(),
                occ.kind,
                occ.cohort.sort_key(),
                occ.repetition_index,
            )
        };
        key(a).cmp(&key(b))
    });
    order
}

pub fn solve_backtracking(input: SolverInput<'_>, by_course: bool) -> SolverOutcome {
    let order = search_order(&input, by_course);

    let (_sections, section_index) = build_index(
        input
            .occurrences
            .iter()
            .flat_map(|o| o.cohort.0.iter().cloned()),
    );
    let (_instructors, instructor_index) = build_index::<InstructorId>(
        input.domains.iter().flat_map(|d| d.instructors.iter().cloned()),
    );
    let (_rooms, room_index) =
        build_index::<RoomId>(input.domains.iter().flat_map(|d| d.rooms.iter().cloned()));

    let days = input.config.days;
    let subslots_per_day = input.config.subslots_per_day();

    let mut search = Search {
        input: &input,
        order,
        section_index,
        instructor_index,
        room_index,
        section_busy: Bitset::new(section_count(&_sections), days, subslots_per_day),
        instructor_busy: Bitset::new(_instructors.len(), days, subslots_per_day),
        room_busy: Bitset::new(_rooms.len(), days, subslots_per_day),
        assignments: vec![None; input.occurrences.len()],
        project_day_by_group: HashMap::new(),
        attempts: 0,
        backtracks: 0,
        timed_out: false,
    };

    let solved = search.solve(0);
    info!(
        "backtracking solve finished: solved={} attempts={} backtracks={}",
        solved, search.attempts, search.backtracks
    );

    if solved {
        SolverOutcome::Scheduled(search.assignments.into_iter().flatten().collect())
    } else if search.timed_out {
        SolverOutcome::TimedOut(search.assignments.into_iter().flatten().collect())
    } else {
        let unscheduled: Vec<OccurrenceId> = search
            .assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_none())
            .map(|(i, _)| input.occurrences[i].id.clone())
            .collect();
        SolverOutcome::Unscheduled(unscheduled)
    }
}

fn section_count(sections: &[SectionId]) -> usize {
    sections.len()
}

struct Search<'a> {
    input: &'a SolverInput<'a>,
    order: Vec<usize>,
    section_index: HashMap<SectionId, usize>,
    instructor_index: HashMap<InstructorId, usize>,
    room_index: HashMap<RoomId, usize>,
    section_busy: Bitset,
    instructor_busy: Bitset,
    room_busy: Bitset,
    assignments: Vec<Option<Assignment>>,
    /// Day chosen for the first Project occurrence seen for a given group,
    /// so later Project occurrences of the same group are forced onto it
    /// (hard constraint 4, "Project grouping").
    project_day_by_group: HashMap<crate::types::GroupId, u32>,
    attempts: u64,
    backtracks: u64,
    timed_out: bool,
}

impl<'a> Search<'a> {
    fn solve(&mut self, pos: usize) -> bool {
        if Instant::now() >= self.input.deadline {
            self.timed_out = true;
            return false;
        }
        if pos >= self.order.len() {
            return true;
        }

        let occ_idx = self.order[pos];
        let occurrence = &self.input.occurrences[occ_idx];
        let domain = &self.input.domains[occ_idx];

        let forced_day = occurrence
            .group_id
            .as_ref()
            .and_then(|g| self.project_day_by_group.get(g).copied());

        for &(start, day) in &domain.start_day {
            if let Some(fixed) = forced_day {
                if day != fixed {
                    continue;
                }
            }
            let sections: Vec<usize> = occurrence
                .cohort
                .0
                .iter()
                .map(|s| self.section_index[s])
                .collect();
            if sections
                .iter()
                .any(|&s| self.section_busy.any_set(s, day, start, occurrence.length_subslots))
            {
                continue;
            }

            if occurrence.has_instructor {
                for instructor_id in &domain.instructors {
                    let instr_idx = self.instructor_index[instructor_id];
                    if self
                        .instructor_busy
                        .any_set(instr_idx, day, start, occurrence.length_subslots)
                    {
                        continue;
                    }
                    for room_id in &domain.rooms {
                        self.attempts += 1;
                        let room_idx = self.room_index[room_id];
                        if self
                            .room_busy
                            .any_set(room_idx, day, start, occurrence.length_subslots)
                        {
                            continue;
                        }

                        self.place(
                            occ_idx,
                            &sections,
                            instr_idx,
                            room_idx,
                            day,
                            start,
                            occurrence.length_subslots,
                            Some(instructor_id.clone()),
                            room_id.clone(),
                        );

                        let prior_group_day = self.note_project_day(occurrence, day);
                        if self.solve(pos + 1) {
                            return true;
                        }
                        self.restore_project_day(occurrence, prior_group_day);
                        self.backtracks += 1;
                        self.remove(occ_idx, &sections, instr_idx, room_idx, day, start, occurrence.length_subslots);
                    }
                }
            } else {
                for room_id in &domain.rooms {
                    self.attempts += 1;
                    let room_idx = self.room_index[room_id];
                    if self
                        .room_busy
                        .any_set(room_idx, day, start, occurrence.length_subslots)
                    {
                        continue;
                    }

                    self.place(
                        occ_idx,
                        &sections,
                        0,
                        room_idx,
                        day,
                        start,
                        occurrence.length_subslots,
                        None,
                        room_id.clone(),
                    );
                    // No instructor busy-state to set; use a sentinel index 0
                    // but never mark instructor_busy for instructor-less
                    // occurrences (see `place`).

                    let prior_group_day = self.note_project_day(occurrence, day);
                    if self.solve(pos + 1) {
                        return true;
                    }
                    self.restore_project_day(occurrence, prior_group_day);
                    self.backtracks += 1;
                    self.remove_room_and_sections_only(occ_idx, &sections, room_idx, day, start, occurrence.length_subslots);
                }
            }

            if Instant::now() >= self.input.deadline {
                self.timed_out = true;
                return false;
            }
        }

        debug!("no placement found for occurrence at search position {pos}");
        false
    }

    fn note_project_day(
        &mut self,
        occurrence: &crate::types::SessionOccurrence,
        day: u32,
    ) -> Option<(crate::types::GroupId, Option<u32>)> {
        if occurrence.kind != crate::types::SessionKind::Project {
            return None;
        }
        let Some(group_id) = occurrence.group_id.clone() else {
            return None;
        };
        let prior = self.project_day_by_group.get(&group_id).copied();
        self.project_day_by_group.insert(group_id.clone(), day);
        Some((group_id, prior))
    }

    fn restore_project_day(
        &mut self,
        occurrence: &crate::types::SessionOccurrence,
        prior: Option<(crate::types::GroupId, Option<u32>)>,
    ) {
        if occurrence.kind != crate::types::SessionKind::Project {
            return;
        }
        if let Some((group_id, prior_day)) = prior {
            match prior_day {
                Some(d) => {
                    self.project_day_by_group.insert(group_id, d);
                }
                None => {
                    self.project_day_by_group.remove(&group_id);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn place(
        &mut self,
        occ_idx: usize,
        sections: &[usize],
        instr_idx: usize,
        room_idx: usize,
        day: u32,
        start: u32,
        len: u32,
        instructor_id: Option<InstructorId>,
        room_id: RoomId,
    ) {
        for &s in sections {
            self.section_busy.set_range(s, day, start, len, true);
        }
        if instructor_id.is_some() {
            self.instructor_busy.set_range(instr_idx, day, start, len, true);
        }
        self.room_busy.set_range(room_idx, day, start, len, true);

        self.assignments[occ_idx] = Some(Assignment {
            occurrence_id: self.input.occurrences[occ_idx].id.clone(),
            day,
            start_subslot: start,
            room_id,
            instructor_id,
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn remove(
        &mut self,
        occ_idx: usize,
        sections: &[usize],
        instr_idx: usize,
        room_idx: usize,
        day: u32,
        start: u32,
        len: u32,
    ) {
        for &s in sections {
            self.section_busy.set_range(s, day, start, len, false);
        }
        self.instructor_busy.set_range(instr_idx, day, start, len, false);
        self.room_busy.set_range(room_idx, day, start, len, false);
        self.assignments[occ_idx] = None;
    }

    fn remove_room_and_sections_only(
        &mut self,
        occ_idx: usize,
        sections: &[usize],
        room_idx: usize,
        day: u32,
        start: u32,
        len: u32,
    ) {
        for &s in sections {
            self.section_busy.set_range(s, day, start, len, false);
        }
        self.room_busy.set_range(room_idx, day, start, len, false);
        self.assignments[occ_idx] = None;
    }
}
