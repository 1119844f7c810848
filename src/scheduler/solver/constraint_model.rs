//! Strategy A: the placement problem encoded as an ILP and solved with
//! `good_lp`.

use super::{SolverInput, SolverOutcome};
use crate::types::{Assignment, OccurrenceId};
use good_lp::{constraint, variable, variables, Constraint, Expression, Solution, SolverModel, Variable};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// One occurrence's decision variables: which start sub-slot, room, and
/// (optionally) instructor it is assigned.
struct OccurrenceVars {
    start: HashMap<u32, Variable>,
    room: HashMap<crate::types::RoomId, Variable>,
    instructor: HashMap<crate::types::InstructorId, Variable>,
}

/// Builds and solves the ILP once, for a single fixed processing order of
/// occurrence pairs (the "worker ordering"): different orders produce the
/// same feasible region but add disjunction constraints in a different
/// sequence, which is the only thing that varies between workers.
fn solve_once(input: &SolverInput<'_>, reverse_pair_order: bool) -> Option<Vec<Assignment>> {
    let mut vars = variables!();
    let big_m = input.config.total_subslots() as f64 + 1.0;
    let mut constraints: Vec<Constraint> = Vec::new();

    let mut occ_vars: Vec<OccurrenceVars> = Vec::with_capacity(input.occurrences.len());
    for domain in input.domains {
        let start = domain
            .starts
            .iter()
            .map(|&s| (s, vars.add(variable().binary())))
            .collect();
        let room = domain
            .rooms
            .iter()
            .map(|r| (r.clone(), vars.add(variable().binary())))
            .collect();
        let instructor = domain
            .instructors
            .iter()
            .map(|i| (i.clone(), vars.add(variable().binary())))
            .collect();
        occ_vars.push(OccurrenceVars {
            start,
            room,
            instructor,
        });
    }

    // Exactly one start / room / instructor per occurrence.
    for (idx, domain) in input.domains.iter().enumerate() {
        let ov = &occ_vars[idx];

        let start_sum: Expression = domain.starts.iter().map(|s| ov.start[s]).sum();
        constraints.push(constraint!(start_sum == 1));

        if !domain.rooms.is_empty() {
            let room_sum: Expression = domain.rooms.iter().map(|r| ov.room[r]).sum();
            constraints.push(constraint!(room_sum == 1));
        }
        if input.occurrences[idx].has_instructor && !domain.instructors.is_empty() {
            let instr_sum: Expression = domain.instructors.iter().map(|i| ov.instructor[i]).sum();
            constraints.push(constraint!(instr_sum == 1));
        }
    }

    // Absolute weekly start-position expression. No occurrence's domain
    // admits a cross-day span, so two intervals on this absolute sub-slot
    // timeline overlap exactly when they are on the same day and their
    // sub-slot ranges overlap, making a separate same-day check redundant.
    let position: Vec<Expression> = occ_vars
        .iter()
        .map(|ov| ov.start.iter().map(|(&s, &v)| (s as f64) * v).sum())
        .collect();

    let day_expr: Vec<Expression> = occ_vars
        .iter()
        .map(|ov| {
            ov.start
                .iter()
                .map(|(&s, &v)| ((s / input.config.subslots_per_day()) as f64) * v)
                .sum()
        })
        .collect();

    let mut pair_indices: Vec<(usize, usize)> = Vec::new();
    for i in 0..input.occurrences.len() {
        for j in (i + 1)..input.occurrences.len() {
            pair_indices.push((i, j));
        }
    }
    if reverse_pair_order {
        pair_indices.reverse();
    }

    // Project grouping: all Project occurrences of the same group must land
    // on the same day.
    for &(i, j) in &pair_indices {
        let a = &input.occurrences[i];
        let b = &input.occurrences[j];
        if a.kind == crate::types::SessionKind::Project
            && b.kind == crate::types::SessionKind::Project
            && a.group_id.is_some()
            && a.group_id == b.group_id
        {
            constraints.push(constraint!(day_expr[i].clone() == day_expr[j].clone()));
        }
    }

    for (i, j) in pair_indices {
        let a = &input.occurrences[i];
        let b = &input.occurrences[j];

        let shares_students = a.cohort.shares_students_with(&b.cohort);

        // `z = room[i][r] AND room[j][r]` linearized via the standard
        // three-inequality AND encoding, for every room candidate shared by
        // both occurrences' domains.
        let mut activations: Vec<Variable> = Vec::new();

        let common_rooms: Vec<_> = occ_vars[i]
            .room
            .keys()
            .filter(|r| occ_vars[j].room.contains_key(*r))
            .cloned()
            .collect();
        for room_id in &common_rooms {
            let ri = occ_vars[i].room[room_id];
            let rj = occ_vars[j].room[room_id];
            let z = vars.add(variable().binary());
            constraints.push(constraint!(z <= ri));
            constraints.push(constraint!(z <= rj));
            constraints.push(constraint!(z >= ri + rj - 1));
            activations.push(z);
        }

        let common_instructors: Vec<_> = occ_vars[i]
            .instructor
            .keys()
            .filter(|ins| occ_vars[j].instructor.contains_key(*ins))
            .cloned()
            .collect();
        for instructor_id in &common_instructors {
            let ii = occ_vars[i].instructor[instructor_id];
            let ij = occ_vars[j].instructor[instructor_id];
            let z = vars.add(variable().binary());
            constraints.push(constraint!(z <= ii));
            constraints.push(constraint!(z <= ij));
            constraints.push(constraint!(z >= ii + ij - 1));
            activations.push(z);
        }

        if !shares_students && activations.is_empty() {
            continue; // these two occurrences can never conflict
        }

        let before = vars.add(variable().binary());
        let after = vars.add(variable().binary());

        let len_i = a.length_subslots as f64;
        let len_j = b.length_subslots as f64;

        constraints.push(constraint!(
            position[i].clone() + len_i <= position[j].clone() + big_m * (1.0 - before)
        ));
        constraints.push(constraint!(
            position[j].clone() + len_j <= position[i].clone() + big_m * (1.0 - after)
        ));

        if shares_students {
            constraints.push(constraint!(before + after >= 1));
        }
        for z in activations {
            constraints.push(constraint!(before + after >= z));
        }
    }

    let mut problem = vars
        .minimise(Expression::from(0.0))
        .using(good_lp::solvers::highs::highs);
    for c in constraints {
        problem = problem.with(c);
    }

    let deadline_seconds = input
        .deadline
        .saturating_duration_since(Instant::now())
        .as_secs_f64()
        .max(0.1);
    problem.set_parameter("time_limit", &deadline_seconds.to_string());

    let solution = problem.solve().ok()?;

    let mut assignments = Vec::with_capacity(input.occurrences.len());
    for (idx, occurrence) in input.occurrences.iter().enumerate() {
        let ov = &occ_vars[idx];
        let start = *ov
            .start
            .iter()
            .find(|(_, &v)| solution.value(v) > 0.5)
            .map(|(s, _)| s)
            .expect("exactly-one start constraint guarantees a selection");
        let day = start / input.config.subslots_per_day();
        let room_id = ov
            .room
            .iter()
            .find(|(_, &v)| solution.value(v) > 0.5)
            .map(|(r, _)| r.clone())
            .expect("exactly-one room constraint guarantees a selection");
        let instructor_id = ov
            .instructor
            .iter()
            .find(|(_, &v)| solution.value(v) > 0.5)
            .map(|(i, _)| i.clone());

        assignments.push(Assignment {
            occurrence_id: occurrence.id.clone(),
            day,
            start_subslot: start,
            room_id,
            instructor_id,
        });
    }

    Some(assignments)
}

pub fn solve_constraint_model(input: SolverInput<'_>) -> SolverOutcome {
    let cancelled = AtomicBool::new(false);
    let winner: Mutex<Option<(usize, Option<Vec<Assignment>>)>> = Mutex::new(None);

    std::thread::scope(|scope| {
        for worker in 0..2usize {
            let input_ref = &input;
            let cancelled_ref = &cancelled;
            let winner_ref = &winner;
            scope.spawn(move || {
                if cancelled_ref.load(Ordering::Relaxed) {
                    return;
                }
                let result = solve_once(input_ref, worker % 2 == 1);
                let mut guard = winner_ref.lock().unwrap();
                match &*guard {
                    Some((existing_worker, _)) if *existing_worker <= worker => {}
                    _ => *guard = Some((worker, result)),
                }
                cancelled_ref.store(true, Ordering::Relaxed);
            });
        }
    });

    let outcome = winner.into_inner().unwrap();
    match outcome {
        Some((worker, Some(assignments))) => {
            info!("constraint-model worker {worker} found a complete assignment");
            SolverOutcome::Scheduled(assignments)
        }
        Some((worker, None)) => {
            debug!("constraint-model worker {worker} reported no solution");
            if Instant::now() >= input.deadline {
                SolverOutcome::TimedOut(Vec::new())
            } else {
                let unscheduled: Vec<OccurrenceId> =
                    input.occurrences.iter().map(|o| o.id.clone()).collect();
                SolverOutcome::Unscheduled(unscheduled)
            }
        }
        None => SolverOutcome::Unscheduled(
            input.occurrences.iter().map(|o| o.id.clone()).collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::scheduler::domain::build_domains;
    use crate::scheduler::feasibility::check_feasibility;
    use crate::scheduler::instance_gen::generate_instances;
    use crate::scheduler::solver::deadline_from;
    use crate::types::{
        Course, CourseId, CourseKind, Group, GroupId, Instructor, InstructorId, Role, Room,
        RoomId, RoomType, ScheduleConfig, Section, SectionId, SessionKind,
    };

    fn single_lecture_catalog() -> Catalog {
        let groups = vec![Group {
            id: GroupId::from("g1"),
            year: 1,
            specialization: None,
            students_count: 20,
        }];
        let sections = vec![Section {
            id: SectionId::from("s1"),
            group_id: GroupId::from("g1"),
            students_count: 20,
        }];
        let rooms = vec![Room {
            id: RoomId::from("r1"),
            room_type: RoomType::Classroom,
            capacity: 50,
            building: String::new(),
        }];
        let instructors = vec![Instructor {
            id: InstructorId::from("p1"),
            name: String::new(),
            role: Role::Professor,
            qualified_courses: [CourseId::from("c1")].into_iter().collect(),
        }];
        let courses = vec![Course {
            id: CourseId::from("c1"),
            name: String::new(),
            year: 1,
            major: None,
            is_project: false,
            full_year: false,
            kinds: vec![CourseKind {
                kind: SessionKind::Lecture,
                length_minutes: 90,
                lab_type: None,
                sessions_per_week: Some(1),
                max_sections_together: 1,
                ignore_capacity: false,
            }],
        }];
        Catalog::build(rooms, instructors, groups, sections, courses)
            .unwrap()
            .0
    }

    #[test]
    fn solves_single_occurrence() {
        let catalog = single_lecture_catalog();
        let config = ScheduleConfig::default();
        let occurrences = generate_instances(&catalog, &config).unwrap();
        let (candidates, errors) = check_feasibility(&catalog, &occurrences);
        assert!(errors.is_empty());
        let domains = build_domains(&occurrences, &candidates, &config);

        let input = SolverInput {
            occurrences: &occurrences,
            domains: &domains,
            config: &config,
            deadline: deadline_from(30),
        };
        match solve_constraint_model(input) {
            SolverOutcome::Scheduled(assignments) => assert_eq!(assignments.len(), 1),
            other => panic!("expected a schedule, got {other:?}"),
        }
    }
}
