//! Scheduler pipeline: Instance Generator, Feasibility Pre-Check,
//! Domain Builder, Solver, Result Extractor, advisory post-pass.

pub mod advisory;
pub mod domain;
pub mod extractor;
pub mod feasibility;
pub mod instance_gen;
pub mod solver;

use crate::catalog::Catalog;
use crate::types::{InputErrorEntry, ScheduleConfig, ScheduleOutput, SolveStatus};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use solver::{SolverInput, SolverOutcome};
use std::time::Instant;

/// Runs the full pipeline once and reports a terminal [`ScheduleOutput`].
/// Never panics on infeasible or invalid input: every
/// failure mode is folded into `status`/`message`/`errors`/`unscheduled`.
pub fn generate_schedule(
    catalog: &Catalog,
    config: &ScheduleConfig,
    catalog_warnings: &[String],
    quiet: bool,
) -> ScheduleOutput {
    let start_time = Instant::now();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    progress.set_message("Generating session occurrences...");
    progress.set_position(10);
    let occurrences = match instance_gen::generate_instances(catalog, config) {
        Ok(o) => o,
        Err(err) => {
            progress.finish_and_clear();
            return ScheduleOutput {
                status: SolveStatus::InputError,
                solve_time_seconds: start_time.elapsed().as_secs_f64(),
                total_sessions: 0,
                message: Some(err.to_string()),
                schedule: Vec::new(),
                errors: vec![InputErrorEntry {
                    occurrence_id: None,
                    message: err.to_string(),
                }],
                unscheduled: Vec::new(),
                warnings: catalog_warnings.to_vec(),
            };
        }
    };

    progress.set_message("Checking feasibility...");
    progress.set_position(25);
    let (candidates, feasibility_errors) = feasibility::check_feasibility(catalog, &occurrences);
    if !feasibility_errors.is_empty() {
        progress.finish_and_clear();
        return ScheduleOutput {
            status: SolveStatus::InputError,
            solve_time_seconds: start_time.elapsed().as_secs_f64(),
            total_sessions: occurrences.len(),
            message: Some(format!(
                "{} occurrence(s) have no feasible candidate",
                feasibility_errors.len()
            )),
            schedule: Vec::new(),
            errors: feasibility_errors
                .into_iter()
                .map(|message| InputErrorEntry {
                    occurrence_id: None,
                    message,
                })
                .collect(),
            unscheduled: Vec::new(),
            warnings: catalog_warnings.to_vec(),
        };
    }

    progress.set_message("Building domains...");
    progress.set_position(40);
    let domains = domain::build_domains(&occurrences, &candidates, config);

    progress.set_message(format!("Solving ({:?})...", config.strategy));
    progress.set_position(55);
    let deadline = solver::deadline_from(config.max_time_seconds);
    let solver_input = SolverInput {
        occurrences: &occurrences,
        domains: &domains,
        config,
        deadline,
    };
    let outcome = solver::solve(solver_input, config.strategy);

    let output = match outcome {
        SolverOutcome::Scheduled(assignments) => {
            progress.set_message("Running advisory slot-preference pass...");
            progress.set_position(85);
            let assignments =
                advisory::optimize_slot_preferences(&occurrences, &domains, config, assignments);
            let schedule = extractor::extract_records(catalog, config, &occurrences, &assignments);
            ScheduleOutput {
                status: SolveStatus::Success,
                solve_time_seconds: start_time.elapsed().as_secs_f64(),
                total_sessions: occurrences.len(),
                message: None,
                schedule,
                errors: Vec::new(),
                unscheduled: Vec::new(),
                warnings: catalog_warnings.to_vec(),
            }
        }
        SolverOutcome::TimedOut(assignments) => {
            let schedule = extractor::extract_records(catalog, config, &occurrences, &assignments);
            ScheduleOutput {
                status: SolveStatus::Timeout,
                solve_time_seconds: start_time.elapsed().as_secs_f64(),
                total_sessions: occurrences.len(),
                message: Some(format!(
                    "solver timed out after {} seconds",
                    config.max_time_seconds
                )),
                schedule,
                errors: Vec::new(),
                unscheduled: Vec::new(),
                warnings: catalog_warnings.to_vec(),
            }
        }
        SolverOutcome::Unscheduled(unscheduled) => ScheduleOutput {
            status: SolveStatus::Infeasible,
            solve_time_seconds: start_time.elapsed().as_secs_f64(),
            total_sessions: occurrences.len(),
            message: Some("no feasible solution found".to_string()),
            schedule: Vec::new(),
            errors: Vec::new(),
            unscheduled,
            warnings: catalog_warnings.to_vec(),
        },
    };

    progress.set_message("Complete!");
    progress.set_position(100);
    progress.finish_and_clear();
    info!(
        "schedule generation finished with status {:?} in {:.2}s",
        output.status, output.solve_time_seconds
    );
    output
}
