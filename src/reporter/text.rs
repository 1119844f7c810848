use crate::types::{ScheduleOutput, SolveStatus};
use colored::Colorize;

/// Plain-text / terminal-colored report, same three-format split as the
/// teacher's `reporter::text`.
pub fn generate_text_report(output: &ScheduleOutput) -> String {
    let mut lines = Vec::new();
    lines.push("=".repeat(60));
    lines.push("               TIMETABLE REPORT".to_string());
    lines.push("=".repeat(60));
    lines.push(String::new());
    lines.push(format!("Status:        {:?}", output.status));
    lines.push(format!("Solve time:    {:.2}s", output.solve_time_seconds));
    lines.push(format!("Total sessions: {}", output.total_sessions));
    lines.push(format!("Scheduled:     {}", output.schedule.len()));
    lines.push(String::new());

    if let Some(message) = &output.message {
        lines.push(format!("Message: {message}"));
        lines.push(String::new());
    }

    if !output.errors.is_empty() {
        lines.push("-".repeat(40));
        lines.push("INPUT ERRORS".to_string());
        lines.push("-".repeat(40));
        for error in &output.errors {
            lines.push(format!("  - {}", error.message));
        }
        lines.push(String::new());
    }

    if !output.warnings.is_empty() {
        lines.push("-".repeat(40));
        lines.push("WARNINGS".to_string());
        lines.push("-".repeat(40));
        for warning in &output.warnings {
            lines.push(format!("  - {warning}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Short colored terminal summary printed after every CLI solve/validate run.
pub fn print_summary(output: &ScheduleOutput) {
    match output.status {
        SolveStatus::Success => {
            println!("{}", "✓ Schedule generated".green().bold());
        }
        SolveStatus::InputError => {
            println!("{}", "✗ Input error".red().bold());
        }
        SolveStatus::Infeasible => {
            println!("{}", "✗ Infeasible".red().bold());
        }
        SolveStatus::Timeout => {
            println!("{}", "✗ Timed out".yellow().bold());
        }
    }
    println!(
        "  {} sessions, {} scheduled, {:.2}s",
        output.total_sessions,
        output.schedule.len(),
        output.solve_time_seconds
    );
    if let Some(message) = &output.message {
        println!("  {message}");
    }
    for warning in &output.warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
}
