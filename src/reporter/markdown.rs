use crate::types::ScheduleOutput;

/// Generate a markdown report of a solve call's result.
pub fn generate_markdown_report(output: &ScheduleOutput) -> String {
    let mut lines = vec![
        "# Timetable Report".to_string(),
        String::new(),
        format!("Status: **{:?}**", output.status),
        format!("Solve time: {:.2}s", output.solve_time_seconds),
        format!("Total sessions: {}", output.total_sessions),
        String::new(),
    ];

    if let Some(message) = &output.message {
        lines.push(format!("> {message}"));
        lines.push(String::new());
    }

    if !output.errors.is_empty() {
        lines.push("## Input Errors\n".to_string());
        for error in &output.errors {
            lines.push(format!("- {}", error.message));
        }
        lines.push(String::new());
    }

    if !output.unscheduled.is_empty() {
        lines.push("## Unscheduled Occurrences\n".to_string());
        for id in &output.unscheduled {
            lines.push(format!("- `{id}`"));
        }
        lines.push(String::new());
    }

    if !output.schedule.is_empty() {
        lines.push("## Schedule\n".to_string());
        lines.push("| Day | Period | Time | Course | Kind | Room | Instructor | Group | Section |".to_string());
        lines.push("|-----|--------|------|--------|------|------|------------|-------|---------|".to_string());

        let mut sorted = output.schedule.clone();
        sorted.sort_by(|a, b| {
            (a.day.clone(), a.start_period, a.course_id.clone()).cmp(&(
                b.day.clone(),
                b.start_period,
                b.course_id.clone(),
            ))
        });

        for record in &sorted {
            lines.push(format!(
                "| {} | {} | {} | {} | {:?} | {} | {} | {} | {} |",
                record.day,
                record.start_period,
                record.time_slot,
                record.course_id,
                record.kind,
                record.room_id,
                record
                    .instructor_id
                    .as_ref()
                    .map(|i| i.to_string())
                    .unwrap_or_else(|| "—".to_string()),
                record.group_id,
                record.section_id,
            ));
        }
        lines.push(String::new());
    }

    if !output.warnings.is_empty() {
        lines.push("## Warnings\n".to_string());
        for warning in &output.warnings {
            lines.push(format!("- {warning}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
