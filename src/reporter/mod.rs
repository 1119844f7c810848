//! Report generation: JSON/Markdown/text, same three-format split as the
//! teacher's `reporter/{json,markdown,text}.rs`, plus per-group and
//! per-instructor schedule views grounded on the teacher's
//! `generate_student_schedule`/`generate_teacher_schedule`.

mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::error::Result;
use crate::types::{GroupId, InstructorId, ScheduleOutput};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Write one or more report formats to `output_dir`.
pub fn generate_reports(
    output: &ScheduleOutput,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                fs::write(
                    output_dir.join("schedule.json"),
                    generate_json_report(output)?,
                )?;
            }
            OutputFormat::Markdown => {
                fs::write(
                    output_dir.join("schedule.md"),
                    generate_markdown_report(output),
                )?;
            }
            OutputFormat::Text => {
                fs::write(output_dir.join("schedule.txt"), generate_text_report(output))?;
            }
        }
    }

    Ok(())
}

/// All of a group's scheduled sessions, rendered as a day-by-day agenda.
pub fn generate_group_schedule(output: &ScheduleOutput, group_id: &GroupId) -> Option<String> {
    let mut records: Vec<_> = output
        .schedule
        .iter()
        .filter(|r| &r.group_id == group_id)
        .collect();
    if records.is_empty() {
        return None;
    }
    records.sort_by(|a, b| (a.day.clone(), a.start_period).cmp(&(b.day.clone(), b.start_period)));

    let mut lines = vec![format!("# Schedule for group {group_id}"), String::new()];
    for record in records {
        lines.push(format!(
            "- **{}** {}: {} ({:?}) — Room {} ({})",
            record.day, record.time_slot, record.course_id, record.kind, record.room_id, record.section_id
        ));
    }
    Some(lines.join("\n"))
}

/// All of an instructor's scheduled sessions.
pub fn generate_instructor_schedule(
    output: &ScheduleOutput,
    instructor_id: &InstructorId,
) -> Option<String> {
    let mut records: Vec<_> = output
        .schedule
        .iter()
        .filter(|r| r.instructor_id.as_ref() == Some(instructor_id))
        .collect();
    if records.is_empty() {
        return None;
    }
    records.sort_by(|a, b| (a.day.clone(), a.start_period).cmp(&(b.day.clone(), b.start_period)));
    // One occurrence can contribute several per-section records; collapse
    // to distinct (day, period, course) slots for a readable agenda.
    records.dedup_by(|a, b| a.day == b.day && a.start_period == b.start_period && a.course_id == b.course_id);

    let mut lines = vec![
        format!("# Schedule for instructor {instructor_id}"),
        String::new(),
    ];
    for record in records {
        lines.push(format!(
            "- **{}** {}: {} ({:?}) — Room {}",
            record.day, record.time_slot, record.course_id, record.kind, record.room_id
        ));
    }
    Some(lines.join("\n"))
}
