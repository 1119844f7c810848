use crate::error::Result;
use crate::types::ScheduleOutput;

/// The full `ScheduleOutput` is already the wire shape; this just
/// pretty-prints it.
pub fn generate_json_report(output: &ScheduleOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

#[derive(serde::Serialize)]
pub struct JsonSummary {
    pub status: String,
    pub total_sessions: usize,
    pub scheduled_records: usize,
    pub solve_time_seconds: f64,
    pub warning_count: usize,
}

pub fn generate_json_summary(output: &ScheduleOutput) -> Result<String> {
    let summary = JsonSummary {
        status: format!("{:?}", output.status),
        total_sessions: output.total_sessions,
        scheduled_records: output.schedule.len(),
        solve_time_seconds: output.solve_time_seconds,
        warning_count: output.warnings.len(),
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}
