use serde::{Deserialize, Serialize};

/// Which solver strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Constraint,
    BacktrackSection,
    BacktrackCourse,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::BacktrackCourse
    }
}

/// Recognized configuration options. Only these keys are honored;
/// unrecognized keys in the source document are ignored by serde's default
/// permissive deserialization, matching the teacher's
/// `load_config_or_default` behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub max_time_seconds: u64,
    pub strategy: Strategy,
    pub days: u32,
    pub periods_per_day: u32,
    pub base_slot_minutes: u32,
    pub day_start_clock: String,
}

impl ScheduleConfig {
    /// Sub-slots held by one period (90 minutes / base-slot minutes).
    pub fn subslots_per_period(&self) -> u32 {
        90 / self.base_slot_minutes
    }

    /// Sub-slots in a single day.
    pub fn subslots_per_day(&self) -> u32 {
        self.periods_per_day * self.subslots_per_period()
    }

    /// Sub-slots across the whole week.
    pub fn total_subslots(&self) -> u32 {
        self.days * self.subslots_per_day()
    }

    pub fn length_to_subslots(&self, length_minutes: u32) -> Option<u32> {
        if length_minutes % self.base_slot_minutes != 0 {
            None
        } else {
            Some(length_minutes / self.base_slot_minutes)
        }
    }

    /// Day names starting from Sunday; day index 0 is Sunday.
    pub fn day_name(&self, day: u32) -> &'static str {
        const NAMES: [&str; 7] = [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ];
        NAMES[(day as usize) % NAMES.len()]
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_time_seconds: 300,
            strategy: Strategy::default(),
            days: 5,
            periods_per_day: 4,
            base_slot_minutes: 45,
            day_start_clock: "09:00".to_string(),
        }
    }
}
