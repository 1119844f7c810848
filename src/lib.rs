//! Timetable scheduler: weekly university timetable generation.
//!
//! The core is the constraint-solving pipeline in [`scheduler`]: instance
//! expansion, feasibility pre-checking, domain construction, and two
//! interchangeable solver strategies (a constraint model and a hand-rolled
//! backtracker) that converge on the same assignment contract. [`catalog`]
//! is the read-only normalized view the pipeline runs against; [`parser`],
//! [`reporter`], and [`validator`] are the shape-only external collaborators
//! around it (file I/O, report rendering, post-hoc re-validation).
//!
//! # Example
//!
//! ```no_run
//! use timetable_scheduler::catalog::Catalog;
//! use timetable_scheduler::parser::load_input_from_dir;
//! use timetable_scheduler::scheduler::generate_schedule;
//! use timetable_scheduler::types::ScheduleConfig;
//! use std::path::Path;
//!
//! let raw = load_input_from_dir(Path::new("./data/demo")).unwrap();
//! let (catalog, warnings) =
//!     Catalog::build(raw.rooms, raw.instructors, raw.groups, raw.sections, raw.courses).unwrap();
//! let config = ScheduleConfig::default();
//! let output = generate_schedule(&catalog, &config, &warnings.messages, true);
//! println!("status: {:?}", output.status);
//! ```

pub mod catalog;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{Result, SchedulerError};
