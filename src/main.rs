use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use timetable_scheduler::catalog::Catalog;
use timetable_scheduler::parser::{load_config_or_default, load_input_from_dir, validate_input};
use timetable_scheduler::reporter::{
    generate_group_schedule, generate_instructor_schedule, generate_reports, print_summary,
    OutputFormat,
};
use timetable_scheduler::scheduler::{generate_schedule, instance_gen};
use timetable_scheduler::types::{GroupId, InstructorId, ScheduleOutput};
use timetable_scheduler::validator::validate_schedule;

#[derive(Parser)]
#[command(name = "timetable-scheduler")]
#[command(about = "Constraint-based university timetable generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a timetable from a data directory
    Solve {
        /// Directory containing rooms.json, instructors.json, groups.json,
        /// sections.json, courses.json, and an optional config.toml
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for report files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print a JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Re-validate a previously generated schedule.json against its source data
    Validate {
        /// Path to a schedule.json file
        #[arg(short, long)]
        schedule: PathBuf,

        /// Directory containing the original input data
        #[arg(short, long)]
        data: PathBuf,

        /// Show every violation, not just the count
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print one group's or instructor's agenda from a schedule.json
    Report {
        /// Path to a schedule.json file
        #[arg(short, long)]
        schedule: PathBuf,

        /// Group id to print an agenda for
        #[arg(long)]
        group: Option<String>,

        /// Instructor id to print an agenda for
        #[arg(long)]
        instructor: Option<String>,
    },

    /// Run the solver against the bundled demo data, creating it if needed
    Demo,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            data,
            output,
            format,
            quiet,
        } => run_solve(&data, &output, &format, quiet),
        Commands::Validate {
            schedule,
            data,
            verbose,
        } => run_validate(&schedule, &data, verbose),
        Commands::Report {
            schedule,
            group,
            instructor,
        } => run_report(&schedule, group, instructor),
        Commands::Demo => run_demo(),
    }
}

fn load_catalog(data: &PathBuf) -> Result<(Catalog, Vec<String>)> {
    let raw = load_input_from_dir(data).context("failed to load input data")?;
    let pre_check = validate_input(&raw);
    for warning in &pre_check.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }
    let (catalog, warnings) = Catalog::build(raw.rooms, raw.instructors, raw.groups, raw.sections, raw.courses)
        .context("input failed catalog construction")?;
    Ok((catalog, warnings.messages))
}

fn run_solve(data: &PathBuf, output: &PathBuf, format: &str, quiet: bool) -> Result<()> {
    let (catalog, catalog_warnings) = load_catalog(data)?;
    let config = load_config_or_default(&data.join("config.toml"));

    if !quiet {
        println!(
            "Loaded {} rooms, {} instructors, {} groups, {} sections, {} courses",
            catalog.rooms().len(),
            catalog.instructors().len(),
            catalog.groups().len(),
            catalog.sections().len(),
            catalog.courses().len(),
        );
    }

    let result = generate_schedule(&catalog, &config, &catalog_warnings, quiet);

    let formats = parse_formats(format);
    generate_reports(&result, output, &formats)?;

    if quiet {
        let summary = timetable_scheduler::reporter::generate_json_summary(&result)?;
        println!("{summary}");
    } else {
        print_summary(&result);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_validate(schedule_path: &PathBuf, data: &PathBuf, verbose: bool) -> Result<()> {
    let (catalog, _) = load_catalog(data)?;
    let config = load_config_or_default(&data.join("config.toml"));

    let schedule_json = std::fs::read_to_string(schedule_path)
        .with_context(|| format!("failed to read {}", schedule_path.display()))?;
    let output: ScheduleOutput = serde_json::from_str(&schedule_json)?;

    let occurrences = instance_gen::generate_instances(&catalog, &config).ok();
    let report = validate_schedule(&output, &catalog, occurrences.as_deref());

    if report.is_valid {
        println!("{}", "✓ Schedule is valid".green().bold());
    } else {
        println!("{}", "✗ Schedule has violations".red().bold());
    }
    println!(
        "  {} record(s), {} violation(s)",
        report.total_records,
        report.violations.len()
    );
    if verbose {
        for violation in &report.violations {
            println!("  - [{}] {}", violation.property.red(), violation.message);
        }
    }

    if !report.is_valid {
        std::process::exit(1);
    }
    Ok(())
}

fn run_report(
    schedule_path: &PathBuf,
    group: Option<String>,
    instructor: Option<String>,
) -> Result<()> {
    let schedule_json = std::fs::read_to_string(schedule_path)
        .with_context(|| format!("failed to read {}", schedule_path.display()))?;
    let output: ScheduleOutput = serde_json::from_str(&schedule_json)?;

    if let Some(group_id) = group {
        match generate_group_schedule(&output, &GroupId::from(group_id.as_str())) {
            Some(report) => println!("{report}"),
            None => println!("No scheduled sessions found for group '{group_id}'"),
        }
    } else if let Some(instructor_id) = instructor {
        match generate_instructor_schedule(&output, &InstructorId::from(instructor_id.as_str())) {
            Some(report) => println!("{report}"),
            None => println!("No scheduled sessions found for instructor '{instructor_id}'"),
        }
    } else {
        print_summary(&output);
    }

    Ok(())
}

fn run_demo() -> Result<()> {
    println!("{}", "Timetable Scheduler Demo".bold().cyan());
    println!("{}", "-".repeat(40));

    let demo_path = PathBuf::from("data/demo");
    let output_path = PathBuf::from("output");

    if !demo_path.join("rooms.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    run_solve(&demo_path, &output_path, "all", false)
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }
    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

/// A small, feasible demo catalog: one year-1 group split into two sections,
/// one theater and two classrooms, a physics lab, one professor and one TA
/// qualified for both demo courses, extended with a Lab to exercise the
/// lab-type-matching path.
fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let rooms = serde_json::json!([
        {"id": "r1", "type": "classroom", "capacity": 100, "building": "Main"},
        {"id": "r2", "type": "classroom", "capacity": 50, "building": "Main"},
        {"id": "t1", "type": "theater", "capacity": 200, "building": "Main"},
        {"id": "phys1", "type": "physics lab", "capacity": 30, "building": "Science"}
    ]);
    std::fs::write(path.join("rooms.json"), serde_json::to_string_pretty(&rooms)?)?;

    let instructors = serde_json::json!([
        {"id": "p1", "name": "Prof. Ada", "role": "Professor", "qualified_courses": ["c1", "c2", "phys1"]},
        {"id": "ta1", "name": "TA Ben", "role": "TA", "qualified_courses": ["c1", "c2", "phys1"]}
    ]);
    std::fs::write(
        path.join("instructors.json"),
        serde_json::to_string_pretty(&instructors)?,
    )?;

    let groups = serde_json::json!([
        {"id": "g1", "year": 1, "specialization": null, "students_count": 40}
    ]);
    std::fs::write(path.join("groups.json"), serde_json::to_string_pretty(&groups)?)?;

    let sections = serde_json::json!([
        {"id": "s1", "group_id": "g1", "students_count": 20},
        {"id": "s2", "group_id": "g1", "students_count": 20}
    ]);
    std::fs::write(
        path.join("sections.json"),
        serde_json::to_string_pretty(&sections)?,
    )?;

    let courses = serde_json::json!([
        {
            "id": "c1",
            "name": "Intro to Systems",
            "year": 1,
            "major": null,
            "is_project": false,
            "full_year": false,
            "kinds": [{"type": "Lecture", "length_minutes": 90}]
        },
        {
            "id": "c2",
            "name": "Discrete Math",
            "year": 1,
            "major": null,
            "is_project": false,
            "full_year": false,
            "kinds": [
                {"type": "Lecture", "length_minutes": 90},
                {"type": "Tut", "length_minutes": 45}
            ]
        },
        {
            "id": "phys1",
            "name": "Physics I",
            "year": 1,
            "major": null,
            "is_project": false,
            "full_year": false,
            "kinds": [{"type": "Lab", "length_minutes": 90, "lab_type": "physics lab", "sessions_per_week": 1}]
        }
    ]);
    std::fs::write(path.join("courses.json"), serde_json::to_string_pretty(&courses)?)?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
