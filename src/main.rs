use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use timetable_engine::parser::{load_input_from_dir, validate_input, write_allocations};
use timetable_engine::reporter::{
    generate_class_schedule, generate_json_summary, generate_reports, generate_teacher_schedule,
    print_summary, OutputFormat,
};
use timetable_engine::scheduler::generate;
use timetable_engine::types::{Allocation, ClassId, RunOptions, TeacherId};
use timetable_engine::validator::validate_allocations;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "timetable-engine")]
#[command(about = "Constraint-based academic timetable generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run with bundled sample data
    Demo {
        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },

    /// Generate a timetable from input data
    Generate {
        /// Directory containing input JSON/TOML files
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for allocations and reports
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Random seed; identical inputs and seed reproduce the same timetable
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Skip the genetic post-optimization pass
        #[arg(long)]
        no_optimize: bool,

        /// Suppress progress output, print JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Re-validate a previously generated allocation list
    Validate {
        /// Path to an allocations.json file
        #[arg(short, long)]
        allocations: PathBuf,

        /// Directory containing input data to validate against
        #[arg(short, long)]
        data: PathBuf,

        /// Show soft constraint scores too
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a class or teacher's weekly timetable
    Report {
        /// Path to an allocations.json file
        #[arg(short, long)]
        allocations: PathBuf,

        /// Directory containing input data
        #[arg(short, long)]
        data: PathBuf,

        /// Print the timetable for a specific class id
        #[arg(long)]
        class: Option<u32>,

        /// Print the timetable for a specific teacher id
        #[arg(long)]
        teacher: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seed } => run_demo(seed),
        Commands::Generate {
            data,
            output,
            format,
            seed,
            no_optimize,
            quiet,
        } => run_generate(&data, &output, &format, seed, no_optimize, quiet),
        Commands::Validate { allocations, data, verbose } => run_validate(&allocations, &data, verbose),
        Commands::Report { allocations, data, class, teacher } => run_report(&allocations, &data, class, teacher),
    }
}

fn run_demo(seed: u64) -> Result<()> {
    println!("{}", "Timetable Engine Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_path = PathBuf::from("demos/sample");
    let output_path = PathBuf::from("output");

    if !demo_path.join("teachers.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    println!("Loading demo data from: {}", demo_path.display());
    let input = load_input_from_dir(&demo_path).context("Failed to load demo data")?;

    let validation_result = validate_input(&input)?;
    for warning in &validation_result.warnings {
        println!("{} {}", "Warning:".yellow(), warning);
    }

    println!(
        "Loaded {} teachers, {} subjects, {} classes, {} rooms, {} baskets",
        input.teachers.len(),
        input.subjects.len(),
        input.classes.len(),
        input.rooms.len(),
        input.baskets.len()
    );

    println!("\nGenerating timetable...\n");
    let options = RunOptions { seed, ..Default::default() };
    let outcome = generate(&input, &options, false)?;
    let validation = validate_allocations(&outcome.allocations, &input);

    print_summary(&outcome, &validation);
    generate_reports(&outcome, &input, &validation, &output_path, &[OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text])?;
    write_allocations(&output_path.join("allocations.json"), &outcome.allocations)?;

    println!("Reports written to: {}", output_path.display().to_string().green());

    Ok(())
}

fn run_generate(data: &Path, output: &Path, format: &str, seed: u64, no_optimize: bool, quiet: bool) -> Result<()> {
    let input = load_input_from_dir(data).context("Failed to load input data")?;

    if !quiet {
        validate_input(&input)?;
        println!(
            "Loaded {} teachers, {} subjects, {} classes, {} rooms, {} baskets",
            input.teachers.len(),
            input.subjects.len(),
            input.classes.len(),
            input.rooms.len(),
            input.baskets.len()
        );
    }

    let options = RunOptions {
        seed,
        run_optimizer: !no_optimize,
        ..Default::default()
    };
    let outcome = generate(&input, &options, quiet)?;
    let validation = validate_allocations(&outcome.allocations, &input);

    let formats = parse_formats(format);
    generate_reports(&outcome, &input, &validation, output, &formats)?;
    write_allocations(&output.join("allocations.json"), &outcome.allocations)?;

    if quiet {
        let summary = generate_json_summary(&outcome, validation.total_score)?;
        println!("{}", summary);
    } else {
        print_summary(&outcome, &validation);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_validate(allocations_path: &Path, data: &Path, verbose: bool) -> Result<()> {
    let input = load_input_from_dir(data)?;
    let allocations = load_allocations(allocations_path)?;

    let validation = validate_allocations(&allocations, &input);

    if validation.is_valid {
        println!("{}", "✓ Timetable is valid".green().bold());
    } else {
        println!("{}", "✗ Timetable has violations".red().bold());
        for v in &validation.hard_violations {
            println!("  - {}: {}", v.constraint.red(), v.message);
        }
    }

    if verbose {
        println!("\n{}", "Soft Constraint Scores:".bold());
        for score in &validation.soft_scores {
            let pct = if score.max_score > 0.0 { (score.score / score.max_score) * 100.0 } else { 100.0 };
            println!("  {}: {:.1}% ({})", score.constraint, pct, score.details);
        }

        println!("\n{}", "Statistics:".bold());
        println!("  Allocations: {}", validation.statistics.total_allocations);
        println!("  Classes:     {}", validation.statistics.total_classes);
        println!("  Teachers:    {}", validation.statistics.total_teachers);
        println!("  Lab blocks:  {}", validation.statistics.lab_block_count);
    }

    println!("\nOverall Score: {:.1}/100", validation.total_score);

    Ok(())
}

fn run_report(allocations_path: &Path, data: &Path, class: Option<u32>, teacher: Option<u32>) -> Result<()> {
    let input = load_input_from_dir(data)?;
    let allocations = load_allocations(allocations_path)?;
    let outcome = timetable_engine::scheduler::GenerationOutcome {
        allocations,
        phase_results: Vec::new(),
        coverage_gaps: Vec::new(),
        basket_gaps: Vec::new(),
        elapsed_ms: 0,
    };

    if let Some(class_id) = class {
        match generate_class_schedule(&outcome, &input, ClassId(class_id)) {
            Some(report) => println!("{}", report),
            None => println!("Class not found"),
        }
    } else if let Some(teacher_id) = teacher {
        match generate_teacher_schedule(&outcome, &input, TeacherId(teacher_id)) {
            Some(report) => println!("{}", report),
            None => println!("Teacher not found"),
        }
    } else {
        let validation = validate_allocations(&outcome.allocations, &input);
        print_summary(&outcome, &validation);
    }

    Ok(())
}

fn load_allocations(path: &Path) -> Result<Vec<Allocation>> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
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

fn create_demo_data(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let teachers = serde_json::json!([
        {"id": 1, "name": "Ms. Anderson", "max_hours_per_week": 24, "available_days": [0,1,2,3,4], "qualified_subjects": [1], "effectiveness_score": 0.9},
        {"id": 2, "name": "Mr. Baker", "max_hours_per_week": 24, "available_days": [0,1,2,3,4], "qualified_subjects": [2], "effectiveness_score": 0.8},
        {"id": 3, "name": "Dr. Clark", "max_hours_per_week": 20, "available_days": [0,1,2,3,4], "qualified_subjects": [3], "effectiveness_score": 0.85},
        {"id": 4, "name": "Mr. Evans", "max_hours_per_week": 20, "available_days": [0,1,2,3,4], "qualified_subjects": [4,5], "effectiveness_score": 0.7},
        {"id": 5, "name": "Coach Fisher", "max_hours_per_week": 20, "available_days": [0,1,2,3,4], "qualified_subjects": [6], "effectiveness_score": 0.75}
    ]);
    std::fs::write(path.join("teachers.json"), serde_json::to_string_pretty(&teachers)?)?;

    let subjects = serde_json::json!([
        {"id": 1, "code": "MATH10", "theory_hours": 4, "lab_hours": 0, "tutorial_hours": 1},
        {"id": 2, "code": "ENG10", "theory_hours": 3, "lab_hours": 0, "tutorial_hours": 0},
        {"id": 3, "code": "SCI10", "theory_hours": 3, "lab_hours": 2, "tutorial_hours": 0},
        {"id": 4, "code": "ART", "theory_hours": 2, "lab_hours": 0, "tutorial_hours": 0, "basket_id": 1},
        {"id": 5, "code": "MUSIC", "theory_hours": 2, "lab_hours": 0, "tutorial_hours": 0, "basket_id": 1},
        {"id": 6, "code": "PE", "theory_hours": 2, "lab_hours": 0, "tutorial_hours": 0}
    ]);
    std::fs::write(path.join("subjects.json"), serde_json::to_string_pretty(&subjects)?)?;

    let classes = serde_json::json!([
        {"id": 1, "semester": 1, "section": "A", "student_count": 30, "subjects": [1,2,3,6]},
        {"id": 2, "semester": 1, "section": "B", "student_count": 28, "subjects": [1,2,3,6]}
    ]);
    std::fs::write(path.join("classes.json"), serde_json::to_string_pretty(&classes)?)?;

    let rooms = serde_json::json!([
        {"id": 1, "name": "Room 101", "capacity": 35, "kind": "lecture"},
        {"id": 2, "name": "Room 102", "capacity": 35, "kind": "lecture"},
        {"id": 3, "name": "Science Lab", "capacity": 24, "kind": "lab"},
        {"id": 4, "name": "Gymnasium", "capacity": 60, "kind": "seminar"}
    ]);
    std::fs::write(path.join("rooms.json"), serde_json::to_string_pretty(&rooms)?)?;

    let baskets = serde_json::json!([
        {"id": 1, "name": "Creative Electives", "semester": 1, "theory_hours": 2, "lab_hours": 0, "tutorial_hours": 0, "participating_classes": [1,2], "subjects": [4,5]}
    ]);
    std::fs::write(path.join("elective_baskets.json"), serde_json::to_string_pretty(&baskets)?)?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
