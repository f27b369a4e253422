mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::error::Result;
use crate::scheduler::GenerationOutcome;
use crate::types::{ClassId, EngineInput, TeacherId};
use crate::validator::ValidationReport;
use std::fs;
use std::path::Path;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Generate all requested report formats and write them to `output_dir`.
pub fn generate_reports(
    outcome: &GenerationOutcome,
    input: &EngineInput,
    validation: &ValidationReport,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(outcome)?;
                fs::write(output_dir.join("allocations.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(outcome, input, validation);
                fs::write(output_dir.join("timetable.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(outcome, input, validation);
                fs::write(output_dir.join("timetable.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// Render a single class's weekly timetable.
pub fn generate_class_schedule(outcome: &GenerationOutcome, input: &EngineInput, class_id: ClassId) -> Option<String> {
    let class = input.classes.iter().find(|c| c.id == class_id)?;

    let mut lines = vec![format!("# Timetable for class {} (Sem {} {})", class.id, class.semester, class.section), String::new()];

    let mut allocs: Vec<_> = outcome.allocations.iter().filter(|a| a.class_id == class_id).collect();
    allocs.sort_by_key(|a| (a.day, a.period));

    if allocs.is_empty() {
        lines.push("No periods scheduled.".to_string());
    } else {
        for alloc in allocs {
            let subject = input.subjects.iter().find(|s| s.id == alloc.subject_id).map(|s| s.code.as_str()).unwrap_or("unknown");
            let teacher = input.teachers.iter().find(|t| t.id == alloc.teacher_id).map(|t| t.name.as_str()).unwrap_or("TBD");
            let room = input.rooms.iter().find(|r| r.id == alloc.room_id).map(|r| r.name.as_str()).unwrap_or("TBD");
            lines.push(format!(
                "Day {} Period {}: {} ({}) - {} - Room {}",
                alloc.day, alloc.period + 1, subject, alloc.component, teacher, room
            ));
        }
    }

    Some(lines.join("\n"))
}

/// Render a single teacher's weekly load.
pub fn generate_teacher_schedule(outcome: &GenerationOutcome, input: &EngineInput, teacher_id: TeacherId) -> Option<String> {
    let teacher = input.teachers.iter().find(|t| t.id == teacher_id)?;

    let mut lines = vec![format!("# Timetable for {} ({})", teacher.name, teacher.id), String::new()];

    let mut allocs: Vec<_> = outcome.allocations.iter().filter(|a| a.teacher_id == teacher_id).collect();
    allocs.sort_by_key(|a| (a.day, a.period));

    if allocs.is_empty() {
        lines.push("No periods assigned.".to_string());
    } else {
        lines.push(format!("## Teaching {} periods\n", allocs.len()));
        for alloc in allocs {
            let subject = input.subjects.iter().find(|s| s.id == alloc.subject_id).map(|s| s.code.as_str()).unwrap_or("unknown");
            let room = input.rooms.iter().find(|r| r.id == alloc.room_id).map(|r| r.name.as_str()).unwrap_or("TBD");
            lines.push(format!(
                "- Day {} Period {}: {} ({}) for class {} - Room {}",
                alloc.day, alloc.period + 1, subject, alloc.component, alloc.class_id, room
            ));
        }
    }

    Some(lines.join("\n"))
}
