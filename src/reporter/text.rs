use crate::scheduler::GenerationOutcome;
use crate::types::{ClassId, EngineInput, SubjectId, TeacherId};
use crate::validator::ValidationReport;
use colored::Colorize;
use std::collections::HashMap;

const DAY_NAMES: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Generate a plain text report (with colors for terminal).
pub fn generate_text_report(outcome: &GenerationOutcome, input: &EngineInput, validation: &ValidationReport) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("          TIMETABLE GENERATION REPORT".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("Elapsed: {}ms", outcome.elapsed_ms));
    lines.push(String::new());

    lines.push("─".repeat(40));
    lines.push("STATISTICS".to_string());
    lines.push("─".repeat(40));
    lines.push(format!("  Allocations:    {}", validation.statistics.total_allocations));
    lines.push(format!("  Classes:        {}", validation.statistics.total_classes));
    lines.push(format!("  Teachers used:  {}", validation.statistics.total_teachers));
    lines.push(format!("  Lab blocks:     {}", validation.statistics.lab_block_count));
    lines.push(format!("  Electives:      {}", validation.statistics.elective_allocation_count));
    lines.push(format!("  Coverage gaps:  {}", outcome.coverage_gaps.len()));
    lines.push(format!("  Score:          {:.1}/100", validation.total_score));
    lines.push(String::new());

    lines.push("─".repeat(40));
    if validation.is_valid {
        lines.push("VALIDATION: PASSED".green().to_string());
    } else {
        lines.push("VALIDATION: FAILED".red().to_string());
        for v in &validation.hard_violations {
            lines.push(format!("  ! {}: {}", v.constraint, v.message));
        }
    }
    lines.push("─".repeat(40));
    lines.push(String::new());

    let subject_names: HashMap<SubjectId, &str> = input.subjects.iter().map(|s| (s.id, s.code.as_str())).collect();
    let teacher_names: HashMap<TeacherId, &str> = input.teachers.iter().map(|t| (t.id, t.name.as_str())).collect();

    lines.push("CLASS TIMETABLES".to_string());
    lines.push("─".repeat(40));

    let mut by_class: HashMap<ClassId, Vec<&crate::types::Allocation>> = HashMap::new();
    for alloc in &outcome.allocations {
        by_class.entry(alloc.class_id).or_default().push(alloc);
    }
    let mut class_ids: Vec<_> = by_class.keys().copied().collect();
    class_ids.sort_by_key(|c| c.0);

    for class_id in class_ids {
        let allocs = &by_class[&class_id];
        lines.push(format!("\n{} ({} periods)", class_id.to_string().bold(), allocs.len()));

        let mut sorted = (*allocs).clone();
        sorted.sort_by_key(|a| (a.day, a.period));
        for alloc in sorted {
            let subject = subject_names.get(&alloc.subject_id).unwrap_or(&"unknown");
            let teacher = teacher_names.get(&alloc.teacher_id).unwrap_or(&"unknown");
            let day_name = DAY_NAMES.get(alloc.day as usize).unwrap_or(&"?");
            let marker = if alloc.is_elective { "◆".yellow() } else { "●".green() };
            lines.push(format!(
                "  {} {} P{} | {} ({}) | {}",
                marker, day_name, alloc.period + 1, subject, alloc.component, teacher
            ));
        }
    }

    lines.push(String::new());
    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick summary to stdout.
pub fn print_summary(outcome: &GenerationOutcome, validation: &ValidationReport) {
    println!();
    if validation.is_valid {
        println!("{}", "✓ Timetable generated successfully".green().bold());
    } else {
        println!("{}", "✗ Timetable has validation errors".red().bold());
    }
    println!();
    println!("  Allocations:   {}", validation.statistics.total_allocations);
    println!("  Coverage gaps: {}", outcome.coverage_gaps.len());
    println!("  Basket gaps:   {}", outcome.basket_gaps.len());
    println!("  Score:         {:.1}/100", validation.total_score);
    println!("  Time:          {}ms", outcome.elapsed_ms);
    println!();
}
