use crate::scheduler::GenerationOutcome;
use crate::types::{ClassId, EngineInput, SubjectId, TeacherId};
use crate::validator::ValidationReport;
use std::collections::HashMap;

const DAY_NAMES: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Generate a markdown report of a completed run.
pub fn generate_markdown_report(outcome: &GenerationOutcome, input: &EngineInput, validation: &ValidationReport) -> String {
    let mut lines = vec![
        "# Timetable Generation Report".to_string(),
        String::new(),
        format!("Elapsed: {}ms", outcome.elapsed_ms),
        String::new(),
    ];

    lines.push("## Summary\n".to_string());
    lines.push("| Metric | Value |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!("| Total allocations | {} |", validation.statistics.total_allocations));
    lines.push(format!("| Classes | {} |", validation.statistics.total_classes));
    lines.push(format!("| Teachers used | {} |", validation.statistics.total_teachers));
    lines.push(format!("| Lab blocks | {} |", validation.statistics.lab_block_count));
    lines.push(format!("| Elective allocations | {} |", validation.statistics.elective_allocation_count));
    lines.push(format!("| Overall score | {:.1}/100 |", validation.total_score));
    lines.push(String::new());

    if validation.is_valid {
        lines.push("## Validation: ✅ PASSED\n".to_string());
    } else {
        lines.push("## Validation: ❌ FAILED\n".to_string());
        for violation in &validation.hard_violations {
            lines.push(format!("- **{}**: {}", violation.constraint, violation.message));
        }
        lines.push(String::new());
    }

    lines.push("## Soft Constraint Scores\n".to_string());
    for score in &validation.soft_scores {
        let pct = if score.max_score > 0.0 { (score.score / score.max_score) * 100.0 } else { 100.0 };
        lines.push(format!("- **{}**: {:.1}% ({})", score.constraint, pct, score.details));
    }
    lines.push(String::new());

    lines.push("## Phase Results\n".to_string());
    lines.push("| Phase | Added | Failures |".to_string());
    lines.push("|-------|-------|----------|".to_string());
    for phase in &outcome.phase_results {
        lines.push(format!("| {} | {} | {} |", phase.phase_name, phase.added_count, phase.failures.len()));
    }
    lines.push(String::new());

    let subject_names: HashMap<SubjectId, &str> = input.subjects.iter().map(|s| (s.id, s.code.as_str())).collect();
    let teacher_names: HashMap<TeacherId, &str> = input.teachers.iter().map(|t| (t.id, t.name.as_str())).collect();

    lines.push("## Class Timetables\n".to_string());
    let mut by_class: HashMap<ClassId, Vec<&crate::types::Allocation>> = HashMap::new();
    for alloc in &outcome.allocations {
        by_class.entry(alloc.class_id).or_default().push(alloc);
    }
    let mut class_ids: Vec<_> = by_class.keys().copied().collect();
    class_ids.sort_by_key(|c| c.0);

    for class_id in class_ids {
        let class_label = input.classes.iter().find(|c| c.id == class_id).map(|c| format!("Sem {} {}", c.semester, c.section));
        lines.push(format!("### Class {} ({})\n", class_id, class_label.unwrap_or_else(|| "unknown".to_string())));
        lines.push("| Day | Period | Subject | Component | Teacher |".to_string());
        lines.push("|-----|--------|---------|-----------|---------|".to_string());

        let mut allocs = by_class[&class_id].clone();
        allocs.sort_by_key(|a| (a.day, a.period));
        for alloc in allocs {
            let subject = subject_names.get(&alloc.subject_id).unwrap_or(&"unknown");
            let teacher = teacher_names.get(&alloc.teacher_id).unwrap_or(&"unknown");
            let day_name = DAY_NAMES.get(alloc.day as usize).unwrap_or(&"?");
            lines.push(format!(
                "| {} | P{} | {} | {} | {} |",
                day_name,
                alloc.period + 1,
                subject,
                alloc.component,
                teacher
            ));
        }
        lines.push(String::new());
    }

    if !outcome.coverage_gaps.is_empty() {
        lines.push("## Coverage Gaps\n".to_string());
        lines.push("| Class | Subject | Component | Missing units |".to_string());
        lines.push("|-------|---------|-----------|----------------|".to_string());
        for gap in &outcome.coverage_gaps {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                gap.class_id, gap.subject_id, gap.component, gap.missing_units
            ));
        }
        lines.push(String::new());
    }

    if !outcome.basket_gaps.is_empty() {
        lines.push("## Baskets Not Fully Scheduled\n".to_string());
        for gap in &outcome.basket_gaps {
            let classes = gap.unscheduled_classes.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ");
            lines.push(format!("- Basket {}: unscheduled classes [{}]", gap.basket_id, classes));
        }
    }

    lines.join("\n")
}
