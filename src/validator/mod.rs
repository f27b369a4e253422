//! Validation entry point: re-checks every global invariant from §3
//! against a finished (or in-progress) allocation set, and scores the
//! soft constraints from §4.6. Mirrors the teacher crate's
//! validate_schedule/ValidationReport shape.

mod hard_constraints;
mod soft_constraints;

pub use hard_constraints::*;
pub use soft_constraints::*;

use crate::types::{Allocation, EngineInput};

/// Result of validating an allocation set.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub hard_violations: Vec<Violation>,
    pub soft_scores: Vec<SoftScore>,
    pub total_score: f64,
    pub statistics: AllocationStatistics,
}

/// A violated hard invariant.
#[derive(Debug, Clone)]
pub struct Violation {
    pub constraint: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// Score for one soft constraint.
#[derive(Debug, Clone)]
pub struct SoftScore {
    pub constraint: String,
    pub score: f64,
    pub max_score: f64,
    pub details: String,
}

/// Aggregate counters over an allocation set.
#[derive(Debug, Clone)]
pub struct AllocationStatistics {
    pub total_allocations: usize,
    pub total_classes: usize,
    pub total_teachers: usize,
    pub lab_block_count: usize,
    pub elective_allocation_count: usize,
}

/// Re-check every global invariant from §3 and score the soft
/// constraints from §4.6. Called by Phase 7 (soft — reported, not
/// fatal) and by the CLI's `validate` subcommand.
pub fn validate_allocations(allocations: &[Allocation], input: &EngineInput) -> ValidationReport {
    let mut hard_violations = Vec::new();
    hard_violations.extend(check_uniqueness(allocations));
    hard_violations.extend(check_subject_per_day(allocations));
    hard_violations.extend(check_lab_atomicity(allocations));
    hard_violations.extend(check_elective_synchronization(allocations));
    hard_violations.extend(check_fixed_slots_honored(&input.fixed_slots, allocations));
    hard_violations.extend(check_teacher_availability(allocations, &input.teachers));
    hard_violations.extend(check_room_capacity(allocations, &input.classes, &input.rooms));

    let soft_scores = calculate_soft_scores(allocations);
    let statistics = calculate_statistics(allocations, input);

    let is_valid = hard_violations.iter().all(|v| v.severity != Severity::Error);
    let total_score = if !is_valid {
        0.0
    } else {
        let soft_total: f64 = soft_scores.iter().map(|s| s.score).sum();
        let soft_max: f64 = soft_scores.iter().map(|s| s.max_score).sum();
        if soft_max > 0.0 {
            (soft_total / soft_max) * 100.0
        } else {
            100.0
        }
    };

    ValidationReport {
        is_valid,
        hard_violations,
        soft_scores,
        total_score,
        statistics,
    }
}

fn calculate_statistics(allocations: &[Allocation], input: &EngineInput) -> AllocationStatistics {
    use std::collections::HashSet;

    let total_teachers = allocations
        .iter()
        .map(|a| a.teacher_id)
        .collect::<HashSet<_>>()
        .len();

    let lab_block_count = allocations
        .iter()
        .filter(|a| a.component == crate::types::Component::Lab && !a.is_lab_continuation)
        .count();

    let elective_allocation_count = allocations.iter().filter(|a| a.is_elective).count();

    AllocationStatistics {
        total_allocations: allocations.len(),
        total_classes: input.classes.len(),
        total_teachers,
        lab_block_count,
        elective_allocation_count,
    }
}
