//! Soft scoring (§4.6): the genetic optimizer's fitness function.
//! Mirrors the teacher crate's score_required_courses/
//! score_elective_preferences/score_section_balance shape — one
//! SoftScore per concern, summed into a single fitness value the
//! optimizer maximizes.

use crate::types::{Allocation, NUM_PERIODS};
use crate::validator::SoftScore;
use std::collections::HashMap;

/// Calculate every soft score for the current allocation set.
pub fn calculate_soft_scores(allocations: &[Allocation]) -> Vec<SoftScore> {
    vec![
        score_teacher_consecutive_load(allocations),
        score_teacher_daily_balance(allocations),
        score_last_period_avoidance(allocations),
        score_free_period_compactness(allocations),
    ]
}

/// Total fitness: the sum of every soft score. Used by the optimizer to
/// rank candidate World States.
pub fn fitness(allocations: &[Allocation]) -> f64 {
    calculate_soft_scores(allocations).iter().map(|s| s.score).sum()
}

/// Penalizes a teacher holding 3 or more consecutive taught periods on
/// one day. Each run of length L >= 3 costs (L - 2) points out of a
/// ceiling equal to the number of (teacher, day) pairs observed.
fn score_teacher_consecutive_load(allocations: &[Allocation]) -> SoftScore {
    let mut periods_by_teacher_day: HashMap<(u32, u8), Vec<u8>> = HashMap::new();
    for a in allocations {
        periods_by_teacher_day
            .entry((a.teacher_id.0, a.day))
            .or_default()
            .push(a.period);
    }

    let mut penalty = 0.0;
    for periods in periods_by_teacher_day.values_mut() {
        periods.sort_unstable();
        periods.dedup();
        let mut run = 1usize;
        for window in periods.windows(2) {
            if window[1] == window[0] + 1 {
                run += 1;
            } else {
                if run >= 3 {
                    penalty += (run - 2) as f64;
                }
                run = 1;
            }
        }
        if run >= 3 {
            penalty += (run - 2) as f64;
        }
    }

    let ceiling = periods_by_teacher_day.len() as f64 * NUM_PERIODS as f64;
    let score = (ceiling - penalty).max(0.0);

    SoftScore {
        constraint: "TeacherConsecutiveLoad".to_string(),
        score,
        max_score: ceiling,
        details: format!("{penalty:.0} penalty points across {} teacher-days", periods_by_teacher_day.len()),
    }
}

/// Rewards evenly spread daily teaching load per teacher (low variance
/// in periods-taught-per-day is better).
fn score_teacher_daily_balance(allocations: &[Allocation]) -> SoftScore {
    let mut counts_by_teacher: HashMap<u32, HashMap<u8, u32>> = HashMap::new();
    for a in allocations {
        *counts_by_teacher
            .entry(a.teacher_id.0)
            .or_default()
            .entry(a.day)
            .or_insert(0) += 1;
    }

    let mut total_variance = 0.0;
    for daily_counts in counts_by_teacher.values() {
        let values: Vec<f64> = daily_counts.values().map(|&c| c as f64).collect();
        if values.is_empty() {
            continue;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        total_variance += variance;
    }

    let teacher_count = counts_by_teacher.len().max(1) as f64;
    let avg_variance = total_variance / teacher_count;
    let max_score = 100.0;
    let score = (max_score - avg_variance * 10.0).max(0.0);

    SoftScore {
        constraint: "TeacherDailyBalance".to_string(),
        score,
        max_score,
        details: format!("average daily-load variance {avg_variance:.2} across {teacher_count:.0} teachers"),
    }
}

/// Penalizes allocations landing in the final period of the day.
fn score_last_period_avoidance(allocations: &[Allocation]) -> SoftScore {
    let last_period = NUM_PERIODS - 1;
    let total = allocations.len().max(1) as f64;
    let last_period_count = allocations.iter().filter(|a| a.period == last_period).count() as f64;

    let score = ((total - last_period_count) / total) * 100.0;

    SoftScore {
        constraint: "LastPeriodAvoidance".to_string(),
        score,
        max_score: 100.0,
        details: format!("{last_period_count:.0}/{total:.0} allocations fall in the last period"),
    }
}

/// Penalizes fragmented free periods within a class's day — a single
/// free block is preferred over several scattered single-period gaps.
fn score_free_period_compactness(allocations: &[Allocation]) -> SoftScore {
    let mut busy_by_class_day: HashMap<(u32, u8), Vec<bool>> = HashMap::new();
    for a in allocations {
        let slots = busy_by_class_day
            .entry((a.class_id.0, a.day))
            .or_insert_with(|| vec![false; NUM_PERIODS as usize]);
        if (a.period as usize) < slots.len() {
            slots[a.period as usize] = true;
        }
    }

    let mut total_gaps = 0.0;
    let mut day_count = 0.0;
    for slots in busy_by_class_day.values() {
        day_count += 1.0;
        let mut gaps = 0;
        let mut in_gap = false;
        let first_busy = slots.iter().position(|&b| b);
        let last_busy = slots.iter().rposition(|&b| b);
        if let (Some(first), Some(last)) = (first_busy, last_busy) {
            for &busy in &slots[first..=last] {
                if !busy && !in_gap {
                    gaps += 1;
                    in_gap = true;
                } else if busy {
                    in_gap = false;
                }
            }
        }
        total_gaps += gaps as f64;
    }

    let avg_gaps = if day_count > 0.0 { total_gaps / day_count } else { 0.0 };
    let max_score = 100.0;
    let score = (max_score - avg_gaps * 20.0).max(0.0);

    SoftScore {
        constraint: "FreePeriodCompactness".to_string(),
        score,
        max_score,
        details: format!("average {avg_gaps:.2} free-period fragments per class-day"),
    }
}
