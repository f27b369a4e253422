use crate::error::Result;
use crate::scheduler::GenerationOutcome;
use crate::types::Allocation;

/// The emitted allocation list, exactly as the engine produced it.
pub fn generate_json_report(outcome: &GenerationOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(&outcome.allocations)?)
}

/// Summary statistics as JSON, for callers that only want the headline
/// numbers rather than the full allocation list.
#[derive(serde::Serialize)]
pub struct JsonSummary {
    pub total_allocations: usize,
    pub coverage_gap_count: usize,
    pub basket_gap_count: usize,
    pub elapsed_ms: u64,
    pub score: f64,
}

pub fn generate_json_summary(outcome: &GenerationOutcome, score: f64) -> Result<String> {
    let summary = JsonSummary {
        total_allocations: outcome.allocations.len(),
        coverage_gap_count: outcome.coverage_gaps.len(),
        basket_gap_count: outcome.basket_gaps.len(),
        elapsed_ms: outcome.elapsed_ms,
        score,
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}

pub fn allocations_from_json(json: &str) -> Result<Vec<Allocation>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::GenerationOutcome;
    use crate::types::{ClassId, Component, RoomId, SubjectId, TeacherId};

    fn sample_outcome() -> GenerationOutcome {
        GenerationOutcome {
            allocations: vec![
                Allocation {
                    class_id: ClassId(1),
                    day: 0,
                    period: 0,
                    subject_id: SubjectId(1),
                    teacher_id: TeacherId(1),
                    room_id: RoomId(1),
                    component: Component::Theory,
                    is_lab_continuation: false,
                    is_elective: false,
                    basket_id: None,
                },
                Allocation {
                    class_id: ClassId(1),
                    day: 2,
                    period: 3,
                    subject_id: SubjectId(2),
                    teacher_id: TeacherId(2),
                    room_id: RoomId(2),
                    component: Component::Lab,
                    is_lab_continuation: false,
                    is_elective: false,
                    basket_id: None,
                },
            ],
            phase_results: vec![],
            coverage_gaps: vec![],
            basket_gaps: vec![],
            elapsed_ms: 12,
        }
    }

    #[test]
    fn allocation_list_json_round_trips() {
        let outcome = sample_outcome();
        let json = generate_json_report(&outcome).unwrap();
        let parsed = allocations_from_json(&json).unwrap();
        assert_eq!(parsed, outcome.allocations);
    }

    #[test]
    fn json_summary_snapshot() {
        let outcome = sample_outcome();
        let summary = generate_json_summary(&outcome, 87.5).unwrap();
        insta::assert_snapshot!(summary);
    }
}
