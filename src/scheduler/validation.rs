//! Phase 0: input validation. Runs before any allocation is attempted;
//! a failure here raises through `Result` rather than surfacing as a
//! phase-level soft failure, since nothing downstream can proceed.

use crate::error::{Result, SchedulerError};
use crate::requirements::{total_periods_for_class, Requirement};
use crate::types::{EngineInput, NUM_DAYS, NUM_PERIODS};
use std::collections::HashSet;

/// Validate duplicate ids, empty baskets, and per-class weekly hours
/// against placeable periods. Odd lab hours are already rejected by
/// `requirements::build_requirements`, which Phase 0 calls as part of
/// this check.
pub fn validate_input(input: &EngineInput, requirements: &[Requirement]) -> Result<()> {
    check_duplicates("teacher", input.teachers.iter().map(|t| t.id.to_string()))?;
    check_duplicates("subject", input.subjects.iter().map(|s| s.id.to_string()))?;
    check_duplicates("class", input.classes.iter().map(|c| c.id.to_string()))?;
    check_duplicates("room", input.rooms.iter().map(|r| r.id.to_string()))?;
    check_duplicates("basket", input.baskets.iter().map(|b| b.id.to_string()))?;

    for basket in &input.baskets {
        if basket.participating_classes.is_empty() || basket.subjects.is_empty() {
            return Err(SchedulerError::EmptyBasket {
                basket_id: basket.id.to_string(),
            }
            .into());
        }
    }

    let placeable = NUM_DAYS as u32 * NUM_PERIODS as u32;
    for class in &input.classes {
        let needed = total_periods_for_class(requirements, class.id);
        if needed > placeable {
            return Err(SchedulerError::HoursExceedCapacity {
                class_id: class.id.to_string(),
                needed,
                available: placeable,
            }
            .into());
        }
    }

    Ok(())
}

fn check_duplicates(id_type: &str, ids: impl Iterator<Item = String>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            return Err(SchedulerError::DuplicateId {
                id_type: id_type.to_string(),
                id,
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Class, ClassId, EngineConfig, Room, RoomId, RoomKind, Subject, SubjectId, Teacher, TeacherId};

    fn minimal_input() -> EngineInput {
        EngineInput {
            teachers: vec![],
            subjects: vec![],
            classes: vec![],
            rooms: vec![],
            baskets: vec![],
            fixed_slots: vec![],
            fixed_assignments: vec![],
            config: EngineConfig::default(),
        }
    }

    #[test]
    fn rejects_duplicate_teacher_ids() {
        let mut input = minimal_input();
        input.teachers = vec![
            Teacher {
                id: TeacherId(1),
                name: "A".into(),
                max_hours_per_week: 10,
                available_days: (0..5).collect(),
                qualified_subjects: HashSet::new(),
                effectiveness_score: 0.0,
            },
            Teacher {
                id: TeacherId(1),
                name: "B".into(),
                max_hours_per_week: 10,
                available_days: (0..5).collect(),
                qualified_subjects: HashSet::new(),
                effectiveness_score: 0.0,
            },
        ];
        assert!(validate_input(&input, &[]).is_err());
    }

    #[test]
    fn rejects_hours_exceeding_capacity() {
        let mut input = minimal_input();
        input.classes = vec![Class {
            id: ClassId(1),
            semester: 1,
            section: "A".into(),
            student_count: 10,
            subjects: vec![],
        }];
        let reqs = vec![Requirement {
            class_id: ClassId(1),
            subject_id: SubjectId(1),
            component: crate::types::Component::Theory,
            units: 40,
        }];
        assert!(validate_input(&input, &reqs).is_err());
    }

    #[test]
    fn rejects_empty_basket() {
        let mut input = minimal_input();
        input.baskets = vec![crate::types::ElectiveBasket {
            id: crate::types::BasketId(1),
            name: "Electives".into(),
            semester: 1,
            theory_hours: 3,
            lab_hours: 0,
            tutorial_hours: 0,
            participating_classes: vec![],
            subjects: vec![],
            class_subject_choice: vec![],
        }];
        assert!(validate_input(&input, &[]).is_err());
    }

    #[test]
    fn accepts_well_formed_input() {
        let mut input = minimal_input();
        input.rooms = vec![Room {
            id: RoomId(1),
            name: "R1".into(),
            capacity: 40,
            kind: RoomKind::Lecture,
            available: true,
        }];
        input.subjects = vec![Subject {
            id: SubjectId(1),
            code: "CS".into(),
            theory_hours: 3,
            lab_hours: 0,
            tutorial_hours: 0,
            basket_id: None,
        }];
        assert!(validate_input(&input, &[]).is_ok());
    }
}
