use crate::error::Result;
use crate::types::{ClassId, EngineInput, RoomId, SubjectId, TeacherId};
use std::collections::HashSet;

/// Validation result with collected errors and warnings, gathered at
/// load time before Phase 0 ever sees the input.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate referential integrity across every loaded table. This is a
/// load-time concern distinct from Phase 0's own input validation —
/// here we only check that every id another record points at actually
/// exists; Phase 0 owns duplicate-id and capacity checks once the
/// requirement list has been built.
pub fn validate_input(input: &EngineInput) -> Result<ValidationResult> {
    let mut result = ValidationResult::default();

    let teacher_ids: HashSet<TeacherId> = input.teachers.iter().map(|t| t.id).collect();
    let subject_ids: HashSet<SubjectId> = input.subjects.iter().map(|s| s.id).collect();
    let class_ids: HashSet<ClassId> = input.classes.iter().map(|c| c.id).collect();
    let room_ids: HashSet<RoomId> = input.rooms.iter().map(|r| r.id).collect();

    for class in &input.classes {
        for subject_id in &class.subjects {
            if !subject_ids.contains(subject_id) {
                result.add_error(format!("class '{}' references unknown subject '{}'", class.id, subject_id));
            }
        }
    }

    for teacher in &input.teachers {
        for subject_id in &teacher.qualified_subjects {
            if !subject_ids.contains(subject_id) {
                result.add_warning(format!(
                    "teacher '{}' lists unknown subject '{}' among qualifications",
                    teacher.id, subject_id
                ));
            }
        }
    }

    for subject in &input.subjects {
        if let Some(basket_id) = subject.basket_id {
            if !input.baskets.iter().any(|b| b.id == basket_id) {
                result.add_error(format!("subject '{}' references unknown basket '{}'", subject.id, basket_id));
            }
        }
    }

    for basket in &input.baskets {
        for class_id in &basket.participating_classes {
            if !class_ids.contains(class_id) {
                result.add_error(format!("basket '{}' references unknown class '{}'", basket.id, class_id));
            }
        }
        for subject_id in &basket.subjects {
            if !subject_ids.contains(subject_id) {
                result.add_error(format!("basket '{}' references unknown subject '{}'", basket.id, subject_id));
            }
        }
        for (class_id, subject_id) in &basket.class_subject_choice {
            if !basket.participating_classes.contains(class_id) {
                result.add_error(format!(
                    "basket '{}' choice names class '{}' that does not participate in it",
                    basket.id, class_id
                ));
            }
            if !basket.subjects.contains(subject_id) {
                result.add_error(format!(
                    "basket '{}' choice names subject '{}' that is not offered in it",
                    basket.id, subject_id
                ));
            }
        }
    }

    for fs in &input.fixed_slots {
        if !class_ids.contains(&fs.class_id) {
            result.add_error(format!("fixed slot references unknown class '{}'", fs.class_id));
        }
        if !subject_ids.contains(&fs.subject_id) {
            result.add_error(format!("fixed slot references unknown subject '{}'", fs.subject_id));
        }
        if !teacher_ids.contains(&fs.teacher_id) {
            result.add_error(format!("fixed slot references unknown teacher '{}'", fs.teacher_id));
        }
    }

    for fa in &input.fixed_assignments {
        if !class_ids.contains(&fa.class_id) {
            result.add_error(format!("fixed teacher assignment references unknown class '{}'", fa.class_id));
        }
        if !subject_ids.contains(&fa.subject_id) {
            result.add_error(format!("fixed teacher assignment references unknown subject '{}'", fa.subject_id));
        }
        if !teacher_ids.contains(&fa.teacher_id) {
            result.add_error(format!("fixed teacher assignment references unknown teacher '{}'", fa.teacher_id));
        }
    }

    // Every non-elective subject a class carries should have at least
    // one qualified teacher, or Phase 6 will never be able to bind it.
    for class in &input.classes {
        for subject_id in &class.subjects {
            if !input.teachers.iter().any(|t| t.is_qualified(*subject_id)) {
                result.add_warning(format!(
                    "subject '{}' (taken by class '{}') has no qualified teacher",
                    subject_id, class.id
                ));
            }
        }
    }

    if room_ids.is_empty() {
        result.add_warning("no rooms declared; no allocation will ever be placeable".to_string());
    }

    if !result.is_valid() {
        return Err(anyhow::anyhow!(
            "input validation failed with {} errors:\n{}",
            result.errors.len(),
            result.errors.join("\n")
        ));
    }

    Ok(result)
}
