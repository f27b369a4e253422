use super::{ClassId, Component, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

/// A pre-locked user input. The engine must honor it verbatim unless an
/// elective has already claimed the same (class, day, period).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedSlot {
    pub class_id: ClassId,
    pub day: u8,
    pub period: u8,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub component: Component,
}
