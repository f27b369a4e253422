use super::{ClassId, Component, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

/// A single (class, subject, component) teaching obligation requiring a
/// teacher assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BindingKey {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub component: Component,
}

/// A pre-locked (class, subject, component) -> teacher assignment
/// supplied as input, persisted in the `fixed_teacher_assignments`
/// table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedTeacherAssignment {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub component: Component,
    pub teacher_id: TeacherId,
}
