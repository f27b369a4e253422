use super::{BasketId, ClassId, Component, RoomId, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};

/// A single committed (class, day, period, subject, teacher, room,
/// component) record — the atomic output unit. Created only by the
/// engine; never mutated once committed within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub class_id: ClassId,
    pub day: u8,
    pub period: u8,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub component: Component,
    pub is_lab_continuation: bool,
    pub is_elective: bool,
    pub basket_id: Option<BasketId>,
}

impl Allocation {
    /// Sort key used for the canonical ordering the determinism
    /// contract is checked against: (class, day, period).
    pub fn sort_key(&self) -> (u32, u8, u8) {
        (self.class_id.0, self.day, self.period)
    }
}
