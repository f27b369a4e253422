use super::{BasketId, ClassId, SubjectId};
use serde::{Deserialize, Serialize};

/// A named group of interchangeable subjects offered to several classes
/// of the same semester, all scheduled at the same (day, period). All
/// subjects in the basket carry identical weekly hours, and each
/// participating class takes exactly one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectiveBasket {
    pub id: BasketId,
    pub name: String,
    pub semester: u8,
    #[serde(default)]
    pub theory_hours: u8,
    #[serde(default)]
    pub lab_hours: u8,
    #[serde(default)]
    pub tutorial_hours: u8,
    pub participating_classes: Vec<ClassId>,
    pub subjects: Vec<SubjectId>,
    /// Explicit (class -> subject) selection where the input names it;
    /// classes absent from this map fall back to whatever subject of
    /// the basket they already list, or a deterministic pick.
    #[serde(default)]
    pub class_subject_choice: Vec<(ClassId, SubjectId)>,
}

impl ElectiveBasket {
    pub fn lab_blocks(&self) -> u8 {
        self.lab_hours / 2
    }
}
