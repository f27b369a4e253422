use super::{BasketId, SubjectId};
use serde::{Deserialize, Serialize};

/// A subject offering. A subject is non-elective iff `basket_id` is
/// empty; `lab_hours` must be an even number of periods (one lab block
/// is two periods).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub code: String,
    #[serde(default)]
    pub theory_hours: u8,
    #[serde(default)]
    pub lab_hours: u8,
    #[serde(default)]
    pub tutorial_hours: u8,
    #[serde(default)]
    pub basket_id: Option<BasketId>,
}

impl Subject {
    pub fn is_elective(&self) -> bool {
        self.basket_id.is_some()
    }

    /// Number of two-period lab blocks this subject needs per week.
    pub fn lab_blocks(&self) -> u8 {
        self.lab_hours / 2
    }
}
