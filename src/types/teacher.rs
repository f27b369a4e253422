use super::{SubjectId, TeacherId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A teacher, their qualifications, and their weekly availability.
/// Immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    /// Maximum teaching hours per week.
    pub max_hours_per_week: u32,
    /// Days this teacher is available at all; a day not in this set
    /// rules out every period on that day.
    pub available_days: HashSet<u8>,
    /// Subjects this teacher is qualified to teach.
    pub qualified_subjects: HashSet<SubjectId>,
    /// Tiebreaker used by the binder when two qualified teachers carry
    /// an equal projected load; higher wins.
    #[serde(default)]
    pub effectiveness_score: f64,
}

impl Teacher {
    /// Whether this teacher is qualified to teach a subject.
    pub fn is_qualified(&self, subject_id: SubjectId) -> bool {
        self.qualified_subjects.contains(&subject_id)
    }

    /// Whether this teacher is available at all on the given day.
    pub fn is_available_on(&self, day: u8) -> bool {
        self.available_days.contains(&day)
    }
}
