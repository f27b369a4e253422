use super::{ClassId, SubjectId};
use serde::{Deserialize, Serialize};

/// A class (section of a cohort). Non-elective subjects listed here
/// must carry a matching semester number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub semester: u8,
    pub section: String,
    pub student_count: u32,
    /// Non-elective subjects this class takes.
    pub subjects: Vec<SubjectId>,
}

impl Class {
    pub fn takes_subject(&self, subject_id: SubjectId) -> bool {
        self.subjects.contains(&subject_id)
    }
}
