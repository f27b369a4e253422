//! Requirement builder: derives, per (class, subject, component) with
//! positive weekly hours, the number of atomic placement units needed.
//! Grounded on the teacher crate's section_creator, which expands a
//! course's `sections` count into one Section per unit — generalized
//! here from "N sections of a course" to "N placement units of a
//! (class, subject, component)".

use crate::error::{Result, SchedulerError};
use crate::types::{Class, Component, EngineInput, SubjectId};
use std::collections::HashMap;

/// One indivisible placement obligation for a non-elective subject:
/// one period for Theory/Tutorial, one lab block for Lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub class_id: crate::types::ClassId,
    pub subject_id: SubjectId,
    pub component: Component,
    /// How many units of this (class, subject, component) are needed.
    pub units: u8,
}

/// Build every non-elective requirement for the classes in scope.
/// Elective requirements are built separately by the elective plan
/// builder (§4.4), once per basket rather than per class.
pub fn build_requirements(input: &EngineInput) -> Result<Vec<Requirement>> {
    let subjects_by_id: HashMap<SubjectId, &crate::types::Subject> =
        input.subjects.iter().map(|s| (s.id, s)).collect();

    let mut requirements = Vec::new();

    for class in &input.classes {
        for &subject_id in &class.subjects {
            let subject = match subjects_by_id.get(&subject_id) {
                Some(s) => s,
                None => {
                    return Err(SchedulerError::UnknownReference {
                        what: "subject".to_string(),
                        id: subject_id.to_string(),
                    }
                    .into())
                }
            };

            if subject.is_elective() {
                // Electives are requirements of the basket, not the class.
                continue;
            }

            if subject.lab_hours % 2 != 0 {
                return Err(SchedulerError::OddLabHours {
                    subject_id: subject_id.to_string(),
                    lab_hours: subject.lab_hours,
                }
                .into());
            }

            push_requirement(&mut requirements, class, subject_id, Component::Theory, subject.theory_hours);
            push_requirement(&mut requirements, class, subject_id, Component::Tutorial, subject.tutorial_hours);
            push_requirement(&mut requirements, class, subject_id, Component::Lab, subject.lab_blocks());
        }
    }

    Ok(requirements)
}

fn push_requirement(
    out: &mut Vec<Requirement>,
    class: &Class,
    subject_id: SubjectId,
    component: Component,
    units: u8,
) {
    if units > 0 {
        out.push(Requirement {
            class_id: class.id,
            subject_id,
            component,
            units,
        });
    }
}

/// Total weekly periods a requirement list demands of a class (a lab
/// block counts as two periods). Used by Phase 0 to reject classes
/// whose weekly hours exceed their placeable periods.
pub fn total_periods_for_class(requirements: &[Requirement], class_id: crate::types::ClassId) -> u32 {
    requirements
        .iter()
        .filter(|r| r.class_id == class_id)
        .map(|r| match r.component {
            Component::Lab => r.units as u32 * 2,
            _ => r.units as u32,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Class, ClassId, EngineConfig, Subject, SubjectId};

    fn input_with(subjects: Vec<Subject>, classes: Vec<Class>) -> EngineInput {
        EngineInput {
            teachers: vec![],
            subjects,
            classes,
            rooms: vec![],
            baskets: vec![],
            fixed_slots: vec![],
            fixed_assignments: vec![],
            config: EngineConfig::default(),
        }
    }

    #[test]
    fn splits_theory_lab_tutorial_into_units() {
        let subject = Subject {
            id: SubjectId(1),
            code: "CS101".into(),
            theory_hours: 3,
            lab_hours: 2,
            tutorial_hours: 1,
            basket_id: None,
        };
        let class = Class {
            id: ClassId(1),
            semester: 1,
            section: "A".into(),
            student_count: 40,
            subjects: vec![SubjectId(1)],
        };

        let reqs = build_requirements(&input_with(vec![subject], vec![class])).unwrap();
        assert_eq!(reqs.len(), 3);
        assert!(reqs.iter().any(|r| r.component == Component::Theory && r.units == 3));
        assert!(reqs.iter().any(|r| r.component == Component::Lab && r.units == 1));
        assert!(reqs.iter().any(|r| r.component == Component::Tutorial && r.units == 1));
    }

    #[test]
    fn rejects_odd_lab_hours() {
        let subject = Subject {
            id: SubjectId(1),
            code: "CS101".into(),
            theory_hours: 0,
            lab_hours: 3,
            tutorial_hours: 0,
            basket_id: None,
        };
        let class = Class {
            id: ClassId(1),
            semester: 1,
            section: "A".into(),
            student_count: 40,
            subjects: vec![SubjectId(1)],
        };

        assert!(build_requirements(&input_with(vec![subject], vec![class])).is_err());
    }

    #[test]
    fn skips_elective_subjects() {
        let subject = Subject {
            id: SubjectId(1),
            code: "ELEC".into(),
            theory_hours: 3,
            lab_hours: 0,
            tutorial_hours: 0,
            basket_id: Some(crate::types::BasketId(1)),
        };
        let class = Class {
            id: ClassId(1),
            semester: 1,
            section: "A".into(),
            student_count: 40,
            subjects: vec![SubjectId(1)],
        };

        let reqs = build_requirements(&input_with(vec![subject], vec![class])).unwrap();
        assert!(reqs.is_empty());
    }
}
