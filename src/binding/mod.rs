//! Teacher binding (§4.3): resolves the single teacher responsible for
//! each (class, subject, component) requirement. Binding is fixed for
//! the whole run. Grounded on the teacher crate's section_creator,
//! which picks "the teacher with fewest sections who can still take
//! more" — generalized here to projected weekly-hour load with an
//! effectiveness-score tiebreak.

use crate::requirements::Requirement;
use crate::types::{BindingKey, Component, EngineInput, TeacherId};
use std::collections::HashMap;

/// Resolved teacher for every (class, subject, component) that could be
/// bound, plus the ones that could not.
#[derive(Debug, Default)]
pub struct BindingTable {
    pub bindings: HashMap<BindingKey, TeacherId>,
    pub unbound: Vec<BindingKey>,
}

impl BindingTable {
    pub fn teacher_for(&self, key: &BindingKey) -> Option<TeacherId> {
        self.bindings.get(key).copied()
    }
}

fn component_rank(c: Component) -> u8 {
    match c {
        Component::Theory => 0,
        Component::Lab => 1,
        Component::Tutorial => 2,
    }
}

fn requirement_hours(component: Component, units: u8) -> u32 {
    match component {
        Component::Lab => units as u32 * 2,
        _ => units as u32,
    }
}

/// Resolve a teacher for every requirement. `requirements` should
/// include both the regular per-class requirements and a synthetic one
/// per (basket-subject, component) so elective teacher choices share
/// the same projected-load bookkeeping as regular ones.
pub fn build_bindings(input: &EngineInput, requirements: &[Requirement]) -> BindingTable {
    let mut ordered: Vec<&Requirement> = requirements.iter().collect();
    ordered.sort_by_key(|r| (r.class_id.0, r.subject_id.0, component_rank(r.component)));

    let mut projected_load: HashMap<TeacherId, u32> = HashMap::new();
    let mut table = BindingTable::default();

    let fixed: HashMap<BindingKey, TeacherId> = input
        .fixed_assignments
        .iter()
        .map(|fa| {
            (
                BindingKey {
                    class_id: fa.class_id,
                    subject_id: fa.subject_id,
                    component: fa.component,
                },
                fa.teacher_id,
            )
        })
        .collect();

    for req in ordered {
        let key = BindingKey {
            class_id: req.class_id,
            subject_id: req.subject_id,
            component: req.component,
        };
        let hours = requirement_hours(req.component, req.units);

        if let Some(&teacher_id) = fixed.get(&key) {
            *projected_load.entry(teacher_id).or_insert(0) += hours;
            table.bindings.insert(key, teacher_id);
            continue;
        }

        let chosen = input
            .teachers
            .iter()
            .filter(|t| t.is_qualified(req.subject_id))
            .filter(|t| projected_load.get(&t.id).copied().unwrap_or(0) + hours <= t.max_hours_per_week)
            // Subject-per-day means each unit needs a distinct day, so a
            // teacher with fewer available days than units can never
            // actually seat this requirement without violating it.
            .filter(|t| t.available_days.len() >= req.units as usize)
            .min_by(|a, b| {
                let load_a = projected_load.get(&a.id).copied().unwrap_or(0);
                let load_b = projected_load.get(&b.id).copied().unwrap_or(0);
                load_a
                    .cmp(&load_b)
                    .then(b.effectiveness_score.total_cmp(&a.effectiveness_score))
                    .then(a.id.0.cmp(&b.id.0))
            });

        match chosen {
            Some(teacher) => {
                *projected_load.entry(teacher.id).or_insert(0) += hours;
                table.bindings.insert(key, teacher.id);
            }
            None => table.unbound.push(key),
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassId, EngineConfig, SubjectId, Teacher};

    fn teacher(id: u32, subjects: &[u32], max_hours: u32, score: f64) -> Teacher {
        Teacher {
            id: TeacherId(id),
            name: format!("T{id}"),
            max_hours_per_week: max_hours,
            available_days: (0..5).collect(),
            qualified_subjects: subjects.iter().map(|&s| SubjectId(s)).collect(),
            effectiveness_score: score,
        }
    }

    fn input_with(teachers: Vec<Teacher>) -> EngineInput {
        EngineInput {
            teachers,
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
    fn picks_least_loaded_qualified_teacher() {
        let input = input_with(vec![teacher(1, &[10], 40, 1.0), teacher(2, &[10], 40, 1.0)]);
        let reqs = vec![
            Requirement {
                class_id: ClassId(1),
                subject_id: SubjectId(10),
                component: Component::Theory,
                units: 3,
            },
            Requirement {
                class_id: ClassId(2),
                subject_id: SubjectId(10),
                component: Component::Theory,
                units: 3,
            },
        ];

        let table = build_bindings(&input, &reqs);
        assert_eq!(table.unbound.len(), 0);
        let t1 = table.teacher_for(&BindingKey {
            class_id: ClassId(1),
            subject_id: SubjectId(10),
            component: Component::Theory,
        });
        let t2 = table.teacher_for(&BindingKey {
            class_id: ClassId(2),
            subject_id: SubjectId(10),
            component: Component::Theory,
        });
        assert_ne!(t1, t2, "load balancing should spread across both qualified teachers");
    }

    #[test]
    fn leaves_unbound_when_no_teacher_qualifies() {
        let input = input_with(vec![teacher(1, &[99], 40, 1.0)]);
        let reqs = vec![Requirement {
            class_id: ClassId(1),
            subject_id: SubjectId(10),
            component: Component::Theory,
            units: 3,
        }];

        let table = build_bindings(&input, &reqs);
        assert_eq!(table.unbound.len(), 1);
    }
}
