//! Phase 6: theory and tutorial fill. Places the remaining one-period
//! regular requirements into any free, unlocked slot for the class.

use crate::binding::BindingTable;
use crate::requirements::Requirement;
use crate::rng::EngineRng;
use crate::scheduler::elective_phase::PhaseOutcome;
use crate::scheduler::placement::find_room;
use crate::types::{all_slots, BindingKey, Class, ClassId, Component, RoomKind, Teacher, TeacherId};
use crate::world::WorldState;
use std::collections::HashMap;

pub fn run_fill_phase(
    world: &mut WorldState,
    requirements: &[Requirement],
    classes_by_id: &HashMap<ClassId, &Class>,
    rooms: &[crate::types::Room],
    bindings: &BindingTable,
    teachers_by_id: &HashMap<TeacherId, &Teacher>,
    rng: &mut EngineRng,
) -> PhaseOutcome {
    let mut outcome = PhaseOutcome::default();

    let fill_reqs: Vec<&Requirement> = requirements
        .iter()
        .filter(|r| r.component == Component::Theory || r.component == Component::Tutorial)
        .collect();
    let ordered = rng.shuffled(&fill_reqs);
    let slots = rng.shuffled(&all_slots());

    for req in ordered {
        let Some(class) = classes_by_id.get(&req.class_id) else {
            outcome.failures.push(format!("requirement references unknown class {}", req.class_id));
            continue;
        };
        let Some(teacher_id) = bindings.teacher_for(&BindingKey {
            class_id: req.class_id,
            subject_id: req.subject_id,
            component: req.component,
        }) else {
            outcome.failures.push(format!(
                "class {} subject {} {:?} has no bound teacher",
                req.class_id, req.subject_id, req.component
            ));
            continue;
        };

        let teacher_available_on = |day: u8| teachers_by_id.get(&teacher_id).is_some_and(|t| t.is_available_on(day));

        for _ in 0..req.units {
            let mut committed = false;
            for slot in &slots {
                if !world.is_class_free(req.class_id, slot.day, slot.period)
                    || !world.is_teacher_free(teacher_id, slot.day, slot.period)
                    || !teacher_available_on(slot.day)
                    || world.has_subject_on_day(req.class_id, slot.day, req.subject_id)
                    || world.is_locked(req.class_id, slot.day, slot.period)
                {
                    continue;
                }
                let Some(room_id) = find_room(world, rooms, class, RoomKind::Lecture, slot.day, slot.period, false) else {
                    continue;
                };

                world.add_allocation(crate::types::Allocation {
                    class_id: req.class_id,
                    day: slot.day,
                    period: slot.period,
                    subject_id: req.subject_id,
                    teacher_id,
                    room_id,
                    component: req.component,
                    is_lab_continuation: false,
                    is_elective: false,
                    basket_id: None,
                });
                committed = true;
                outcome.added += 1;
                break;
            }
            if !committed {
                outcome.failures.push(format!(
                    "could not place a {:?} period for class {} subject {}",
                    req.component, req.class_id, req.subject_id
                ));
            }
        }
    }

    outcome
}
