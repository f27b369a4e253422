//! Phase 5: regular (non-elective) lab blocks. Each requirement is a
//! two-period block that must start at a legal lab period, land in a
//! lab room free for both periods, and not collide with the class's
//! subject-per-day or a fixed lock.

use crate::binding::BindingTable;
use crate::requirements::Requirement;
use crate::rng::EngineRng;
use crate::scheduler::elective_phase::PhaseOutcome;
use crate::scheduler::placement::find_room;
use crate::types::{
    BindingKey, Class, ClassId, Component, RoomKind, Teacher, TeacherId, LAB_STARTS, NUM_DAYS,
};
use crate::world::WorldState;
use std::collections::HashMap;

pub fn run_lab_phase(
    world: &mut WorldState,
    requirements: &[Requirement],
    classes_by_id: &HashMap<ClassId, &Class>,
    rooms: &[crate::types::Room],
    bindings: &BindingTable,
    teachers_by_id: &HashMap<TeacherId, &Teacher>,
    rng: &mut EngineRng,
) -> PhaseOutcome {
    let mut outcome = PhaseOutcome::default();

    let lab_reqs: Vec<&Requirement> = requirements.iter().filter(|r| r.component == Component::Lab).collect();
    let ordered = rng.shuffled(&lab_reqs);

    let mut candidates = Vec::new();
    for day in 0..NUM_DAYS {
        for &start in &LAB_STARTS {
            candidates.push((day, start));
        }
    }

    for req in ordered {
        for _ in 0..req.units {
            let Some(class) = classes_by_id.get(&req.class_id) else {
                outcome.failures.push(format!("lab requirement references unknown class {}", req.class_id));
                continue;
            };
            let Some(teacher_id) = bindings.teacher_for(&BindingKey {
                class_id: req.class_id,
                subject_id: req.subject_id,
                component: Component::Lab,
            }) else {
                outcome.failures.push(format!(
                    "class {} subject {} lab has no bound teacher",
                    req.class_id, req.subject_id
                ));
                continue;
            };

            let teacher_available_on = |day: u8| teachers_by_id.get(&teacher_id).is_some_and(|t| t.is_available_on(day));

            let shuffled_candidates = rng.shuffled(&candidates);
            let mut committed = false;
            for (day, start) in shuffled_candidates {
                if !world.is_class_free(req.class_id, day, start)
                    || !world.is_class_free(req.class_id, day, start + 1)
                    || !world.is_teacher_free(teacher_id, day, start)
                    || !world.is_teacher_free(teacher_id, day, start + 1)
                    || !teacher_available_on(day)
                    || world.has_subject_on_day(req.class_id, day, req.subject_id)
                    || world.is_locked(req.class_id, day, start)
                    || world.is_locked(req.class_id, day, start + 1)
                {
                    continue;
                }
                let Some(room_id) = find_room(world, rooms, class, RoomKind::Lab, day, start, true) else {
                    continue;
                };

                world.add_allocation(crate::types::Allocation {
                    class_id: req.class_id,
                    day,
                    period: start,
                    subject_id: req.subject_id,
                    teacher_id,
                    room_id,
                    component: Component::Lab,
                    is_lab_continuation: false,
                    is_elective: false,
                    basket_id: None,
                });
                world.add_allocation(crate::types::Allocation {
                    class_id: req.class_id,
                    day,
                    period: start + 1,
                    subject_id: req.subject_id,
                    teacher_id,
                    room_id,
                    component: Component::Lab,
                    is_lab_continuation: true,
                    is_elective: false,
                    basket_id: None,
                });
                world.register_lab_block(req.class_id, day, start, req.subject_id, teacher_id, room_id);
                committed = true;
                outcome.added += 1;
                break;
            }

            if !committed {
                outcome.failures.push(format!(
                    "could not place a lab block for class {} subject {}",
                    req.class_id, req.subject_id
                ));
            }
        }
    }

    outcome
}
