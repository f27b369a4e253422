//! Phase 4: fixed-slot installation. Pre-locked user input is honored
//! verbatim unless an elective has already claimed the same (class,
//! day, period) in Phase 2/3, in which case the conflict is reported
//! rather than overwriting the elective placement.

use crate::scheduler::elective_phase::PhaseOutcome;
use crate::scheduler::placement::find_room;
use crate::types::{Allocation, Class, ClassId, Component, FixedSlot, Room, RoomKind};
use crate::world::WorldState;
use std::collections::HashMap;

/// A FixedSlot carries no room column in the persisted layout (§6), so
/// the engine still has to pick one — same as the other placement
/// phases, just honoring the caller's fixed (day, period) instead of
/// searching for one.
pub fn run_fixed_phase(
    world: &mut WorldState,
    fixed_slots: &[FixedSlot],
    classes_by_id: &HashMap<ClassId, &Class>,
    rooms: &[Room],
) -> PhaseOutcome {
    let mut outcome = PhaseOutcome::default();

    for fs in fixed_slots {
        if world.is_locked(fs.class_id, fs.day, fs.period) {
            outcome.failures.push(format!(
                "fixed slot for class {} at D{}P{} conflicts with an elective reservation",
                fs.class_id,
                fs.day + 1,
                fs.period + 1
            ));
            continue;
        }
        if !world.is_class_free(fs.class_id, fs.day, fs.period)
            || !world.is_teacher_free(fs.teacher_id, fs.day, fs.period)
        {
            outcome.failures.push(format!(
                "fixed slot for class {} at D{}P{} conflicts with an already-committed allocation",
                fs.class_id,
                fs.day + 1,
                fs.period + 1
            ));
            continue;
        }

        let Some(class) = classes_by_id.get(&fs.class_id) else {
            outcome.failures.push(format!("fixed slot references unknown class {}", fs.class_id));
            continue;
        };
        let kind = if fs.component == Component::Lab { RoomKind::Lab } else { RoomKind::Lecture };
        let Some(room_id) = find_room(world, rooms, class, kind, fs.day, fs.period, false) else {
            outcome.failures.push(format!(
                "no room available for fixed slot of class {} at D{}P{}",
                fs.class_id,
                fs.day + 1,
                fs.period + 1
            ));
            continue;
        };

        world.add_allocation(Allocation {
            class_id: fs.class_id,
            day: fs.day,
            period: fs.period,
            subject_id: fs.subject_id,
            teacher_id: fs.teacher_id,
            room_id,
            component: fs.component,
            is_lab_continuation: false,
            is_elective: false,
            basket_id: None,
        });
        world.lock_fixed(fs.class_id, fs.day, fs.period);
        outcome.added += 1;
    }

    outcome
}
