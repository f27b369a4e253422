//! Phases 2 (elective theory/tutorial) and 3 (elective lab). Walks
//! every basket's plans from the elective plan builder, trying each
//! shuffled (day, period) candidate until one commits.

use crate::binding::BindingTable;
use crate::elective::{build_basket_plans, ElectivePlan, PlanKind};
use crate::rng::EngineRng;
use crate::types::{all_slots, Class, ClassId, ElectiveBasket, Room, Teacher, TeacherId};
use crate::world::WorldState;
use std::collections::HashMap;

/// One phase's worth of attempted-but-not-placed plans.
#[derive(Debug, Default)]
pub struct PhaseOutcome {
    pub added: usize,
    pub failures: Vec<String>,
}

/// Run every basket's theory/tutorial unit plans (Phase 2) or lab-block
/// plans (Phase 3), depending on `want_labs`.
#[allow(clippy::too_many_arguments)]
pub fn run_elective_phase(
    world: &mut WorldState,
    baskets: &[ElectiveBasket],
    classes_by_id: &HashMap<ClassId, &Class>,
    rooms: &[Room],
    bindings: &BindingTable,
    teachers_by_id: &HashMap<TeacherId, &Teacher>,
    rng: &mut EngineRng,
    want_labs: bool,
) -> PhaseOutcome {
    let mut outcome = PhaseOutcome::default();
    let slots = rng.shuffled(&all_slots());

    let baskets_order = rng.shuffled(&baskets.iter().collect::<Vec<_>>());

    for basket in baskets_order {
        let plans = build_basket_plans(basket, classes_by_id, bindings);
        for plan in plans {
            let is_lab = plan.kind == PlanKind::LabBlock;
            if is_lab != want_labs {
                continue;
            }
            if place_plan(world, &plan, classes_by_id, rooms, teachers_by_id, &slots) {
                outcome.added += 1;
            } else {
                outcome.failures.push(format!(
                    "basket {} could not place a {} unit",
                    basket.id,
                    if is_lab { "lab" } else { "theory/tutorial" }
                ));
            }
        }
    }

    outcome
}

fn place_plan(
    world: &mut WorldState,
    plan: &ElectivePlan,
    classes_by_id: &HashMap<ClassId, &Class>,
    rooms: &[Room],
    teachers_by_id: &HashMap<TeacherId, &Teacher>,
    slots: &[crate::types::Period],
) -> bool {
    for slot in slots {
        if plan.can_allocate_at(world, teachers_by_id, slot.day, slot.period)
            && plan.commit(world, rooms, classes_by_id, slot.day, slot.period)
        {
            return true;
        }
    }
    false
}
