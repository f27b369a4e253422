//! Genetic post-optimization pass (§4.6). Runs between Phase 6 and
//! Phase 7 when `run_optimizer` is set. Grounded on the teacher's
//! optimize_section_balance, which repeatedly tries a local move and
//! keeps it only if it helps — generalized here from a single
//! student-move mutation to two kinds of timetable mutation, each
//! re-validated against every hard invariant before being kept.

use crate::rng::EngineRng;
use crate::types::{Allocation, ClassId, Component, Teacher, LAB_STARTS};
use crate::validator::{
    check_lab_atomicity, check_subject_per_day, check_teacher_availability, check_uniqueness, fitness,
};
use crate::world::WorldState;
use std::collections::HashMap;

const GENERATIONS: u32 = 30;

/// Run the optimizer for a fixed number of generations. Each
/// generation tries one candidate mutation; it is kept only if it
/// strictly improves fitness and introduces no hard-invariant
/// violation, otherwise the pre-mutation snapshot is restored
/// (elitist: the best World State seen is always what survives).
pub fn optimize(world: &mut WorldState, teachers: &[Teacher], rng: &mut EngineRng) {
    let mut best_fitness = fitness(world.allocations());

    for _ in 0..GENERATIONS {
        let snapshot = world.snapshot();

        let mutated = if rng.gen_bool(0.5) {
            try_swap_mutation(world, rng)
        } else {
            try_lab_move_mutation(world, rng)
        };

        if !mutated || !is_hard_valid(world, teachers) {
            world.restore(snapshot);
            continue;
        }

        let candidate_fitness = fitness(world.allocations());
        if candidate_fitness > best_fitness {
            best_fitness = candidate_fitness;
        } else {
            world.restore(snapshot);
        }
    }
}

fn is_hard_valid(world: &WorldState, teachers: &[Teacher]) -> bool {
    let allocations = world.allocations();
    check_uniqueness(allocations).is_empty()
        && check_subject_per_day(allocations).is_empty()
        && check_lab_atomicity(allocations).is_empty()
        && check_teacher_availability(allocations, teachers).is_empty()
}

/// Swap the (day, period) of two non-elective, non-fixed,
/// non-continuation theory/tutorial allocations belonging to the same
/// class.
fn try_swap_mutation(world: &mut WorldState, rng: &mut EngineRng) -> bool {
    let mut by_class: HashMap<ClassId, Vec<usize>> = HashMap::new();
    for (idx, a) in world.allocations().iter().enumerate() {
        if !a.is_elective
            && !a.is_lab_continuation
            && a.component != Component::Lab
            && !world.is_fixed_locked(a.class_id, a.day, a.period)
        {
            by_class.entry(a.class_id).or_default().push(idx);
        }
    }

    let classes_with_pairs: Vec<&Vec<usize>> = by_class.values().filter(|idxs| idxs.len() >= 2).collect();
    if classes_with_pairs.is_empty() {
        return false;
    }
    let idxs = classes_with_pairs[rng.gen_range(0..classes_with_pairs.len())];

    let pick_a = rng.gen_range(0..idxs.len());
    let mut pick_b = rng.gen_range(0..idxs.len());
    if pick_b == pick_a {
        pick_b = (pick_b + 1) % idxs.len();
    }
    let i = idxs[pick_a];
    let j = idxs[pick_b];

    let a = world.allocations()[i].clone();
    let b = world.allocations()[j].clone();

    let removed_a = world.remove_allocation_at(a.class_id, a.day, a.period);
    let removed_b = world.remove_allocation_at(b.class_id, b.day, b.period);
    let (Some(mut a), Some(mut b)) = (removed_a, removed_b) else {
        return false;
    };
    std::mem::swap(&mut a.day, &mut b.day);
    std::mem::swap(&mut a.period, &mut b.period);
    world.add_allocation(a);
    world.add_allocation(b);
    true
}

/// Move an entire lab block to another valid start in {3, 5}.
fn try_lab_move_mutation(world: &mut WorldState, rng: &mut EngineRng) -> bool {
    let blocks: Vec<_> = world.lab_blocks().cloned().collect();
    if blocks.is_empty() {
        return false;
    }
    let block = &blocks[rng.gen_range(0..blocks.len())];

    let candidates: Vec<(u8, u8)> = crate::types::all_slots()
        .into_iter()
        .filter(|p| LAB_STARTS.contains(&p.period))
        .map(|p| (p.day, p.period))
        .filter(|&(day, start)| (day, start) != (block.day, block.start))
        .collect();
    if candidates.is_empty() {
        return false;
    }
    let (new_day, new_start) = candidates[rng.gen_range(0..candidates.len())];

    if !world.is_class_free(block.class_id, new_day, new_start)
        || !world.is_class_free(block.class_id, new_day, new_start + 1)
        || !world.is_teacher_free(block.teacher_id, new_day, new_start)
        || !world.is_teacher_free(block.teacher_id, new_day, new_start + 1)
        || !world.is_room_free(block.room_id, new_day, new_start)
        || !world.is_room_free(block.room_id, new_day, new_start + 1)
        || world.is_locked(block.class_id, new_day, new_start)
        || world.is_locked(block.class_id, new_day, new_start + 1)
    {
        return false;
    }

    world.remove_allocation_at(block.class_id, block.day, block.start);
    world.remove_allocation_at(block.class_id, block.day, block.end());

    world.add_allocation(Allocation {
        class_id: block.class_id,
        day: new_day,
        period: new_start,
        subject_id: block.subject_id,
        teacher_id: block.teacher_id,
        room_id: block.room_id,
        component: Component::Lab,
        is_lab_continuation: false,
        is_elective: false,
        basket_id: None,
    });
    world.add_allocation(Allocation {
        class_id: block.class_id,
        day: new_day,
        period: new_start + 1,
        subject_id: block.subject_id,
        teacher_id: block.teacher_id,
        room_id: block.room_id,
        component: Component::Lab,
        is_lab_continuation: true,
        is_elective: false,
        basket_id: None,
    });
    world.register_lab_block(block.class_id, new_day, new_start, block.subject_id, block.teacher_id, block.room_id);
    true
}
