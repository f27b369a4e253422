mod coverage;
mod elective_phase;
mod fill_phase;
mod fixed_phase;
mod lab_phase;
mod optimizer;
mod placement;
mod validation;

pub use coverage::{BasketGap, CoverageGap};
pub use elective_phase::PhaseOutcome;

use crate::binding::build_bindings;
use crate::elective::build_elective_requirements;
use crate::error::Result;
use crate::requirements::build_requirements;
use crate::rng::EngineRng;
use crate::types::{Allocation, Class, ClassId, EngineInput, RunOptions, Teacher, TeacherId};
use crate::world::WorldState;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::time::Instant;

/// The outcome of one named phase, folded into the final report.
#[derive(Debug)]
pub struct PhaseResult {
    pub phase_name: &'static str,
    pub added_count: usize,
    pub failures: Vec<String>,
}

/// Everything a finished run needs to assemble a Report (§4.7).
#[derive(Debug)]
pub struct GenerationOutcome {
    pub allocations: Vec<Allocation>,
    pub phase_results: Vec<PhaseResult>,
    pub coverage_gaps: Vec<CoverageGap>,
    pub basket_gaps: Vec<BasketGap>,
    pub elapsed_ms: u64,
}

/// Main entry point: runs Phases 0-8 over `input` and returns the
/// committed allocations plus a per-phase breakdown. Phase 0 is the
/// only phase that can raise an `Err` — everything after it is a soft
/// failure recorded in the phase results (§7).
pub fn generate(input: &EngineInput, options: &RunOptions, quiet: bool) -> Result<GenerationOutcome> {
    let start_time = Instant::now();
    let progress = build_progress_bar(quiet);
    let mut phase_results = Vec::new();
    let mut rng = EngineRng::new(options.seed);
    let mut world = WorldState::new();

    let classes: Vec<&Class> = match &options.restrict_to_classes {
        Some(subset) => input.classes.iter().filter(|c| subset.contains(&c.id)).collect(),
        None => input.classes.iter().collect(),
    };
    let classes_by_id: HashMap<ClassId, &Class> = classes.iter().map(|c| (c.id, *c)).collect();
    let teachers_by_id: HashMap<TeacherId, &Teacher> = input.teachers.iter().map(|t| (t.id, t)).collect();

    progress.set_message("Phase 0: validating input...");
    progress.set_position(0);
    let mut regular_requirements = build_requirements(input)?;
    regular_requirements.retain(|r| classes_by_id.contains_key(&r.class_id));
    validation::validate_input(input, &regular_requirements)?;

    progress.set_message("Phase 1: binding teachers...");
    progress.set_position(11);
    let elective_requirements = build_elective_requirements(&input.baskets, &classes_by_id);
    let mut all_requirements = regular_requirements.clone();
    all_requirements.extend(elective_requirements);
    let bindings = build_bindings(input, &all_requirements);

    progress.set_message("Phase 2: placing elective theory/tutorial...");
    progress.set_position(22);
    let theory_outcome = elective_phase::run_elective_phase(
        &mut world,
        &input.baskets,
        &classes_by_id,
        &input.rooms,
        &bindings,
        &teachers_by_id,
        &mut rng,
        false,
    );
    phase_results.push(fold("Elective theory/tutorial", theory_outcome));

    progress.set_message("Phase 3: placing elective labs...");
    progress.set_position(33);
    let lab_outcome = elective_phase::run_elective_phase(
        &mut world,
        &input.baskets,
        &classes_by_id,
        &input.rooms,
        &bindings,
        &teachers_by_id,
        &mut rng,
        true,
    );
    phase_results.push(fold("Elective lab", lab_outcome));

    progress.set_message("Phase 4: installing fixed slots...");
    progress.set_position(44);
    let fixed_outcome = fixed_phase::run_fixed_phase(&mut world, &input.fixed_slots, &classes_by_id, &input.rooms);
    phase_results.push(fold("Fixed-slot installation", fixed_outcome));

    progress.set_message("Phase 5: placing regular labs...");
    progress.set_position(55);
    let regular_lab_outcome = lab_phase::run_lab_phase(
        &mut world,
        &regular_requirements,
        &classes_by_id,
        &input.rooms,
        &bindings,
        &teachers_by_id,
        &mut rng,
    );
    phase_results.push(fold("Regular labs", regular_lab_outcome));

    progress.set_message("Phase 6: filling theory/tutorial periods...");
    progress.set_position(66);
    let fill_outcome = fill_phase::run_fill_phase(
        &mut world,
        &regular_requirements,
        &classes_by_id,
        &input.rooms,
        &bindings,
        &teachers_by_id,
        &mut rng,
    );
    phase_results.push(fold("Theory & tutorial fill", fill_outcome));

    if options.run_optimizer {
        progress.set_message("Optimizing...");
        progress.set_position(80);
        optimizer::optimize(&mut world, &input.teachers, &mut rng);
    }

    progress.set_message("Phase 7: final validation...");
    progress.set_position(90);
    let report = crate::validator::validate_allocations(world.allocations(), input);
    phase_results.push(PhaseResult {
        phase_name: "Final validation",
        added_count: 0,
        failures: report.hard_violations.iter().map(|v| v.message.clone()).collect(),
    });

    let coverage_gaps = coverage::find_coverage_gaps(&regular_requirements, world.allocations());
    let basket_gaps = coverage::find_basket_gaps(&input.baskets, world.allocations());

    progress.set_message("Phase 8: emitting allocations...");
    progress.set_position(100);
    let mut allocations = world.into_allocations();
    allocations.sort_by_key(|a| a.sort_key());

    progress.finish_with_message("Generation complete");

    Ok(GenerationOutcome {
        allocations,
        phase_results,
        coverage_gaps,
        basket_gaps,
        elapsed_ms: start_time.elapsed().as_millis() as u64,
    })
}

fn fold(phase_name: &'static str, outcome: PhaseOutcome) -> PhaseResult {
    PhaseResult {
        phase_name,
        added_count: outcome.added,
        failures: outcome.failures,
    }
}

fn build_progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BasketId, Class, Component, ElectiveBasket, EngineConfig, FixedSlot, Room, RoomId,
        RoomKind, Subject, SubjectId, Teacher, TeacherId,
    };
    use std::collections::HashSet;

    fn teacher(id: u32, subjects: &[SubjectId]) -> Teacher {
        Teacher {
            id: TeacherId(id),
            name: format!("Teacher {id}"),
            max_hours_per_week: 30,
            available_days: (0..5).collect::<HashSet<u8>>(),
            qualified_subjects: subjects.iter().copied().collect(),
            effectiveness_score: 0.5,
        }
    }

    fn teacher_with_days(id: u32, subjects: &[SubjectId], available_days: &[u8]) -> Teacher {
        Teacher {
            id: TeacherId(id),
            name: format!("Teacher {id}"),
            max_hours_per_week: 30,
            available_days: available_days.iter().copied().collect::<HashSet<u8>>(),
            qualified_subjects: subjects.iter().copied().collect(),
            effectiveness_score: 0.5,
        }
    }

    fn room(id: u32, kind: RoomKind, capacity: u32) -> Room {
        Room { id: RoomId(id), name: format!("Room {id}"), capacity, kind, available: true }
    }

    fn base_input() -> EngineInput {
        EngineInput {
            teachers: vec![],
            subjects: vec![],
            classes: vec![],
            rooms: vec![],
            baskets: vec![],
            fixed_slots: vec![],
            fixed_assignments: vec![],
            config: EngineConfig::default(),
        }
    }

    /// Scenario 1: single class, single theory subject.
    #[test]
    fn single_theory_subject_lands_on_three_distinct_days() {
        let mut input = base_input();
        input.teachers = vec![teacher(1, &[SubjectId(1)])];
        input.subjects = vec![Subject { id: SubjectId(1), code: "S1".into(), theory_hours: 3, lab_hours: 0, tutorial_hours: 0, basket_id: None }];
        input.classes = vec![Class { id: ClassId(1), semester: 1, section: "A".into(), student_count: 60, subjects: vec![SubjectId(1)] }];
        input.rooms = vec![room(1, RoomKind::Lecture, 60)];

        let outcome = generate(&input, &RunOptions { seed: 1, run_optimizer: false, ..Default::default() }, true).unwrap();

        assert_eq!(outcome.allocations.len(), 3);
        let days: HashSet<u8> = outcome.allocations.iter().map(|a| a.day).collect();
        assert_eq!(days.len(), 3);
        assert!(outcome.allocations.iter().all(|a| a.teacher_id == TeacherId(1) && a.room_id == RoomId(1)));
    }

    /// Teacher availability is never violated across the fill, regular
    /// lab, and elective placement phases.
    #[test]
    fn no_allocation_ever_uses_a_teacher_outside_their_available_days() {
        let mut input = base_input();
        input.teachers = vec![
            teacher_with_days(1, &[SubjectId(1)], &[1, 3]),
            teacher_with_days(2, &[SubjectId(2)], &[0, 2, 4]),
            teacher_with_days(3, &[SubjectId(10)], &[1]),
        ];
        input.subjects = vec![
            Subject { id: SubjectId(1), code: "S1".into(), theory_hours: 2, lab_hours: 0, tutorial_hours: 0, basket_id: None },
            Subject { id: SubjectId(2), code: "S2".into(), theory_hours: 0, lab_hours: 2, tutorial_hours: 0, basket_id: None },
            Subject { id: SubjectId(10), code: "E1".into(), theory_hours: 1, lab_hours: 0, tutorial_hours: 0, basket_id: Some(BasketId(1)) },
        ];
        input.classes = vec![Class { id: ClassId(1), semester: 1, section: "A".into(), student_count: 30, subjects: vec![SubjectId(1), SubjectId(2)] }];
        input.rooms = vec![room(1, RoomKind::Lecture, 30), room(2, RoomKind::Lab, 30)];
        input.baskets = vec![ElectiveBasket {
            id: BasketId(1),
            name: "Electives".into(),
            semester: 1,
            theory_hours: 1,
            lab_hours: 0,
            tutorial_hours: 0,
            participating_classes: vec![ClassId(1)],
            subjects: vec![SubjectId(10)],
            class_subject_choice: vec![],
        }];

        let teachers_by_id: HashMap<TeacherId, &Teacher> = input.teachers.iter().map(|t| (t.id, t)).collect();
        for seed in 0..20 {
            let outcome = generate(&input, &RunOptions { seed, run_optimizer: true, ..Default::default() }, true).unwrap();
            for alloc in &outcome.allocations {
                let teacher = teachers_by_id[&alloc.teacher_id];
                assert!(
                    teacher.is_available_on(alloc.day),
                    "seed {seed}: teacher {} scheduled on unavailable day {}",
                    alloc.teacher_id,
                    alloc.day
                );
            }
        }
    }

    /// Scenario 2: lab atomicity.
    #[test]
    fn lab_block_is_atomic_pair_on_same_day() {
        let mut input = base_input();
        input.teachers = vec![teacher(2, &[SubjectId(2)])];
        input.subjects = vec![Subject { id: SubjectId(2), code: "S2".into(), theory_hours: 0, lab_hours: 2, tutorial_hours: 0, basket_id: None }];
        input.classes = vec![Class { id: ClassId(1), semester: 1, section: "A".into(), student_count: 30, subjects: vec![SubjectId(2)] }];
        input.rooms = vec![room(1, RoomKind::Lab, 30)];

        let outcome = generate(&input, &RunOptions { seed: 2, run_optimizer: false, ..Default::default() }, true).unwrap();

        assert_eq!(outcome.allocations.len(), 2);
        assert_eq!(outcome.allocations[0].day, outcome.allocations[1].day);
        let starts: Vec<u8> = outcome.allocations.iter().map(|a| a.period).collect();
        assert!(starts == vec![3, 4] || starts == vec![5, 6]);
        assert!(outcome.allocations.iter().filter(|a| a.is_lab_continuation).count() == 1);
    }

    /// Scenario 3: elective synchronization across three classes.
    #[test]
    fn elective_basket_synchronizes_across_participants() {
        let mut input = base_input();
        input.teachers = vec![teacher(1, &[SubjectId(10)]), teacher(2, &[SubjectId(11)]), teacher(3, &[SubjectId(12)])];
        input.subjects = vec![
            Subject { id: SubjectId(10), code: "A".into(), theory_hours: 3, lab_hours: 0, tutorial_hours: 0, basket_id: Some(BasketId(1)) },
            Subject { id: SubjectId(11), code: "M".into(), theory_hours: 3, lab_hours: 0, tutorial_hours: 0, basket_id: Some(BasketId(1)) },
            Subject { id: SubjectId(12), code: "K".into(), theory_hours: 3, lab_hours: 0, tutorial_hours: 0, basket_id: Some(BasketId(1)) },
        ];
        input.classes = vec![
            Class { id: ClassId(1), semester: 1, section: "A".into(), student_count: 30, subjects: vec![] },
            Class { id: ClassId(2), semester: 1, section: "B".into(), student_count: 30, subjects: vec![] },
            Class { id: ClassId(3), semester: 1, section: "C".into(), student_count: 30, subjects: vec![] },
        ];
        input.rooms = vec![room(1, RoomKind::Lecture, 40), room(2, RoomKind::Lecture, 40), room(3, RoomKind::Lecture, 40)];
        input.baskets = vec![ElectiveBasket {
            id: BasketId(1),
            name: "Electives".into(),
            semester: 1,
            theory_hours: 3,
            lab_hours: 0,
            tutorial_hours: 0,
            participating_classes: vec![ClassId(1), ClassId(2), ClassId(3)],
            subjects: vec![SubjectId(10), SubjectId(11), SubjectId(12)],
            class_subject_choice: vec![(ClassId(1), SubjectId(10)), (ClassId(2), SubjectId(11)), (ClassId(3), SubjectId(12))],
        }];

        let outcome = generate(&input, &RunOptions { seed: 3, run_optimizer: false, ..Default::default() }, true).unwrap();

        assert_eq!(outcome.allocations.len(), 9);
        let mut by_slot: HashMap<(u8, u8), Vec<&Allocation>> = HashMap::new();
        for a in &outcome.allocations {
            by_slot.entry((a.day, a.period)).or_default().push(a);
        }
        assert_eq!(by_slot.len(), 3);
        for allocs in by_slot.values() {
            assert_eq!(allocs.len(), 3);
            let classes: HashSet<ClassId> = allocs.iter().map(|a| a.class_id).collect();
            assert_eq!(classes.len(), 3);
            let teachers: HashSet<TeacherId> = allocs.iter().map(|a| a.teacher_id).collect();
            assert_eq!(teachers.len(), 3);
        }
    }

    /// Scenario 4: fixed-slot honor.
    #[test]
    fn fixed_slot_is_committed_verbatim() {
        let mut input = base_input();
        input.teachers = vec![teacher(1, &[SubjectId(1)])];
        input.subjects = vec![Subject { id: SubjectId(1), code: "S1".into(), theory_hours: 3, lab_hours: 0, tutorial_hours: 0, basket_id: None }];
        input.classes = vec![Class { id: ClassId(1), semester: 1, section: "A".into(), student_count: 30, subjects: vec![SubjectId(1)] }];
        input.rooms = vec![room(1, RoomKind::Lecture, 30)];
        input.fixed_slots = vec![FixedSlot { class_id: ClassId(1), day: 0, period: 0, subject_id: SubjectId(1), teacher_id: TeacherId(1), component: Component::Theory }];

        let outcome = generate(&input, &RunOptions { seed: 4, run_optimizer: false, ..Default::default() }, true).unwrap();

        assert!(outcome.allocations.iter().any(|a| a.class_id == ClassId(1) && a.day == 0 && a.period == 0 && a.subject_id == SubjectId(1)));
        let day_zero_period_zero: Vec<_> = outcome.allocations.iter().filter(|a| a.class_id == ClassId(1) && a.day == 0 && a.period == 0).collect();
        assert_eq!(day_zero_period_zero.len(), 1);
    }

    /// Scenario 5: a shared teacher across two classes never double-books.
    #[test]
    fn shared_teacher_never_double_booked() {
        let mut input = base_input();
        input.teachers = vec![teacher(1, &[SubjectId(1)])];
        input.subjects = vec![Subject { id: SubjectId(1), code: "S1".into(), theory_hours: 4, lab_hours: 0, tutorial_hours: 0, basket_id: None }];
        input.classes = vec![
            Class { id: ClassId(1), semester: 1, section: "A".into(), student_count: 30, subjects: vec![SubjectId(1)] },
            Class { id: ClassId(2), semester: 1, section: "B".into(), student_count: 30, subjects: vec![SubjectId(1)] },
        ];
        input.rooms = vec![room(1, RoomKind::Lecture, 30), room(2, RoomKind::Lecture, 30)];

        let outcome = generate(&input, &RunOptions { seed: 5, run_optimizer: false, ..Default::default() }, true).unwrap();

        let mut seen: HashSet<(u8, u8)> = HashSet::new();
        for a in outcome.allocations.iter().filter(|a| a.teacher_id == TeacherId(1)) {
            assert!(seen.insert((a.day, a.period)), "teacher double-booked at ({}, {})", a.day, a.period);
        }
    }

    /// Scenario 6: infeasible basket is reported, never raised. Nobody
    /// is qualified to teach the basket's only subject, so its plans
    /// never bind a teacher and the whole basket goes unscheduled —
    /// that must surface as a basket gap, not a panic or an `Err`.
    #[test]
    fn infeasible_basket_is_reported_not_raised() {
        let mut input = base_input();
        input.teachers = vec![teacher(1, &[SubjectId(1)])];
        input.subjects = vec![
            Subject { id: SubjectId(10), code: "A".into(), theory_hours: 3, lab_hours: 0, tutorial_hours: 0, basket_id: Some(BasketId(1)) },
            Subject { id: SubjectId(1), code: "FILL".into(), theory_hours: 7, lab_hours: 0, tutorial_hours: 0, basket_id: None },
        ];
        input.classes = vec![Class { id: ClassId(1), semester: 1, section: "A".into(), student_count: 30, subjects: vec![SubjectId(1)] }];
        input.rooms = vec![room(1, RoomKind::Lecture, 30)];
        input.baskets = vec![ElectiveBasket {
            id: BasketId(1),
            name: "Electives".into(),
            semester: 1,
            theory_hours: 3,
            lab_hours: 0,
            tutorial_hours: 0,
            participating_classes: vec![ClassId(1)],
            subjects: vec![SubjectId(10)],
            class_subject_choice: vec![],
        }];

        let result = generate(&input, &RunOptions { seed: 6, run_optimizer: false, ..Default::default() }, true);
        assert!(result.is_ok());
        let outcome = result.unwrap();
        assert!(outcome.allocations.iter().all(|a| a.basket_id != Some(BasketId(1))));
        assert!(outcome.basket_gaps.iter().any(|g| g.basket_id == BasketId(1)));
    }

    /// Round-trip determinism: identical inputs and seed reproduce a
    /// byte-identical (after canonical sort) allocation list.
    #[test]
    fn identical_seed_reproduces_identical_output() {
        let mut input = base_input();
        input.teachers = vec![teacher(1, &[SubjectId(1)]), teacher(2, &[SubjectId(2)])];
        input.subjects = vec![
            Subject { id: SubjectId(1), code: "S1".into(), theory_hours: 3, lab_hours: 0, tutorial_hours: 1, basket_id: None },
            Subject { id: SubjectId(2), code: "S2".into(), theory_hours: 2, lab_hours: 2, tutorial_hours: 0, basket_id: None },
        ];
        input.classes = vec![Class { id: ClassId(1), semester: 1, section: "A".into(), student_count: 30, subjects: vec![SubjectId(1), SubjectId(2)] }];
        input.rooms = vec![room(1, RoomKind::Lecture, 30), room(2, RoomKind::Lab, 30)];

        let options = RunOptions { seed: 99, ..Default::default() };
        let first = generate(&input, &options, true).unwrap();
        let second = generate(&input, &options, true).unwrap();
        assert_eq!(first.allocations, second.allocations);
    }
}
