use criterion::{black_box, criterion_group, criterion_main, Criterion};
use timetable_engine::scheduler::generate;
use timetable_engine::types::{
    Class, ClassId, EngineConfig, EngineInput, ElectiveBasket, BasketId, Room, RoomId, RoomKind,
    RunOptions, Subject, SubjectId, Teacher, TeacherId,
};
use std::collections::HashSet;

fn sample_input(num_classes: u32) -> EngineInput {
    let subjects = vec![
        Subject { id: SubjectId(1), code: "MATH".into(), theory_hours: 4, lab_hours: 0, tutorial_hours: 1, basket_id: None },
        Subject { id: SubjectId(2), code: "ENG".into(), theory_hours: 3, lab_hours: 0, tutorial_hours: 0, basket_id: None },
        Subject { id: SubjectId(3), code: "SCI".into(), theory_hours: 3, lab_hours: 2, tutorial_hours: 0, basket_id: None },
        Subject { id: SubjectId(4), code: "ART".into(), theory_hours: 2, lab_hours: 0, tutorial_hours: 0, basket_id: Some(BasketId(1)) },
        Subject { id: SubjectId(5), code: "MUSIC".into(), theory_hours: 2, lab_hours: 0, tutorial_hours: 0, basket_id: Some(BasketId(1)) },
    ];

    let mut teachers = Vec::new();
    for i in 0..num_classes.max(2) {
        teachers.push(Teacher {
            id: TeacherId(i + 1),
            name: format!("Teacher {i}"),
            max_hours_per_week: 30,
            available_days: (0..5).collect::<HashSet<u8>>(),
            qualified_subjects: [SubjectId(1), SubjectId(2), SubjectId(3), SubjectId(4), SubjectId(5)].into_iter().collect(),
            effectiveness_score: 0.8,
        });
    }

    let mut classes = Vec::new();
    for i in 0..num_classes {
        classes.push(Class {
            id: ClassId(i + 1),
            semester: 1,
            section: format!("S{i}"),
            student_count: 30,
            subjects: vec![SubjectId(1), SubjectId(2), SubjectId(3)],
        });
    }

    let rooms = vec![
        Room { id: RoomId(1), name: "Lecture A".into(), capacity: 40, kind: RoomKind::Lecture, available: true },
        Room { id: RoomId(2), name: "Lecture B".into(), capacity: 40, kind: RoomKind::Lecture, available: true },
        Room { id: RoomId(3), name: "Lab A".into(), capacity: 30, kind: RoomKind::Lab, available: true },
    ];

    let baskets = vec![ElectiveBasket {
        id: BasketId(1),
        name: "Creative".into(),
        semester: 1,
        theory_hours: 2,
        lab_hours: 0,
        tutorial_hours: 0,
        participating_classes: classes.iter().map(|c| c.id).collect(),
        subjects: vec![SubjectId(4), SubjectId(5)],
        class_subject_choice: vec![],
    }];

    EngineInput {
        teachers,
        subjects,
        classes,
        rooms,
        baskets,
        fixed_slots: vec![],
        fixed_assignments: vec![],
        config: EngineConfig::default(),
    }
}

fn bench_generate(c: &mut Criterion) {
    let input = sample_input(10);
    let options = RunOptions { seed: 42, ..Default::default() };

    c.bench_function("generate_10_classes", |b| {
        b.iter(|| {
            let outcome = generate(black_box(&input), black_box(&options), true).unwrap();
            black_box(outcome.allocations.len())
        })
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
