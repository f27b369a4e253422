//! Hard invariant checks (§3). Mirrors the teacher crate's
//! check_teacher_conflicts/check_student_conflicts/check_room_conflicts
//! shape, swapped onto Allocation/Teacher/Room/ElectiveBasket and
//! extended with the lab-atomicity and elective-synchronization checks
//! this domain adds.

use crate::types::{Allocation, Component, FixedSlot, LAB_STARTS};
use crate::validator::{Severity, Violation};
use std::collections::{HashMap, HashSet};

fn violation(constraint: &str, message: String) -> Violation {
    Violation {
        constraint: constraint.to_string(),
        message,
        severity: Severity::Error,
    }
}

/// Class, teacher, and room double-booking (invariants 1-3).
pub fn check_uniqueness(allocations: &[Allocation]) -> Vec<Violation> {
    let mut violations = Vec::new();
    violations.extend(check_unique_key(allocations, "ClassUniqueness", |a| {
        (a.class_id.0, a.day, a.period)
    }));
    violations.extend(check_unique_key(allocations, "TeacherUniqueness", |a| {
        (a.teacher_id.0, a.day, a.period)
    }));
    violations.extend(check_unique_key(allocations, "RoomUniqueness", |a| {
        (a.room_id.0, a.day, a.period)
    }));
    violations
}

fn check_unique_key(
    allocations: &[Allocation],
    constraint: &str,
    key_of: impl Fn(&Allocation) -> (u32, u8, u8),
) -> Vec<Violation> {
    let mut seen: HashMap<(u32, u8, u8), &Allocation> = HashMap::new();
    let mut violations = Vec::new();
    for alloc in allocations {
        let key = key_of(alloc);
        if let Some(prev) = seen.get(&key) {
            violations.push(violation(
                constraint,
                format!(
                    "double-booked at D{}P{}: subject {} and subject {}",
                    alloc.day + 1,
                    alloc.period + 1,
                    prev.subject_id,
                    alloc.subject_id
                ),
            ));
        } else {
            seen.insert(key, alloc);
        }
    }
    violations
}

/// Invariant 4: for each (class, day), every subject appears at most
/// once (a lab block counts once; its continuation is skipped).
pub fn check_subject_per_day(allocations: &[Allocation]) -> Vec<Violation> {
    let mut seen: HashMap<(u32, u8), HashSet<u32>> = HashMap::new();
    let mut violations = Vec::new();
    for alloc in allocations {
        if alloc.is_lab_continuation {
            continue;
        }
        let entry = seen.entry((alloc.class_id.0, alloc.day)).or_default();
        if !entry.insert(alloc.subject_id.0) {
            violations.push(violation(
                "SubjectPerDay",
                format!(
                    "class {} has subject {} more than once on day {}",
                    alloc.class_id,
                    alloc.subject_id,
                    alloc.day + 1
                ),
            ));
        }
    }
    violations
}

/// Invariants 5-6: every lab start has a matching continuation at
/// period+1 with identical class/subject/teacher/room, and starts only
/// at a legal lab period.
pub fn check_lab_atomicity(allocations: &[Allocation]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let by_key: HashMap<(u32, u8, u8), &Allocation> = allocations
        .iter()
        .map(|a| ((a.class_id.0, a.day, a.period), a))
        .collect();

    for alloc in allocations {
        if alloc.component != Component::Lab || alloc.is_lab_continuation {
            continue;
        }
        if !LAB_STARTS.contains(&alloc.period) {
            violations.push(violation(
                "LabPlacement",
                format!(
                    "lab for class {} starts at illegal period {}",
                    alloc.class_id,
                    alloc.period + 1
                ),
            ));
        }
        match by_key.get(&(alloc.class_id.0, alloc.day, alloc.period + 1)) {
            Some(cont)
                if cont.is_lab_continuation
                    && cont.subject_id == alloc.subject_id
                    && cont.teacher_id == alloc.teacher_id
                    && cont.room_id == alloc.room_id => {}
            _ => violations.push(violation(
                "LabAtomicity",
                format!(
                    "lab for class {} subject {} at D{}P{} has no matching continuation",
                    alloc.class_id,
                    alloc.subject_id,
                    alloc.day + 1,
                    alloc.period + 1
                ),
            )),
        }
    }
    violations
}

/// Invariant 7: no basket reports zero allocations for a run that
/// claims it was placed. Slot collisions between two baskets are
/// already impossible by construction (World State's basket
/// reservation index refuses a second basket the same slot), so this
/// check exists to catch a regression in that bookkeeping rather than
/// a user-input error.
pub fn check_elective_synchronization(allocations: &[Allocation]) -> Vec<Violation> {
    let mut slots_by_basket: HashMap<u32, HashSet<(u8, u8)>> = HashMap::new();
    for alloc in allocations {
        let Some(basket_id) = alloc.basket_id else {
            continue;
        };
        if alloc.is_lab_continuation {
            continue;
        }
        slots_by_basket
            .entry(basket_id.0)
            .or_default()
            .insert((alloc.day, alloc.period));
    }

    slots_by_basket
        .into_iter()
        .filter(|(_, slots)| slots.is_empty())
        .map(|(basket, _)| violation("ElectiveSynchronization", format!("basket {basket} produced no allocations")))
        .collect()
}

/// Invariant 8: every fixed slot from the input is present verbatim
/// among committed allocations.
pub fn check_fixed_slots_honored(fixed_slots: &[FixedSlot], allocations: &[Allocation]) -> Vec<Violation> {
    fixed_slots
        .iter()
        .filter(|fs| {
            !allocations.iter().any(|a| {
                a.class_id == fs.class_id
                    && a.day == fs.day
                    && a.period == fs.period
                    && a.subject_id == fs.subject_id
                    && a.teacher_id == fs.teacher_id
                    && a.component == fs.component
            })
        })
        .map(|fs| {
            violation(
                "FixedSlotHonor",
                format!(
                    "fixed slot for class {} at D{}P{} not present in output",
                    fs.class_id,
                    fs.day + 1,
                    fs.period + 1
                ),
            )
        })
        .collect()
}

/// Every allocated teacher actually teaches on that day.
pub fn check_teacher_availability(allocations: &[Allocation], teachers: &[crate::types::Teacher]) -> Vec<Violation> {
    let by_id: HashMap<_, _> = teachers.iter().map(|t| (t.id, t)).collect();
    allocations
        .iter()
        .filter_map(|a| {
            let teacher = by_id.get(&a.teacher_id)?;
            if !teacher.is_available_on(a.day) {
                Some(violation(
                    "TeacherAvailability",
                    format!("teacher {} scheduled on unavailable day {}", a.teacher_id, a.day + 1),
                ))
            } else {
                None
            }
        })
        .collect()
}

/// Every allocated room can seat the class placed in it.
pub fn check_room_capacity(
    allocations: &[Allocation],
    classes: &[crate::types::Class],
    rooms: &[crate::types::Room],
) -> Vec<Violation> {
    let class_size: HashMap<_, _> = classes.iter().map(|c| (c.id, c.student_count)).collect();
    let room_capacity: HashMap<_, _> = rooms.iter().map(|r| (r.id, r.capacity)).collect();
    allocations
        .iter()
        .filter_map(|a| {
            let size = class_size.get(&a.class_id)?;
            let capacity = room_capacity.get(&a.room_id)?;
            if size > capacity {
                Some(violation(
                    "RoomCapacity",
                    format!(
                        "room {} (capacity {}) holds class {} ({} students)",
                        a.room_id, capacity, a.class_id, size
                    ),
                ))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassId, RoomId, SubjectId, TeacherId};

    fn alloc(class: u32, day: u8, period: u8, teacher: u32, room: u32) -> Allocation {
        Allocation {
            class_id: ClassId(class),
            day,
            period,
            subject_id: SubjectId(1),
            teacher_id: TeacherId(teacher),
            room_id: RoomId(room),
            component: Component::Theory,
            is_lab_continuation: false,
            is_elective: false,
            basket_id: None,
        }
    }

    #[test]
    fn detects_teacher_conflict() {
        let allocations = vec![alloc(1, 0, 0, 1, 1), alloc(2, 0, 0, 1, 2)];
        let violations = check_uniqueness(&allocations);
        assert!(violations.iter().any(|v| v.constraint == "TeacherUniqueness"));
    }

    #[test]
    fn detects_duplicate_subject_per_day() {
        let allocations = vec![alloc(1, 0, 0, 1, 1), alloc(1, 0, 1, 2, 2)];
        let violations = check_subject_per_day(&allocations);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn accepts_valid_lab_pair() {
        let mut first = alloc(1, 0, 3, 1, 1);
        first.component = Component::Lab;
        let mut second = alloc(1, 0, 4, 1, 1);
        second.component = Component::Lab;
        second.is_lab_continuation = true;
        let violations = check_lab_atomicity(&[first, second]);
        assert!(violations.is_empty());
    }

    #[test]
    fn rejects_illegal_lab_start() {
        let mut first = alloc(1, 0, 0, 1, 1);
        first.component = Component::Lab;
        let mut second = alloc(1, 0, 1, 1, 1);
        second.component = Component::Lab;
        second.is_lab_continuation = true;
        let violations = check_lab_atomicity(&[first, second]);
        assert!(violations.iter().any(|v| v.constraint == "LabPlacement"));
    }
}
