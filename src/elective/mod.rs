//! Elective plan builder (§4.4): for every basket, builds an atomic
//! scheduling plan mapping each participating class to the basket
//! subject it takes and each chosen subject to its bound teacher.
//! Grounded on the teacher crate's room_assigner, which separates
//! "is this placement feasible" from "commit it and update every
//! index" — generalized here to a multi-class, multi-teacher atomic
//! placement instead of a single section/room pairing.

use crate::binding::BindingTable;
use crate::types::{
    BasketId, BindingKey, ClassId, Component, ElectiveBasket, RoomKind, SubjectId, TeacherId,
};
use crate::world::WorldState;
use std::collections::HashMap;

/// The shape of one elective unit to place: either a single theory (or
/// tutorial) period, or a two-period lab block. Modeled as a tagged
/// union rather than two unrelated types so `can_allocate_at`/`commit`
/// can branch on the tag once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    Unit(Component),
    LabBlock,
}

/// An atomic scheduling plan for one basket's theory/tutorial hours or
/// lab blocks. Committing it places one allocation per participating
/// class (two for labs) at a shared (day, period).
#[derive(Debug, Clone)]
pub struct ElectivePlan {
    pub basket_id: BasketId,
    pub kind: PlanKind,
    /// Participating class -> the subject of the basket it takes.
    pub class_subject: HashMap<ClassId, SubjectId>,
    /// Chosen subject -> the teacher bound to teach it for this
    /// component.
    pub subject_teacher: HashMap<SubjectId, TeacherId>,
}

impl ElectivePlan {
    pub fn participating_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.class_subject.keys().copied()
    }

    pub fn teachers(&self) -> impl Iterator<Item = TeacherId> + '_ {
        self.subject_teacher.values().copied()
    }

    /// A plan is never allocatable unless every subject chosen by a
    /// participating class has a bound teacher (see
    /// `build_elective_requirements`/§4.3).
    pub fn fully_bound(&self) -> bool {
        self.class_subject
            .values()
            .all(|s| self.subject_teacher.contains_key(s))
    }

    /// Whether this plan can be committed starting at (day, start).
    pub fn can_allocate_at(
        &self,
        world: &WorldState,
        teachers_by_id: &HashMap<TeacherId, &crate::types::Teacher>,
        day: u8,
        start: u8,
    ) -> bool {
        if !self.fully_bound() {
            return false;
        }
        if world.is_reserved_by_other_basket(day, start, self.basket_id) {
            return false;
        }
        if self.kind == PlanKind::LabBlock && !crate::types::LAB_STARTS.contains(&start) {
            return false;
        }

        for (&class_id, &subject_id) in &self.class_subject {
            if !world.is_class_free(class_id, day, start) {
                return false;
            }
            if self.kind == PlanKind::LabBlock && !world.is_class_free(class_id, day, start + 1) {
                return false;
            }
            if world.has_subject_on_day(class_id, day, subject_id) {
                return false;
            }
        }
        for &teacher_id in self.subject_teacher.values() {
            if !world.is_teacher_free(teacher_id, day, start) {
                return false;
            }
            if self.kind == PlanKind::LabBlock && !world.is_teacher_free(teacher_id, day, start + 1) {
                return false;
            }
            if !teachers_by_id.get(&teacher_id).is_some_and(|t| t.is_available_on(day)) {
                return false;
            }
        }
        true
    }

    /// Commit the plan at (day, start). Finds a capacity-sufficient
    /// room per class from the appropriate pool first; if any room is
    /// missing, nothing is mutated (all-or-nothing).
    pub fn commit(
        &self,
        world: &mut WorldState,
        rooms: &[crate::types::Room],
        classes_by_id: &HashMap<ClassId, &crate::types::Class>,
        day: u8,
        start: u8,
    ) -> bool {
        let wanted_kind = if self.kind == PlanKind::LabBlock {
            RoomKind::Lab
        } else {
            RoomKind::Lecture
        };

        let mut room_for_class: HashMap<ClassId, crate::types::RoomId> = HashMap::new();
        let mut used_rooms: Vec<crate::types::RoomId> = Vec::new();

        for &class_id in self.class_subject.keys() {
            let Some(class) = classes_by_id.get(&class_id) else {
                return false;
            };
            let room = rooms.iter().find(|r| {
                r.kind == wanted_kind
                    && r.fits(class.student_count)
                    && !used_rooms.contains(&r.id)
                    && world.is_room_free(r.id, day, start)
                    && (self.kind != PlanKind::LabBlock || world.is_room_free(r.id, day, start + 1))
            });
            match room {
                Some(r) => {
                    used_rooms.push(r.id);
                    room_for_class.insert(class_id, r.id);
                }
                None => return false,
            }
        }

        let component = match self.kind {
            PlanKind::Unit(c) => c,
            PlanKind::LabBlock => Component::Lab,
        };

        for (&class_id, &subject_id) in &self.class_subject {
            let teacher_id = self.subject_teacher[&subject_id];
            let room_id = room_for_class[&class_id];

            world.add_allocation(crate::types::Allocation {
                class_id,
                day,
                period: start,
                subject_id,
                teacher_id,
                room_id,
                component,
                is_lab_continuation: false,
                is_elective: true,
                basket_id: Some(self.basket_id),
            });

            if self.kind == PlanKind::LabBlock {
                world.add_allocation(crate::types::Allocation {
                    class_id,
                    day,
                    period: start + 1,
                    subject_id,
                    teacher_id,
                    room_id,
                    component,
                    is_lab_continuation: true,
                    is_elective: true,
                    basket_id: Some(self.basket_id),
                });
                world.register_lab_block(class_id, day, start, subject_id, teacher_id, room_id);
            }
        }

        let teacher_ids: Vec<TeacherId> = self.subject_teacher.values().copied().collect();
        world.reserve_elective(self.basket_id, day, start, &teacher_ids);
        if self.kind == PlanKind::LabBlock {
            world.reserve_elective(self.basket_id, day, start + 1, &teacher_ids);
        }

        true
    }
}

/// For each class participating in `basket`, pick the subject it
/// takes: the explicit choice if named, else a subject of the basket
/// the class already lists, else the lowest subject id in the basket
/// (deterministic fallback — see DESIGN.md Open Question).
fn resolve_class_subject_map(
    basket: &ElectiveBasket,
    classes_by_id: &HashMap<ClassId, &crate::types::Class>,
) -> HashMap<ClassId, SubjectId> {
    let explicit: HashMap<ClassId, SubjectId> = basket.class_subject_choice.iter().copied().collect();
    let mut lowest_subject = basket.subjects.clone();
    lowest_subject.sort_by_key(|s| s.0);

    let mut map = HashMap::new();
    for &class_id in &basket.participating_classes {
        if let Some(&subject_id) = explicit.get(&class_id) {
            map.insert(class_id, subject_id);
            continue;
        }
        let fallback = classes_by_id
            .get(&class_id)
            .and_then(|c| c.subjects.iter().find(|s| basket.subjects.contains(s)).copied())
            .or_else(|| lowest_subject.first().copied());
        if let Some(subject_id) = fallback {
            map.insert(class_id, subject_id);
        }
    }
    map
}

/// The unit components a basket can demand, paired with their plan
/// shape and weekly unit count.
fn basket_components(basket: &ElectiveBasket) -> [(Component, PlanKind, u8); 3] {
    [
        (Component::Theory, PlanKind::Unit(Component::Theory), basket.theory_hours),
        (Component::Tutorial, PlanKind::Unit(Component::Tutorial), basket.tutorial_hours),
        (Component::Lab, PlanKind::LabBlock, basket.lab_blocks()),
    ]
}

/// One representative class per subject chosen in the basket — the
/// lowest class id among the classes that picked it. Teacher binding
/// for an elective subject is resolved once per subject (the map is
/// subject -> teacher, not class -> teacher), so a stable
/// representative is needed to key into the shared `BindingTable`.
fn representative_class_per_subject(
    class_subject: &HashMap<ClassId, SubjectId>,
) -> HashMap<SubjectId, ClassId> {
    let mut reps: HashMap<SubjectId, ClassId> = HashMap::new();
    for (&class_id, &subject_id) in class_subject {
        reps.entry(subject_id)
            .and_modify(|best| {
                if class_id.0 < best.0 {
                    *best = class_id;
                }
            })
            .or_insert(class_id);
    }
    reps
}

/// Synthetic per-basket requirements fed into the same teacher binder
/// used for regular (class, subject, component) requirements, so
/// elective teacher choices share its projected-load bookkeeping.
pub fn build_elective_requirements(
    baskets: &[ElectiveBasket],
    classes_by_id: &HashMap<ClassId, &crate::types::Class>,
) -> Vec<crate::requirements::Requirement> {
    let mut reqs = Vec::new();
    for basket in baskets {
        let class_subject = resolve_class_subject_map(basket, classes_by_id);
        let reps = representative_class_per_subject(&class_subject);
        for (component, _, units) in basket_components(basket) {
            if units == 0 {
                continue;
            }
            for &class_id in reps.values() {
                reqs.push(crate::requirements::Requirement {
                    class_id,
                    subject_id: class_subject
                        .iter()
                        .find(|&(&c, _)| c == class_id)
                        .map(|(_, &s)| s)
                        .unwrap(),
                    component,
                    units,
                });
            }
        }
    }
    reqs
}

/// Build the theory, tutorial, and lab plans for one basket.
pub fn build_basket_plans(
    basket: &ElectiveBasket,
    classes_by_id: &HashMap<ClassId, &crate::types::Class>,
    bindings: &BindingTable,
) -> Vec<ElectivePlan> {
    let class_subject = resolve_class_subject_map(basket, classes_by_id);
    if class_subject.is_empty() {
        return vec![];
    }
    let reps = representative_class_per_subject(&class_subject);

    let mut plans = Vec::new();

    for (component, kind, hours) in basket_components(basket) {
        if hours == 0 {
            continue;
        }
        let subject_teacher: HashMap<SubjectId, TeacherId> = reps
            .iter()
            .filter_map(|(&subject_id, &class_id)| {
                let teacher_id = bindings.teacher_for(&BindingKey {
                    class_id,
                    subject_id,
                    component,
                })?;
                Some((subject_id, teacher_id))
            })
            .collect();

        for _ in 0..hours {
            plans.push(ElectivePlan {
                basket_id: basket.id,
                kind,
                class_subject: class_subject.clone(),
                subject_teacher: subject_teacher.clone(),
            });
        }
    }

    plans
}
