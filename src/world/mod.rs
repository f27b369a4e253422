//! World State: the single source of truth during generation. Tracks
//! what has been committed and answers free/busy queries in O(1).

use crate::types::{
    Allocation, BasketId, ClassId, Component, RoomId, SubjectId, TeacherId,
};
use std::collections::{HashMap, HashSet};

/// The atomic pair of allocations covering one lab session.
#[derive(Debug, Clone)]
pub struct LabBlock {
    pub class_id: ClassId,
    pub day: u8,
    pub start: u8,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
}

impl LabBlock {
    pub fn end(&self) -> u8 {
        self.start + 1
    }
}

/// In-memory append-only record of committed allocations with O(1)
/// busy-slot indices per teacher, class, room, and basket, plus a
/// lab-block registry and a per-(class, day) subject set.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    allocations: Vec<Allocation>,
    class_busy: HashMap<ClassId, HashSet<(u8, u8)>>,
    teacher_busy: HashMap<TeacherId, HashSet<(u8, u8)>>,
    room_busy: HashMap<RoomId, HashSet<(u8, u8)>>,
    class_day_subjects: HashMap<(ClassId, u8), HashSet<SubjectId>>,
    lab_blocks: HashMap<(ClassId, u8, u8), LabBlock>,
    /// (day, period) -> basket-id for elective reservations.
    basket_reservations: HashMap<(u8, u8), BasketId>,
    /// (class, day, period) locked by a fixed slot.
    fixed_locks: HashSet<(ClassId, u8, u8)>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn into_allocations(self) -> Vec<Allocation> {
        self.allocations
    }

    pub fn is_class_free(&self, class_id: ClassId, day: u8, period: u8) -> bool {
        !self
            .class_busy
            .get(&class_id)
            .is_some_and(|s| s.contains(&(day, period)))
    }

    pub fn is_teacher_free(&self, teacher_id: TeacherId, day: u8, period: u8) -> bool {
        !self
            .teacher_busy
            .get(&teacher_id)
            .is_some_and(|s| s.contains(&(day, period)))
    }

    pub fn is_room_free(&self, room_id: RoomId, day: u8, period: u8) -> bool {
        !self
            .room_busy
            .get(&room_id)
            .is_some_and(|s| s.contains(&(day, period)))
    }

    pub fn has_subject_on_day(&self, class_id: ClassId, day: u8, subject_id: SubjectId) -> bool {
        self.class_day_subjects
            .get(&(class_id, day))
            .is_some_and(|s| s.contains(&subject_id))
    }

    /// True for elective-reserved or fixed slots.
    pub fn is_locked(&self, class_id: ClassId, day: u8, period: u8) -> bool {
        self.basket_reservations.contains_key(&(day, period))
            || self.fixed_locks.contains(&(class_id, day, period))
    }

    pub fn is_reserved_by_other_basket(&self, day: u8, period: u8, basket_id: BasketId) -> bool {
        self.basket_reservations
            .get(&(day, period))
            .is_some_and(|&b| b != basket_id)
    }

    pub fn lab_block_at(&self, class_id: ClassId, day: u8, start: u8) -> Option<&LabBlock> {
        self.lab_blocks.get(&(class_id, day, start))
    }

    pub fn lab_blocks(&self) -> impl Iterator<Item = &LabBlock> {
        self.lab_blocks.values()
    }

    /// Append an allocation and update every index. Unchecked: the
    /// caller guarantees feasibility.
    pub fn add_allocation(&mut self, entry: Allocation) {
        let key = (entry.day, entry.period);
        self.class_busy.entry(entry.class_id).or_default().insert(key);
        self.teacher_busy.entry(entry.teacher_id).or_default().insert(key);
        self.room_busy.entry(entry.room_id).or_default().insert(key);
        self.class_day_subjects
            .entry((entry.class_id, entry.day))
            .or_default()
            .insert(entry.subject_id);
        self.allocations.push(entry);
    }

    /// Mark a class/day/period as fixed-slot locked, so electives never
    /// reserve over it and the optimizer never mutates it.
    pub fn lock_fixed(&mut self, class_id: ClassId, day: u8, period: u8) {
        self.fixed_locks.insert((class_id, day, period));
    }

    pub fn is_fixed_locked(&self, class_id: ClassId, day: u8, period: u8) -> bool {
        self.fixed_locks.contains(&(class_id, day, period))
    }

    /// Records the atomic pair of a lab session. Caller must have
    /// already committed both allocations via `add_allocation`.
    pub fn register_lab_block(
        &mut self,
        class_id: ClassId,
        day: u8,
        start: u8,
        subject_id: SubjectId,
        teacher_id: TeacherId,
        room_id: RoomId,
    ) {
        self.lab_blocks.insert(
            (class_id, day, start),
            LabBlock {
                class_id,
                day,
                start,
                subject_id,
                teacher_id,
                room_id,
            },
        );
    }

    /// Marks (day, period) as owned by this basket so other baskets
    /// cannot collide on it. `teacher_ids` is accepted for symmetry
    /// with the spec's operation signature; teacher occupancy itself is
    /// tracked per-allocation via `teacher_busy`.
    pub fn reserve_elective(&mut self, basket_id: BasketId, day: u8, period: u8, _teacher_ids: &[TeacherId]) {
        self.basket_reservations.insert((day, period), basket_id);
    }

    /// Full clone used by the optimizer for coarse-grained rollback
    /// where a targeted undo isn't worth the bookkeeping (e.g. before a
    /// generation of many candidate mutations).
    pub fn snapshot(&self) -> WorldState {
        self.clone()
    }

    pub fn restore(&mut self, snapshot: WorldState) {
        *self = snapshot;
    }

    /// Remove the allocation(s) touching this (class, day, period) and
    /// clear the corresponding index entries. Used by the optimizer's
    /// targeted swap/move undo so it doesn't need a full snapshot per
    /// mutation.
    pub fn remove_allocation_at(&mut self, class_id: ClassId, day: u8, period: u8) -> Option<Allocation> {
        let idx = self
            .allocations
            .iter()
            .position(|a| a.class_id == class_id && a.day == day && a.period == period)?;
        let removed = self.allocations.remove(idx);
        let key = (day, period);
        if let Some(s) = self.class_busy.get_mut(&class_id) {
            s.remove(&key);
        }
        if let Some(s) = self.teacher_busy.get_mut(&removed.teacher_id) {
            s.remove(&key);
        }
        if let Some(s) = self.room_busy.get_mut(&removed.room_id) {
            s.remove(&key);
        }
        let still_present = self
            .allocations
            .iter()
            .any(|a| a.class_id == class_id && a.day == day && a.subject_id == removed.subject_id);
        if !still_present {
            if let Some(s) = self.class_day_subjects.get_mut(&(class_id, day)) {
                s.remove(&removed.subject_id);
            }
        }
        Some(removed)
    }

    /// Component enum re-exported for callers that only have a World
    /// State handle; kept here so the module is self-contained for
    /// callers iterating allocations by component.
    pub fn allocations_by_component(&self, component: Component) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter().filter(move |a| a.component == component)
    }
}
