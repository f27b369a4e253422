//! Shared room-picking helper for the regular (non-elective) placement
//! phases. Grounded on the teacher crate's room_assigner, which
//! separates "find a suitable room" from "commit the assignment" —
//! generalized here to a single-class, single-or-double-period query
//! instead of a whole-section periods list.

use crate::types::{Class, Room, RoomId, RoomKind};
use crate::world::WorldState;

/// First room of `kind` that fits `class` and is free at `day, start`
/// (and `start + 1` when `needs_second_period` is set).
pub fn find_room(
    world: &WorldState,
    rooms: &[Room],
    class: &Class,
    kind: RoomKind,
    day: u8,
    start: u8,
    needs_second_period: bool,
) -> Option<RoomId> {
    rooms
        .iter()
        .find(|r| {
            r.kind == kind
                && r.fits(class.student_count)
                && world.is_room_free(r.id, day, start)
                && (!needs_second_period || world.is_room_free(r.id, day, start + 1))
        })
        .map(|r| r.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassId, RoomId as RId};

    fn room(id: u32, capacity: u32, kind: RoomKind) -> Room {
        Room {
            id: RId(id),
            name: format!("R{id}"),
            capacity,
            kind,
            available: true,
        }
    }

    fn class(size: u32) -> Class {
        Class {
            id: ClassId(1),
            semester: 1,
            section: "A".into(),
            student_count: size,
            subjects: vec![],
        }
    }

    #[test]
    fn skips_rooms_that_are_too_small() {
        let rooms = vec![room(1, 10, RoomKind::Lecture), room(2, 50, RoomKind::Lecture)];
        let world = WorldState::new();
        let found = find_room(&world, &rooms, &class(40), RoomKind::Lecture, 0, 0, false);
        assert_eq!(found, Some(RId(2)));
    }

    #[test]
    fn requires_both_periods_free_for_labs() {
        let rooms = vec![room(1, 50, RoomKind::Lab)];
        let mut world = WorldState::new();
        world.add_allocation(crate::types::Allocation {
            class_id: ClassId(9),
            day: 0,
            period: 4,
            subject_id: crate::types::SubjectId(1),
            teacher_id: crate::types::TeacherId(1),
            room_id: RId(1),
            component: crate::types::Component::Lab,
            is_lab_continuation: true,
            is_elective: false,
            basket_id: None,
        });
        let found = find_room(&world, &rooms, &class(40), RoomKind::Lab, 0, 3, true);
        assert_eq!(found, None);
    }
}
