//! Coverage-gap accounting for the result reporter (§4.7): for every
//! non-elective requirement, how many of its units never got placed;
//! and which elective baskets never produced an allocation for one of
//! their participating classes.

use crate::requirements::Requirement;
use crate::types::{Allocation, ClassId, Component, ElectiveBasket, SubjectId};
use std::collections::HashMap;

/// A required teaching unit the engine could not fully place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageGap {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub component: Component,
    pub missing_units: u8,
}

/// A basket that left at least one participating class unscheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketGap {
    pub basket_id: crate::types::BasketId,
    pub unscheduled_classes: Vec<ClassId>,
}

/// Count committed units per (class, subject, component) and diff
/// against the regular requirement list. A lab block's start and
/// continuation both carry `Component::Lab`, so we only count starts.
pub fn find_coverage_gaps(requirements: &[Requirement], allocations: &[Allocation]) -> Vec<CoverageGap> {
    let mut placed: HashMap<(ClassId, SubjectId, Component), u32> = HashMap::new();
    for alloc in allocations {
        if alloc.is_elective || alloc.is_lab_continuation {
            continue;
        }
        *placed.entry((alloc.class_id, alloc.subject_id, alloc.component)).or_insert(0) += 1;
    }

    let mut gaps = Vec::new();
    for req in requirements {
        let have = *placed.get(&(req.class_id, req.subject_id, req.component)).unwrap_or(&0);
        let needed = req.units as u32;
        if have < needed {
            gaps.push(CoverageGap {
                class_id: req.class_id,
                subject_id: req.subject_id,
                component: req.component,
                missing_units: (needed - have) as u8,
            });
        }
    }
    gaps
}

/// A basket is "fully scheduled" when every participating class has at
/// least one committed elective allocation belonging to that basket.
pub fn find_basket_gaps(baskets: &[ElectiveBasket], allocations: &[Allocation]) -> Vec<BasketGap> {
    let mut scheduled_classes: HashMap<crate::types::BasketId, Vec<ClassId>> = HashMap::new();
    for alloc in allocations {
        if let Some(basket_id) = alloc.basket_id {
            scheduled_classes.entry(basket_id).or_default().push(alloc.class_id);
        }
    }

    let mut gaps = Vec::new();
    for basket in baskets {
        let scheduled = scheduled_classes.get(&basket.id);
        let unscheduled: Vec<ClassId> = basket
            .participating_classes
            .iter()
            .copied()
            .filter(|c| !scheduled.map(|v| v.contains(c)).unwrap_or(false))
            .collect();
        if !unscheduled.is_empty() {
            gaps.push(BasketGap {
                basket_id: basket.id,
                unscheduled_classes: unscheduled,
            });
        }
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BasketId, RoomId, TeacherId};

    #[test]
    fn reports_missing_units_when_nothing_committed() {
        let reqs = vec![Requirement {
            class_id: ClassId(1),
            subject_id: SubjectId(1),
            component: Component::Theory,
            units: 3,
        }];
        let gaps = find_coverage_gaps(&reqs, &[]);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].missing_units, 3);
    }

    #[test]
    fn no_gap_when_all_units_placed() {
        let reqs = vec![Requirement {
            class_id: ClassId(1),
            subject_id: SubjectId(1),
            component: Component::Theory,
            units: 2,
        }];
        let allocs = vec![
            alloc(ClassId(1), SubjectId(1), Component::Theory, 0, 0),
            alloc(ClassId(1), SubjectId(1), Component::Theory, 1, 0),
        ];
        assert!(find_coverage_gaps(&reqs, &allocs).is_empty());
    }

    #[test]
    fn basket_gap_when_a_class_never_gets_scheduled() {
        let basket = ElectiveBasket {
            id: BasketId(1),
            name: "Electives".into(),
            semester: 1,
            theory_hours: 3,
            lab_hours: 0,
            tutorial_hours: 0,
            participating_classes: vec![ClassId(1), ClassId(2)],
            subjects: vec![SubjectId(1), SubjectId(2)],
            class_subject_choice: vec![],
        };
        let mut a = alloc(ClassId(1), SubjectId(1), Component::Theory, 0, 0);
        a.is_elective = true;
        a.basket_id = Some(BasketId(1));
        let gaps = find_basket_gaps(&[basket], &[a]);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].unscheduled_classes, vec![ClassId(2)]);
    }

    fn alloc(class_id: ClassId, subject_id: SubjectId, component: Component, day: u8, period: u8) -> Allocation {
        Allocation {
            class_id,
            day,
            period,
            subject_id,
            teacher_id: TeacherId(1),
            room_id: RoomId(1),
            component,
            is_lab_continuation: false,
            is_elective: false,
            basket_id: None,
        }
    }
}
