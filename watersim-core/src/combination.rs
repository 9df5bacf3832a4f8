//! Proximity rule deciding when an oxygen and two hydrogens become water

use crate::entity::{Element, Entity, EntityId};
use crate::vector::distance;

/// Distance below which a hydrogen counts as bonded to an oxygen
pub const DEFAULT_COMBINATION_THRESHOLD: f64 = 50.0;

/// A single combination decided for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combination {
    pub oxygen: EntityId,
    pub hydrogens: [EntityId; 2],
}

impl Combination {
    /// All three consumed ids, oxygen first
    pub fn consumed(&self) -> [EntityId; 3] {
        [self.oxygen, self.hydrogens[0], self.hydrogens[1]]
    }

    pub fn consumes(&self, id: EntityId) -> bool {
        self.consumed().contains(&id)
    }
}

/// Scan `entities` for the first oxygen with at least two hydrogens strictly
/// closer than `threshold`.
///
/// Oxygens are tried in sequence order and the first two qualifying
/// hydrogens (again in sequence order) are taken. Molecules are skipped.
/// At most one combination is returned.
pub fn find_combination(entities: &[Entity], threshold: f64) -> Option<Combination> {
    let (oxygens, hydrogens): (Vec<&Entity>, Vec<&Entity>) = entities
        .iter()
        .filter(|e| e.kind.is_atom())
        .partition(|e| e.is_element(Element::Oxygen));

    for oxygen in oxygens {
        let mut close = hydrogens
            .iter()
            .filter(|h| distance(oxygen.pos, h.pos) < threshold);

        if let (Some(first), Some(second)) = (close.next(), close.next()) {
            return Some(Combination {
                oxygen: oxygen.id,
                hydrogens: [first.id, second.id],
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MoleculeKind;
    use crate::vector::Vec2;

    fn atom(id: u64, element: Element, x: f64, y: f64) -> Entity {
        Entity::atom(EntityId(id), element, Vec2::new(x, y), Vec2::ZERO, 10.0)
    }

    #[test]
    fn picks_first_two_hydrogens_in_order() {
        let entities = vec![
            atom(1, Element::Oxygen, 0.0, 0.0),
            atom(2, Element::Hydrogen, 10.0, 0.0),
            atom(3, Element::Hydrogen, 20.0, 0.0),
            atom(4, Element::Hydrogen, 200.0, 200.0),
        ];
        let c = find_combination(&entities, 50.0).unwrap();
        assert_eq!(c.oxygen, EntityId(1));
        assert_eq!(c.hydrogens, [EntityId(2), EntityId(3)]);
    }

    #[test]
    fn order_beats_proximity() {
        // the farther hydrogen comes first in sequence order and wins
        let entities = vec![
            atom(1, Element::Hydrogen, 40.0, 0.0),
            atom(2, Element::Oxygen, 0.0, 0.0),
            atom(3, Element::Hydrogen, 30.0, 0.0),
            atom(4, Element::Hydrogen, 1.0, 0.0),
        ];
        let c = find_combination(&entities, 50.0).unwrap();
        assert_eq!(c.hydrogens, [EntityId(1), EntityId(3)]);
    }

    #[test]
    fn single_hydrogen_is_not_enough() {
        let entities = vec![
            atom(1, Element::Oxygen, 0.0, 0.0),
            atom(2, Element::Hydrogen, 10.0, 0.0),
            atom(3, Element::Hydrogen, 100.0, 0.0),
        ];
        assert_eq!(find_combination(&entities, 50.0), None);
    }

    #[test]
    fn threshold_is_strict() {
        let entities = vec![
            atom(1, Element::Oxygen, 0.0, 0.0),
            atom(2, Element::Hydrogen, 50.0, 0.0),
            atom(3, Element::Hydrogen, 0.0, 10.0),
        ];
        assert_eq!(find_combination(&entities, 50.0), None);
    }

    #[test]
    fn first_qualifying_oxygen_wins() {
        let entities = vec![
            atom(1, Element::Oxygen, 500.0, 500.0),
            atom(2, Element::Oxygen, 0.0, 0.0),
            atom(3, Element::Oxygen, 5.0, 0.0),
            atom(4, Element::Hydrogen, 10.0, 0.0),
            atom(5, Element::Hydrogen, -10.0, 0.0),
        ];
        let c = find_combination(&entities, 50.0).unwrap();
        assert_eq!(c.oxygen, EntityId(2));
    }

    #[test]
    fn molecules_are_ignored() {
        let entities = vec![
            atom(1, Element::Oxygen, 0.0, 0.0),
            Entity::molecule(EntityId(2), MoleculeKind::Water, Vec2::ZERO, Vec2::ZERO, 20.0),
            atom(3, Element::Hydrogen, 10.0, 0.0),
        ];
        assert_eq!(find_combination(&entities, 50.0), None);
    }

    #[test]
    fn consumed_lists_oxygen_first() {
        let c = Combination {
            oxygen: EntityId(9),
            hydrogens: [EntityId(1), EntityId(2)],
        };
        assert_eq!(c.consumed(), [EntityId(9), EntityId(1), EntityId(2)]);
        assert!(c.consumes(EntityId(2)));
        assert!(!c.consumes(EntityId(3)));
    }
}
