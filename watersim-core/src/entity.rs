use crate::vector::Vec2;
use std::fmt;

/// Stable identifier of a simulated entity, never reused within one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element of an atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Hydrogen,
    Oxygen,
}

impl Element {
    pub fn symbol(self) -> &'static str {
        match self {
            Element::Hydrogen => "H",
            Element::Oxygen => "O",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Hydrogen => f.write_str("hydrogen"),
            Element::Oxygen => f.write_str("oxygen"),
        }
    }
}

/// Kind of molecule produced by a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoleculeKind {
    Water,
}

/// What an entity is. Atoms may combine, molecules only bounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Atom(Element),
    Molecule(MoleculeKind),
}

impl EntityKind {
    /// Element of an atom, `None` for molecules
    pub fn element(self) -> Option<Element> {
        match self {
            EntityKind::Atom(element) => Some(element),
            EntityKind::Molecule(_) => None,
        }
    }

    pub fn is_atom(self) -> bool {
        matches!(self, EntityKind::Atom(_))
    }

    pub fn is_molecule(self) -> bool {
        matches!(self, EntityKind::Molecule(_))
    }

    /// Short label a renderer can key its styles on
    pub fn category(self) -> &'static str {
        match self {
            EntityKind::Atom(element) => element.symbol(),
            EntityKind::Molecule(MoleculeKind::Water) => "H2O",
        }
    }

    /// Suggested fill colour
    pub fn color_hint(self) -> &'static str {
        match self {
            EntityKind::Atom(Element::Hydrogen) => "orange",
            EntityKind::Atom(Element::Oxygen) => "purple",
            EntityKind::Molecule(MoleculeKind::Water) => "blue",
        }
    }
}

/// An entity owned by the simulation engine
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half-extent used for wall reflection and drawing (> 0)
    pub radius: f64,
}

impl Entity {
    pub fn atom(id: EntityId, element: Element, pos: Vec2, vel: Vec2, radius: f64) -> Self {
        Self {
            id,
            kind: EntityKind::Atom(element),
            pos,
            vel,
            radius,
        }
    }

    pub fn molecule(id: EntityId, kind: MoleculeKind, pos: Vec2, vel: Vec2, radius: f64) -> Self {
        Self {
            id,
            kind: EntityKind::Molecule(kind),
            pos,
            vel,
            radius,
        }
    }

    pub fn is_element(&self, element: Element) -> bool {
        self.kind == EntityKind::Atom(element)
    }

    /// Detached copy for consumers outside the engine
    pub fn view(&self) -> EntityView {
        EntityView {
            id: self.id,
            kind: self.kind,
            position: self.pos,
            velocity: self.vel,
            radius: self.radius,
        }
    }
}

/// Read-only copy of an entity's state handed to renderers and drivers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
}
