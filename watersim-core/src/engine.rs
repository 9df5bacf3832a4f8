use crate::boundary::Domain;
use crate::combination::{find_combination, Combination};
use crate::config::{AtomCounts, SimConfig};
use crate::entity::{Element, Entity, EntityId, EntityKind, EntityView, MoleculeKind};
use crate::error::ConfigurationError;
use crate::vector::{Motion, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A combination that happened, as seen after the tick completed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinationRecord {
    /// Tick (1-based) during which the combination was applied
    pub tick: u64,
    pub combination: Combination,
    pub molecule: EntityId,
    /// Oxygen's position after the move phase, where the molecule appears
    pub position: Vec2,
}

/// The entity collection inside a fixed domain
#[derive(Debug)]
pub struct World {
    pub entities: Vec<Entity>,
    pub domain: Domain,
}

impl World {
    pub fn new(domain: Domain) -> Self {
        Self {
            entities: Vec::new(),
            domain,
        }
    }

    /// Move phase: advance every entity one tick with wall reflection
    pub fn move_all(&mut self) {
        let domain = self.domain;
        for entity in &mut self.entities {
            let moved = domain.reflect(Motion::new(entity.pos, entity.vel), entity.radius);
            entity.pos = moved.position;
            entity.vel = moved.velocity;
        }
    }

    /// Remove the three consumed atoms and append `molecule` in one batch.
    /// Returns the oxygen's position.
    ///
    /// Panics if the consumed ids are not all present.
    pub fn apply_combination(&mut self, combination: &Combination, mut molecule: Entity) -> Vec2 {
        let (consumed, kept): (Vec<Entity>, Vec<Entity>) = std::mem::take(&mut self.entities)
            .into_iter()
            .partition(|e| combination.consumes(e.id));

        assert_eq!(
            consumed.len(),
            3,
            "combination {:?} does not name three live atoms",
            combination
        );
        let site = match consumed.iter().find(|e| e.id == combination.oxygen) {
            Some(oxygen) => oxygen.pos,
            None => panic!("oxygen {} missing from consumed atoms", combination.oxygen),
        };

        molecule.pos = site;
        self.entities = kept;
        self.entities.push(molecule);
        site
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}

/// Discrete-time water formation simulation.
///
/// Created uninitialized; `initialize` populates it. Each `step` runs the move
/// phase followed by the combination phase.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    rng: StdRng,
    world: Option<World>,
    next_id: u64,
    tick: u64,
    last_combination: Option<CombinationRecord>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            world: None,
            next_id: 0,
            tick: 0,
            last_combination: None,
        }
    }

    /// Build and initialize from the counts and domain stored in `config`
    pub fn from_config(config: SimConfig) -> Result<Self, ConfigurationError> {
        let counts = config.counts();
        let domain = (config.domain_half_width, config.domain_half_height);
        let mut sim = Self::new(config);
        sim.initialize(counts, domain)?;
        Ok(sim)
    }

    /// Populate `counts.hydrogen` hydrogens followed by `counts.oxygen` oxygens
    /// at random positions inside `domain` (half-width, half-height).
    ///
    /// On error nothing changes. Re-initializing discards all entities and
    /// resets the tick counter; ids keep increasing.
    pub fn initialize(
        &mut self,
        counts: AtomCounts,
        domain: (f64, f64),
    ) -> Result<(), ConfigurationError> {
        let config = SimConfig {
            hydrogen_count: counts.hydrogen,
            oxygen_count: counts.oxygen,
            domain_half_width: domain.0,
            domain_half_height: domain.1,
            ..self.config.clone()
        };
        config.validate()?;
        let mut world = World::new(config.domain()?);
        self.config = config;

        let spawn = (world.domain.half_extent() - Vec2::splat(self.config.atom_radius))
            .max(Vec2::ZERO);
        let population = std::iter::repeat(Element::Hydrogen)
            .take(counts.hydrogen as usize)
            .chain(std::iter::repeat(Element::Oxygen).take(counts.oxygen as usize));

        for element in population {
            let pos = Vec2::new(
                self.rng.gen_range(-spawn.x..=spawn.x),
                self.rng.gen_range(-spawn.y..=spawn.y),
            );
            let vel = self.random_velocity();
            let id = self.allocate_id();
            world.entities.push(Entity::atom(id, element, pos, vel, self.config.atom_radius));
        }

        log::info!(
            "initialized {} hydrogen and {} oxygen atoms in a {}x{} domain",
            counts.hydrogen,
            counts.oxygen,
            2.0 * self.config.domain_half_width,
            2.0 * self.config.domain_half_height
        );

        self.world = Some(world);
        self.tick = 0;
        self.last_combination = None;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    /// Add an atom with explicit state. Panics if the engine is uninitialized.
    pub fn spawn_atom(&mut self, element: Element, position: Vec2, velocity: Vec2) -> EntityId {
        let id = self.allocate_id();
        let radius = self.config.atom_radius;
        self.world_mut("spawn_atom")
            .entities
            .push(Entity::atom(id, element, position, velocity, radius));
        id
    }

    /// Run one tick and return the resulting snapshot.
    ///
    /// Panics if the engine is uninitialized.
    pub fn step(&mut self) -> Vec<EntityView> {
        let threshold = self.config.combination_threshold;
        let world = self.world_mut("step");
        world.move_all();
        let decision = find_combination(&world.entities, threshold);
        self.tick += 1;

        if let Some(combination) = decision {
            let vel = self.random_velocity();
            let id = self.allocate_id();
            let molecule = Entity::molecule(
                id,
                MoleculeKind::Water,
                Vec2::ZERO,
                vel,
                self.config.molecule_radius,
            );
            let position = self.world_mut("step").apply_combination(&combination, molecule);

            log::debug!(
                "tick {}: oxygen {} + hydrogens {}, {} -> water {} at ({:.1}, {:.1})",
                self.tick,
                combination.oxygen,
                combination.hydrogens[0],
                combination.hydrogens[1],
                id,
                position.x,
                position.y
            );
            self.last_combination = Some(CombinationRecord {
                tick: self.tick,
                combination,
                molecule: id,
                position,
            });
        }

        let snapshot = self.snapshot();
        log::trace!("tick {}: {} entities", self.tick, snapshot.len());
        snapshot
    }

    /// Copy of every live entity, in collection order. Empty before `initialize`.
    pub fn snapshot(&self) -> Vec<EntityView> {
        self.world
            .as_ref()
            .map(|w| w.entities.iter().map(Entity::view).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, id: EntityId) -> Option<EntityView> {
        self.world
            .as_ref()?
            .entities
            .iter()
            .find(|e| e.id == id)
            .map(Entity::view)
    }

    /// Number of ticks executed since initialization
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn last_combination(&self) -> Option<&CombinationRecord> {
        self.last_combination.as_ref()
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.world.as_ref().map_or(0, |w| w.count(kind))
    }

    pub fn atom_count(&self) -> usize {
        self.count_of(EntityKind::Atom(Element::Hydrogen))
            + self.count_of(EntityKind::Atom(Element::Oxygen))
    }

    pub fn molecule_count(&self) -> usize {
        self.count_of(EntityKind::Molecule(MoleculeKind::Water))
    }

    /// True while some oxygen and at least two hydrogens remain
    pub fn can_still_combine(&self) -> bool {
        self.count_of(EntityKind::Atom(Element::Oxygen)) >= 1
            && self.count_of(EntityKind::Atom(Element::Hydrogen)) >= 2
    }

    pub fn domain(&self) -> Option<Domain> {
        self.world.as_ref().map(|w| w.domain)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn random_velocity(&mut self) -> Vec2 {
        let range = self.config.velocity_range;
        Vec2::new(
            self.rng.gen_range(-range..=range),
            self.rng.gen_range(-range..=range),
        )
    }

    fn world_mut(&mut self, op: &str) -> &mut World {
        match self.world.as_mut() {
            Some(world) => world,
            None => panic!("Simulation::{} called before initialize", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_sim() -> Simulation {
        let mut sim = Simulation::new(SimConfig {
            seed: Some(1),
            ..SimConfig::default()
        });
        sim.initialize(AtomCounts::new(0, 0), (100.0, 100.0)).unwrap();
        sim
    }

    #[test]
    fn initialize_populates_requested_counts() {
        let sim = Simulation::from_config(SimConfig {
            seed: Some(3),
            ..SimConfig::default()
        })
        .unwrap();
        assert_eq!(sim.count_of(EntityKind::Atom(Element::Hydrogen)), 6);
        assert_eq!(sim.count_of(EntityKind::Atom(Element::Oxygen)), 3);
        assert_eq!(sim.molecule_count(), 0);
        for e in sim.snapshot() {
            assert!(e.position.x.abs() <= 370.0 && e.position.y.abs() <= 270.0);
            assert!(e.velocity.x.abs() <= 2.0 && e.velocity.y.abs() <= 2.0);
            assert_eq!(e.radius, 10.0);
        }
    }

    #[test]
    fn hydrogens_come_before_oxygens() {
        let sim = Simulation::from_config(SimConfig {
            hydrogen_count: 2,
            oxygen_count: 1,
            seed: Some(5),
            ..SimConfig::default()
        })
        .unwrap();
        let kinds: Vec<_> = sim.snapshot().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Atom(Element::Hydrogen),
                EntityKind::Atom(Element::Hydrogen),
                EntityKind::Atom(Element::Oxygen),
            ]
        );
    }

    #[test]
    fn combination_places_molecule_at_oxygen() {
        let mut sim = empty_sim();
        let o = sim.spawn_atom(Element::Oxygen, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        sim.spawn_atom(Element::Hydrogen, Vec2::new(10.0, 0.0), Vec2::ZERO);
        sim.spawn_atom(Element::Hydrogen, Vec2::new(0.0, 10.0), Vec2::ZERO);

        let snap = sim.step();
        assert_eq!(snap.len(), 1);
        let water = snap[0];
        assert_eq!(water.kind, EntityKind::Molecule(MoleculeKind::Water));
        assert_eq!(water.position, Vec2::new(1.0, 0.0));
        assert_eq!(water.radius, 20.0);
        assert!(water.velocity.x.abs() <= 2.0 && water.velocity.y.abs() <= 2.0);

        let record = sim.last_combination().unwrap();
        assert_eq!(record.tick, 1);
        assert_eq!(record.combination.oxygen, o);
        assert_eq!(record.molecule, water.id);
        assert!(sim.get(o).is_none());
    }

    #[test]
    fn failed_reinitialize_keeps_previous_state() {
        let mut sim = empty_sim();
        sim.spawn_atom(Element::Oxygen, Vec2::ZERO, Vec2::ZERO);
        let err = sim.initialize(AtomCounts::new(1, 1), (0.0, 10.0));
        assert!(err.is_err());
        assert_eq!(sim.atom_count(), 1);
        assert_eq!(sim.config().domain_half_width, 100.0);
    }

    #[test]
    fn reinitialize_does_not_reuse_ids() {
        let mut sim = empty_sim();
        let first = sim.spawn_atom(Element::Oxygen, Vec2::ZERO, Vec2::ZERO);
        sim.initialize(AtomCounts::new(1, 0), (100.0, 100.0)).unwrap();
        let snap = sim.snapshot();
        assert_eq!(snap.len(), 1);
        assert!(snap[0].id > first);
    }

    #[test]
    fn snapshot_before_initialize_is_empty() {
        let sim = Simulation::new(SimConfig::default());
        assert!(!sim.is_initialized());
        assert!(sim.snapshot().is_empty());
        assert_eq!(sim.domain(), None);
    }

    #[test]
    #[should_panic(expected = "before initialize")]
    fn spawn_before_initialize_panics() {
        let mut sim = Simulation::new(SimConfig::default());
        sim.spawn_atom(Element::Hydrogen, Vec2::ZERO, Vec2::ZERO);
    }

    #[test]
    fn can_still_combine_tracks_population() {
        let mut sim = empty_sim();
        assert!(!sim.can_still_combine());
        sim.spawn_atom(Element::Oxygen, Vec2::new(-50.0, 0.0), Vec2::ZERO);
        sim.spawn_atom(Element::Hydrogen, Vec2::new(50.0, 0.0), Vec2::ZERO);
        assert!(!sim.can_still_combine());
        sim.spawn_atom(Element::Hydrogen, Vec2::new(50.0, 50.0), Vec2::ZERO);
        assert!(sim.can_still_combine());
    }
}
