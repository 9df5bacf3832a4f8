pub mod boundary;
pub mod combination;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod runtime;
pub mod vector;

pub use boundary::{reflect_step, Domain};
pub use combination::{find_combination, Combination, DEFAULT_COMBINATION_THRESHOLD};
pub use config::{AtomCounts, SimConfig};
pub use engine::{CombinationRecord, Simulation, World};
pub use entity::{Element, Entity, EntityId, EntityKind, EntityView, MoleculeKind};
pub use error::ConfigurationError;
pub use runtime::{run_simulation, RunSummary, StopCondition, TickDriver};
pub use vector::{distance, Motion, Vec2};
