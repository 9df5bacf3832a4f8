//! Named simulation options
//!
//! Defaults reproduce the classic 800x600 water demo: six hydrogens and three
//! oxygens in a 760x560 box, atoms of radius 10, molecules of radius 20.

use crate::boundary::Domain;
use crate::combination::DEFAULT_COMBINATION_THRESHOLD;
use crate::entity::Element;
use crate::error::ConfigurationError;

/// Initial atom population. Signed so that negative input can be reported
/// rather than silently wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomCounts {
    pub hydrogen: i64,
    pub oxygen: i64,
}

impl AtomCounts {
    pub fn new(hydrogen: i64, oxygen: i64) -> Self {
        Self { hydrogen, oxygen }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (element, value) in [
            (Element::Hydrogen, self.hydrogen),
            (Element::Oxygen, self.oxygen),
        ] {
            if value < 0 {
                return Err(ConfigurationError::NegativeCount { element, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub hydrogen_count: i64,
    pub oxygen_count: i64,
    pub domain_half_width: f64,
    pub domain_half_height: f64,
    pub atom_radius: f64,
    pub molecule_radius: f64,
    pub combination_threshold: f64,
    /// Velocity components are drawn uniformly from `[-velocity_range, velocity_range]`
    pub velocity_range: f64,
    /// RNG seed; `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            hydrogen_count: 6,
            oxygen_count: 3,
            domain_half_width: 380.0,
            domain_half_height: 280.0,
            atom_radius: 10.0,
            molecule_radius: 20.0,
            combination_threshold: DEFAULT_COMBINATION_THRESHOLD,
            velocity_range: 2.0,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn counts(&self) -> AtomCounts {
        AtomCounts::new(self.hydrogen_count, self.oxygen_count)
    }

    pub fn domain(&self) -> Result<Domain, ConfigurationError> {
        Domain::new(self.domain_half_width, self.domain_half_height)
    }

    /// Check every option, reporting the first invalid one
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.counts().validate()?;
        self.domain()?;

        for (name, value) in [
            ("atom_radius", self.atom_radius),
            ("molecule_radius", self.molecule_radius),
            ("combination_threshold", self.combination_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigurationError::NonPositive { name, value });
            }
        }

        if !(2.0 * self.velocity_range).is_finite() || self.velocity_range < 0.0 {
            return Err(ConfigurationError::InvalidVelocityRange(self.velocity_range));
        }

        Ok(())
    }
}
