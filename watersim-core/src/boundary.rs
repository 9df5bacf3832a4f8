//! Boundary reflection against the fixed rectangular domain
//!
//! Movement is a single Euler step of unit duration. The wall test runs on the
//! post-move position and only flips velocity components; positions are never
//! clamped, so an entity can sit past a wall for one tick before heading back.

use crate::error::ConfigurationError;
use crate::vector::{Motion, Vec2};

/// Axis-aligned domain centred on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    half_extent: Vec2,
}

impl Domain {
    /// Create a domain spanning `[-half_width, half_width] x [-half_height, half_height]`
    pub fn new(half_width: f64, half_height: f64) -> Result<Self, ConfigurationError> {
        // full span 2*v must stay finite for uniform sampling over the domain
        let valid = |v: f64| v > 0.0 && (2.0 * v).is_finite();
        if !valid(half_width) || !valid(half_height) {
            return Err(ConfigurationError::InvalidDomain {
                half_width,
                half_height,
            });
        }
        Ok(Self {
            half_extent: Vec2::new(half_width, half_height),
        })
    }

    pub fn half_extent(&self) -> Vec2 {
        self.half_extent
    }

    pub fn half_width(&self) -> f64 {
        self.half_extent.x
    }

    pub fn half_height(&self) -> f64 {
        self.half_extent.y
    }

    /// Advance `motion` by one tick and reflect off the walls
    pub fn reflect(&self, motion: Motion, radius: f64) -> Motion {
        let (position, velocity) =
            reflect_step(motion.position, motion.velocity, radius, self.half_extent);
        Motion { position, velocity }
    }
}

/// Move `position` by `velocity`, then negate each velocity component whose
/// axis now has the entity's edge beyond `half_extent`.
pub fn reflect_step(position: Vec2, velocity: Vec2, radius: f64, half_extent: Vec2) -> (Vec2, Vec2) {
    let pos = Motion::new(position, velocity).advanced();
    let mut vel = velocity;

    if outside(pos.x, radius, half_extent.x) {
        vel.x = -vel.x;
    }
    if outside(pos.y, radius, half_extent.y) {
        vel.y = -vel.y;
    }

    (pos, vel)
}

#[inline]
fn outside(coord: f64, radius: f64, half: f64) -> bool {
    coord + radius > half || coord - radius < -half
}
