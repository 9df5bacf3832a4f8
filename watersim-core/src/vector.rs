//! 2D kinematics helpers shared by the boundary reflector and the combination rule

/// Double-precision 2D vector used for positions and velocities
pub type Vec2 = glam::DVec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    a.distance(b)
}

/// Position and velocity of a moving entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Motion {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Position after one Euler step of unit duration
    #[inline]
    pub fn advanced(&self) -> Vec2 {
        self.position + self.velocity
    }
}
