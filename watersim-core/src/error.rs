use crate::entity::Element;
use thiserror::Error;

/// Invalid simulation parameters, reported by `initialize` before any state changes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{element} count must be non-negative, got {value}")]
    NegativeCount { element: Element, value: i64 },

    #[error("domain half-extents must be positive and finite, got ({half_width}, {half_height})")]
    InvalidDomain { half_width: f64, half_height: f64 },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("velocity range must be finite and non-negative, got {0}")]
    InvalidVelocityRange(f64),
}
