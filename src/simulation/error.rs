//! Error types for the kinematics engine
//!
//! Every failure is reported synchronously to the immediate caller as a
//! value; nothing is retried and nothing crosses the tick boundary as a
//! panic. A rejected parameter update leaves the engine running under the
//! last-valid configuration, and a rejected field request produces no field.

use thiserror::Error;

/// A single violated parameter constraint, carrying the offending value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterViolation {
    #[error("velocity components (cx, cy, cz) must be finite")]
    NonFiniteVelocity,

    #[error("time_scale must be finite and > 0, got {0}")]
    TimeScale(f64),

    #[error("time_offset must be finite, got {0}")]
    TimeOffset(f64),

    #[error("max_time must be finite and >= 0, got {0}")]
    MaxTime(f64),

    #[error("trajectory_limit must be a positive integer")]
    TrajectoryLimit,

    #[error("field_density must be a positive integer")]
    FieldDensity,

    #[error("field_density {density} cubed exceeds the {cap}-sample cap")]
    FieldDensityTooLarge { density: u32, cap: usize },

    #[error("field_intensity must be finite, got {0}")]
    FieldIntensity(f64),
}

/// Vector field generation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("resolution must be >= 1 on axis {axis}")]
    ZeroResolution { axis: usize },

    #[error("grid_size must be finite and > 0 on axis {axis}, got {extent}")]
    BadGridExtent { axis: usize, extent: f64 },

    #[error("{requested} samples requested, cap is {cap}")]
    TooManySamples { requested: usize, cap: usize },
}

/// Top-level errors returned across the engine facade boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid parameters: {}", list_violations(.0))]
    InvalidParameters(Vec<ParameterViolation>),

    #[error("invalid field request: {0}")]
    InvalidFieldRequest(#[from] FieldError),

    #[error("engine is not initialized")]
    NotInitialized,
}

fn list_violations(violations: &[ParameterViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
