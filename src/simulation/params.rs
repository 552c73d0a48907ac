//! Physical and visualization parameters for the kinematics engine
//!
//! `PhysicalParameters` holds the full runtime configuration:
//! - velocity vector components (`cx`, `cy`, `cz`),
//! - time mapping (`time_scale`, `time_offset`, `max_time`),
//! - retention and sampling limits (`trajectory_limit`, `field_density`),
//! - field display strength (`field_intensity`)
//!
//! `ParameterStore` guards the live set: every update is validated as a
//! whole and rejected wholesale if any field violates its constraint, so
//! the stored value is always a complete, valid configuration.

use crate::simulation::error::{EngineError, ParameterViolation};
use crate::simulation::field::MAX_FIELD_SAMPLES;
use crate::simulation::states::NVec3;

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalParameters {
    pub cx: f64, // velocity x component (distance/s)
    pub cy: f64, // velocity y component (distance/s)
    pub cz: f64, // velocity z component (distance/s)
    pub time_scale: f64, // time scaling factor, > 0
    pub time_offset: f64, // time offset (s)
    pub max_time: f64, // clamp bound (s), 0 = unclamped
    pub trajectory_limit: usize, // retained trajectory point count
    pub field_density: u32, // default per-axis field resolution
    pub field_intensity: f64, // field display strength
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            cx: 299_792_458.0, // speed of light along x
            cy: 0.0,
            cz: 0.0,
            time_scale: 1.0,
            time_offset: 0.0,
            max_time: 10.0,
            trajectory_limit: 1000,
            field_density: 10,
            field_intensity: 1.0,
        }
    }
}

impl PhysicalParameters {
    /// Velocity vector (cx, cy, cz)
    pub fn velocity(&self) -> NVec3 {
        NVec3::new(self.cx, self.cy, self.cz)
    }

    /// Check every documented constraint, collecting all violations
    pub fn validate(&self) -> Vec<ParameterViolation> {
        let mut violations = Vec::new();

        if !(self.cx.is_finite() && self.cy.is_finite() && self.cz.is_finite()) {
            violations.push(ParameterViolation::NonFiniteVelocity);
        }
        if !(self.time_scale.is_finite() && self.time_scale > 0.0) {
            violations.push(ParameterViolation::TimeScale(self.time_scale));
        }
        if !self.time_offset.is_finite() {
            violations.push(ParameterViolation::TimeOffset(self.time_offset));
        }
        if !(self.max_time.is_finite() && self.max_time >= 0.0) {
            violations.push(ParameterViolation::MaxTime(self.max_time));
        }
        if self.trajectory_limit == 0 {
            violations.push(ParameterViolation::TrajectoryLimit);
        }
        if self.field_density == 0 {
            violations.push(ParameterViolation::FieldDensity);
        } else if (self.field_density as u64).pow(3) > MAX_FIELD_SAMPLES as u64 {
            violations.push(ParameterViolation::FieldDensityTooLarge {
                density: self.field_density,
                cap: MAX_FIELD_SAMPLES,
            });
        }
        if !self.field_intensity.is_finite() {
            violations.push(ParameterViolation::FieldIntensity(self.field_intensity));
        }

        violations
    }
}

/// Holder of the current parameter set, validated on every update
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    current: PhysicalParameters,
}

impl ParameterStore {
    /// Replace the stored set atomically
    ///
    /// On failure the previous value is untouched and the error carries
    /// every violated constraint. Callers must supply a complete set;
    /// there are no partial updates.
    pub fn set(&mut self, params: PhysicalParameters) -> Result<(), EngineError> {
        let violations = params.validate();
        if !violations.is_empty() {
            return Err(EngineError::InvalidParameters(violations));
        }
        self.current = params;
        Ok(())
    }

    /// Current immutable snapshot
    pub fn get(&self) -> &PhysicalParameters {
        &self.current
    }
}
