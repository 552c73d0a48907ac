//! Vector field sampling over a spatial lattice
//!
//! Samples the kinematic law over a cell-centered 3D grid to produce
//! direction/magnitude/color samples for overlay rendering. Generation is
//! O(sample count) and never incremental - callers throttle regeneration
//! to parameter-change events, not the per-frame path.

use serde::Deserialize;

use crate::simulation::colormap::ColorMap;
use crate::simulation::error::FieldError;
use crate::simulation::kinematics;
use crate::simulation::params::PhysicalParameters;
use crate::simulation::states::NVec3;

/// Hard cap on samples per generation (64^3)
pub const MAX_FIELD_SAMPLES: usize = 262_144;

/// Which vector-valued law to sample
/// `field_type: "spacetime" | "velocity" | "acceleration"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    #[serde(rename = "spacetime")] // toward the instantaneous position, scaled by intensity
    Spacetime,

    #[serde(rename = "velocity")] // the constant velocity vector everywhere
    Velocity,

    #[serde(rename = "acceleration")] // zero under the linear law
    Acceleration,
}

impl FieldType {
    /// Cycle order used by the viewer's field-type toggle
    pub fn next(self) -> Self {
        match self {
            FieldType::Spacetime => FieldType::Velocity,
            FieldType::Velocity => FieldType::Acceleration,
            FieldType::Acceleration => FieldType::Spacetime,
        }
    }
}

/// Full description of one field generation
#[derive(Debug, Clone)]
pub struct FieldRequest {
    pub field_type: FieldType,
    pub grid_size: NVec3, // spatial extent per axis, centered on the origin
    pub resolution: [u32; 3], // samples per axis, each >= 1
    pub color_map: ColorMap,
    pub arrow_scale: f64, // renderer hint: arrow length per unit magnitude
}

/// One sample of the generated field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldVector {
    pub position: NVec3,
    pub direction: NVec3, // unit vector, exactly zero for zero-magnitude samples
    pub magnitude: f64,
    pub color: [f32; 3], // rgb assigned from the color map
}

/// Immutable result of one generation pass
#[derive(Debug, Clone)]
pub struct VectorField {
    pub vectors: Vec<FieldVector>,
    pub grid_size: NVec3,
    pub resolution: [u32; 3],
    pub field_type: FieldType,
    pub intensity: f64,
    pub arrow_scale: f64,
    pub color_map: ColorMap,
}

/// Generate a vector field at driver time `t` (seconds)
///
/// Two passes: the first computes raw vectors and the maximum magnitude,
/// the second assigns colors from magnitudes normalized against that
/// maximum. Deterministic for identical inputs.
pub fn generate(
    params: &PhysicalParameters,
    request: &FieldRequest,
    t: f64,
) -> Result<VectorField, FieldError> {
    validate_request(request)?;

    let sample_count: usize = request.resolution.iter().map(|&r| r as usize).product();
    let target = kinematics::evaluate(params, t).position;
    let velocity = params.velocity();

    let mut vectors = Vec::with_capacity(sample_count);
    let mut max_magnitude = 0.0_f64;

    for pos in lattice(request.grid_size, request.resolution) {
        let raw = match request.field_type {
            FieldType::Velocity => velocity, // position-independent
            FieldType::Acceleration => NVec3::zeros(),
            FieldType::Spacetime => {
                let toward = target - pos;
                let norm = toward.norm();
                if norm > 0.0 {
                    toward * (params.field_intensity / norm)
                } else {
                    NVec3::zeros() // lattice point exactly at the target
                }
            }
        };

        let magnitude = raw.norm();
        let direction = if magnitude > 0.0 {
            raw / magnitude
        } else {
            NVec3::zeros()
        };
        max_magnitude = max_magnitude.max(magnitude);

        vectors.push(FieldVector {
            position: pos,
            direction,
            magnitude,
            color: [0.0; 3],
        });
    }

    // A max of 0 maps everything to the palette's low end
    let inv_max = if max_magnitude > 0.0 {
        1.0 / max_magnitude
    } else {
        0.0
    };
    for v in vectors.iter_mut() {
        v.color = request.color_map.sample(v.magnitude * inv_max);
    }

    Ok(VectorField {
        vectors,
        grid_size: request.grid_size,
        resolution: request.resolution,
        field_type: request.field_type,
        intensity: params.field_intensity,
        arrow_scale: request.arrow_scale,
        color_map: request.color_map,
    })
}

fn validate_request(request: &FieldRequest) -> Result<(), FieldError> {
    for axis in 0..3 {
        if request.resolution[axis] == 0 {
            return Err(FieldError::ZeroResolution { axis });
        }
        let extent = request.grid_size[axis];
        if !extent.is_finite() || extent <= 0.0 {
            return Err(FieldError::BadGridExtent { axis, extent });
        }
    }

    let requested = request
        .resolution
        .iter()
        .fold(1_usize, |acc, &r| acc.saturating_mul(r as usize));
    if requested > MAX_FIELD_SAMPLES {
        return Err(FieldError::TooManySamples {
            requested,
            cap: MAX_FIELD_SAMPLES,
        });
    }

    Ok(())
}

/// Cell-centered lattice spanning `grid_size` around the origin:
/// axis sample i of n over extent s sits at -s/2 + (i + 0.5) * s/n
fn lattice(grid_size: NVec3, resolution: [u32; 3]) -> impl Iterator<Item = NVec3> {
    let [nx, ny, nz] = resolution;
    let step = NVec3::new(
        grid_size.x / nx as f64,
        grid_size.y / ny as f64,
        grid_size.z / nz as f64,
    );
    let origin = grid_size * -0.5 + step * 0.5;

    (0..nx).flat_map(move |i| {
        (0..ny).flat_map(move |j| {
            (0..nz).map(move |k| {
                NVec3::new(
                    origin.x + step.x * i as f64,
                    origin.y + step.y * j as f64,
                    origin.z + step.z * k as f64,
                )
            })
        })
    })
}
