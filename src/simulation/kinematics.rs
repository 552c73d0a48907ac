//! Kinematic law evaluation
//!
//! The underlying law is linear in time: position = C * t, with constant
//! velocity C and zero acceleration. `evaluate` is the single place raw
//! driver time is mapped to effective time, so the renderer and the UI
//! always agree on the same state for the same inputs.

use crate::simulation::params::PhysicalParameters;
use crate::simulation::states::{KinematicState, NVec3};

/// Map raw driver time to effective simulation time
///
/// t_eff = t * time_scale + time_offset, clamped to [0, max_time] when
/// max_time > 0. Values beyond the bound hold at the boundary rather than
/// wrapping, so an ongoing animation never jumps.
pub fn effective_time(params: &PhysicalParameters, t: f64) -> f64 {
    let t_eff = t * params.time_scale + params.time_offset;
    if params.max_time > 0.0 {
        t_eff.clamp(0.0, params.max_time)
    } else {
        t_eff
    }
}

/// Evaluate the kinematic state at driver time `t` (seconds)
///
/// Pure and side-effect-free: identical (params, t) always yields
/// identical output.
pub fn evaluate(params: &PhysicalParameters, t: f64) -> KinematicState {
    let t_eff = effective_time(params, t);
    let c = params.velocity();
    KinematicState {
        t: t_eff,
        position: c * t_eff, // componentwise: x = cx*t, y = cy*t, z = cz*t
        velocity: c, // constant, independent of t
        acceleration: NVec3::zeros(), // the law has no time-dependence in velocity
    }
}
