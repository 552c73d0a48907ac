//! Core state types for the kinematics engine.
//!
//! Defines the shared vector alias and the per-tick snapshot:
//! - `NVec3` using nalgebra's `Vector3<f64>`
//! - `KinematicState` - instantaneous position/velocity/acceleration
//!
//! Snapshots are value types: computed fresh every tick, never mutated.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// Instantaneous kinematic state at one point in simulated time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicState {
    pub t: f64, // effective time (s), after scale/offset/clamp
    pub position: NVec3, // spatial position
    pub velocity: NVec3, // instantaneous velocity
    pub acceleration: NVec3, // instantaneous acceleration
}

impl KinematicState {
    /// Instantaneous speed |v|
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}
