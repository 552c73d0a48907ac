//! Engine facade: evaluation, trajectory recording, and field generation
//! behind a small lifecycle state machine
//!
//! Phases: Uninitialized -> Ready <-> Animating -> Disposed. The facade
//! never drives a clock of its own - an external loop feeds millisecond
//! timestamps into `update`. Consumers poll `current_state` and
//! `trajectory`; the engine never calls out to the renderer or the UI.

use tracing::{debug, info};

use crate::simulation::error::EngineError;
use crate::simulation::field::{self, FieldRequest, VectorField};
use crate::simulation::kinematics;
use crate::simulation::params::{ParameterStore, PhysicalParameters};
use crate::simulation::states::{KinematicState, NVec3};
use crate::simulation::trajectory::{Trajectory, TrajectorySummary};

/// Engine lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Uninitialized,
    Ready, // initialized, trajectory recording paused
    Animating, // recording on every update
    Disposed,
}

/// Plain data snapshot composed on every tick, cached until superseded
#[derive(Debug, Clone)]
pub struct ComposedState {
    pub time: f64, // effective time (s)
    pub position: NVec3,
    pub velocity: NVec3,
    pub acceleration: NVec3,
    pub trajectory: TrajectorySummary,
    pub parameters: PhysicalParameters,
}

/// Facade orchestrating the parameter store, evaluator, trajectory
/// accumulator, and field generator across an externally driven clock
pub struct SpacetimeEngine {
    phase: EnginePhase,
    store: ParameterStore,
    trajectory: Trajectory,
    current: Option<ComposedState>,
    driver_time: f64, // seconds since the clock base
    clock_base_ms: Option<f64>, // first driver timestamp after initialize/reset
}

impl Default for SpacetimeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpacetimeEngine {
    pub fn new() -> Self {
        Self {
            phase: EnginePhase::Uninitialized,
            store: ParameterStore::default(),
            trajectory: Trajectory::new(PhysicalParameters::default().trajectory_limit),
            current: None,
            driver_time: 0.0,
            clock_base_ms: None,
        }
    }

    /// Establish default parameters, zero the clock, enter Ready
    pub fn initialize(&mut self) {
        self.store = ParameterStore::default();
        self.trajectory = Trajectory::new(self.store.get().trajectory_limit);
        self.driver_time = 0.0;
        self.clock_base_ms = None;
        self.phase = EnginePhase::Ready;
        let state = kinematics::evaluate(self.store.get(), 0.0);
        self.compose(state);
        info!("engine initialized with default parameters");
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == EnginePhase::Animating
    }

    /// Advance to the driver timestamp (milliseconds) and recompute the
    /// cached state
    ///
    /// The first update after initialize/reset re-bases the clock: that
    /// timestamp becomes t = 0. The state is always re-evaluated and
    /// cached; recording into the trajectory happens only while Animating
    /// (always-render-but-conditionally-simulate).
    pub fn update(&mut self, timestamp_ms: f64) -> Result<(), EngineError> {
        self.ensure_live()?;

        let base = *self.clock_base_ms.get_or_insert(timestamp_ms);
        self.driver_time = (timestamp_ms - base) / 1000.0; // convert to seconds

        let state = kinematics::evaluate(self.store.get(), self.driver_time);
        if self.phase == EnginePhase::Animating {
            self.trajectory.record(state);
        }
        self.compose(state);
        Ok(())
    }

    /// Toggle between Ready and Animating; signalled by the UI collaborator
    pub fn set_animating(&mut self, animating: bool) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.phase = if animating {
            EnginePhase::Animating
        } else {
            EnginePhase::Ready
        };
        debug!(animating, "animation state changed");
        Ok(())
    }

    /// Replace the full parameter set
    ///
    /// A rejected update leaves the engine running under the last-valid
    /// configuration and returns the violations to the caller. On success
    /// the new retention limit takes effect immediately and the cached
    /// state is refreshed.
    pub fn update_parameters(&mut self, params: PhysicalParameters) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.store.set(params)?;
        self.trajectory.set_limit(self.store.get().trajectory_limit);
        let state = kinematics::evaluate(self.store.get(), self.driver_time);
        self.compose(state);
        info!("parameters updated");
        Ok(())
    }

    /// Generate a vector field at the engine's current effective time
    ///
    /// O(sample count) and synchronous; throttle to parameter-change
    /// events. An invalid request yields an error and no partial field.
    pub fn generate_field(&self, request: &FieldRequest) -> Result<VectorField, EngineError> {
        self.ensure_live()?;
        Ok(field::generate(self.store.get(), request, self.driver_time)?)
    }

    /// Re-base the clock and clear the trajectory; parameters stay live
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.driver_time = 0.0;
        self.clock_base_ms = None;
        self.trajectory.reset();
        let state = kinematics::evaluate(self.store.get(), 0.0);
        self.compose(state);
        info!("engine reset");
        Ok(())
    }

    /// Release the cached state; every later call fails with
    /// [`EngineError::NotInitialized`]
    pub fn dispose(&mut self) {
        self.phase = EnginePhase::Disposed;
        self.current = None;
        info!("engine disposed");
    }

    /// Cached composed snapshot from the most recent tick
    pub fn current_state(&self) -> Result<&ComposedState, EngineError> {
        self.ensure_live()?;
        self.current.as_ref().ok_or(EngineError::NotInitialized)
    }

    /// Retained trajectory points, for the renderer's polyline
    pub fn trajectory(&self) -> Result<&Trajectory, EngineError> {
        self.ensure_live()?;
        Ok(&self.trajectory)
    }

    pub fn parameters(&self) -> Result<&PhysicalParameters, EngineError> {
        self.ensure_live()?;
        Ok(self.store.get())
    }

    fn ensure_live(&self) -> Result<(), EngineError> {
        match self.phase {
            EnginePhase::Ready | EnginePhase::Animating => Ok(()),
            EnginePhase::Uninitialized | EnginePhase::Disposed => Err(EngineError::NotInitialized),
        }
    }

    fn compose(&mut self, state: KinematicState) {
        self.current = Some(ComposedState {
            time: state.t,
            position: state.position,
            velocity: state.velocity,
            acceleration: state.acceleration,
            trajectory: self.trajectory.summary(),
            parameters: self.store.get().clone(),
        });
    }
}
