pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{KinematicState, NVec3};
pub use simulation::params::{ParameterStore, PhysicalParameters};
pub use simulation::kinematics::{effective_time, evaluate};
pub use simulation::trajectory::{Trajectory, TrajectoryPoint, TrajectoryStats, TrajectorySummary};
pub use simulation::field::{FieldRequest, FieldType, FieldVector, VectorField, MAX_FIELD_SAMPLES};
pub use simulation::colormap::ColorMap;
pub use simulation::error::{EngineError, FieldError, ParameterViolation};
pub use simulation::engine::{ComposedState, EnginePhase, SpacetimeEngine};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, FieldConfig, ParametersConfig, ScenarioConfig};

pub use visualization::stsim_vis3d::run_3d;

pub use benchmark::benchmark::{bench_field, bench_trajectory};
