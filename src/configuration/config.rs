//! Configuration types for loading visualization scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – runtime options (animation start state, display scale)
//! - [`ParametersConfig`] – physical parameters of the kinematic law
//! - [`FieldConfig`]      – vector field overlay request
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   animate: true           # start with trajectory recording on
//!   display_scale: 2.0      # world units -> screen units
//!
//! parameters:
//!   cx: 3.0                 # velocity x component (distance/s)
//!   cy: 1.5
//!   cz: 0.75
//!   time_scale: 1.0         # must be > 0
//!   time_offset: 0.0        # seconds
//!   max_time: 10.0          # clamp bound, 0 disables clamping
//!   trajectory_limit: 1000  # retained trajectory points
//!   field_density: 8        # default per-axis field resolution
//!   field_intensity: 1.0
//!
//! field:
//!   field_type: "spacetime" # or "velocity" / "acceleration"
//!   grid_size: [20.0, 20.0, 20.0]
//!   resolution: [8, 8, 8]   # optional, falls back to field_density
//!   color_map: "viridis"
//!   arrow_scale: 0.6
//! ```
//!
//! The engine then maps this configuration into its internal runtime
//! scenario representation; validation happens when the parameters enter
//! the parameter store, not at deserialization time.

use serde::Deserialize;

use crate::simulation::colormap::ColorMap;
use crate::simulation::field::FieldType;

/// High-level runtime options for the viewer
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub animate: bool, // `true` - trajectory recording starts enabled
    pub display_scale: Option<f64>, // world -> screen scale, defaults to 50
}

/// Physical parameters of the kinematic law
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub cx: f64, // velocity x component (distance/s)
    pub cy: f64, // velocity y component (distance/s)
    pub cz: f64, // velocity z component (distance/s)
    pub time_scale: f64, // time scaling factor, must be > 0
    pub time_offset: f64, // time offset (s)
    pub max_time: f64, // clamp bound (s), 0 disables clamping
    pub trajectory_limit: usize, // retained trajectory point count
    pub field_density: u32, // default per-axis field resolution
    pub field_intensity: f64, // field display strength
}

/// Vector field overlay request
#[derive(Deserialize, Debug)]
pub struct FieldConfig {
    pub field_type: FieldType, // which law to sample
    pub grid_size: [f64; 3], // spatial extent per axis
    pub resolution: Option<[u32; 3]>, // samples per axis, defaults to field_density
    pub color_map: ColorMap, // palette name
    pub arrow_scale: f64, // arrow length per unit magnitude
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // runtime options for the viewer
    pub parameters: ParametersConfig, // physical parameters of the law
    pub field: FieldConfig, // overlay field request
}
