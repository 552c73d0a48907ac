//! Build a fully-initialized runtime scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! consumed by the viewer:
//! - an initialized [`SpacetimeEngine`] carrying the configured parameters
//! - the field request used for overlay generation
//! - display options (world -> screen scale)
//!
//! The bundle is inserted into Bevy as a `Resource` and driven by the
//! visualization systems.

use bevy::prelude::Resource;
use tracing::info;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::engine::SpacetimeEngine;
use crate::simulation::error::EngineError;
use crate::simulation::field::FieldRequest;
use crate::simulation::params::PhysicalParameters;
use crate::simulation::states::NVec3;

/// Bevy resource holding the initialized engine and display options
#[derive(Resource)]
pub struct Scenario {
    pub engine: SpacetimeEngine,
    pub field_request: FieldRequest,
    pub display_scale: f32, // world -> screen scaling for the viewer
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, EngineError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = PhysicalParameters {
            cx: p_cfg.cx,
            cy: p_cfg.cy,
            cz: p_cfg.cz,
            time_scale: p_cfg.time_scale,
            time_offset: p_cfg.time_offset,
            max_time: p_cfg.max_time,
            trajectory_limit: p_cfg.trajectory_limit,
            field_density: p_cfg.field_density,
            field_intensity: p_cfg.field_intensity,
        };
        let field_density = parameters.field_density;

        // Engine: initialize, then swap in the configured parameters so
        // validation failures surface before the window opens
        let mut engine = SpacetimeEngine::new();
        engine.initialize();
        engine.update_parameters(parameters)?;
        engine.set_animating(cfg.engine.animate)?;

        // Field request: per-axis resolution falls back to field_density
        let f_cfg = cfg.field;
        let field_request = FieldRequest {
            field_type: f_cfg.field_type,
            grid_size: NVec3::new(f_cfg.grid_size[0], f_cfg.grid_size[1], f_cfg.grid_size[2]),
            resolution: f_cfg.resolution.unwrap_or([field_density; 3]),
            color_map: f_cfg.color_map,
            arrow_scale: f_cfg.arrow_scale,
        };

        info!(
            field_type = ?field_request.field_type,
            resolution = ?field_request.resolution,
            "scenario built"
        );

        Ok(Self {
            engine,
            field_request,
            display_scale: cfg.engine.display_scale.unwrap_or(50.0) as f32,
        })
    }
}
