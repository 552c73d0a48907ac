use bevy::math::primitives::{Cuboid, Sphere};
use bevy::prelude::*;

use tracing::{info, warn};

use crate::simulation::field::VectorField;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec3;

/// Component tagging the sphere that tracks the current kinematic position
#[derive(Component)]
struct TracerBody;

/// Cached field overlay; regenerated on field-type switches, never per frame
#[derive(Resource, Default)]
struct FieldOverlay(Option<VectorField>);

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 45.0;

/// Entrypoint: spin up the Bevy viewer around an initialized scenario
pub fn run_3d(scenario: Scenario) {
    info!("run_3d: starting Bevy 3D viewer");

    App::new()
        .insert_resource(scenario)
        .init_resource::<FieldOverlay>()
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(
            Update,
            (
                engine_step,
                handle_controls,
                sync_tracer,
                draw_trajectory,
                draw_field,
            ),
        )
        .run();
}

/// Startup system: camera, light, axes, tracer sphere, initial field
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
    mut overlay: ResMut<FieldOverlay>,
) {
    // Simple 3D camera looking at the origin
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)), // pure black
            ..Default::default()
        },
        transform: Transform::from_xyz(CAMERA_DISTANCE * 0.4, CAMERA_DISTANCE * 0.3, CAMERA_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    // Basic point light
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 1000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(10.0, 10.0, CAMERA_DISTANCE),
        ..Default::default()
    });

    // Axes for visual reference
    spawn_axes(&mut commands, &mut meshes, &mut materials);

    // Sphere tracking the current kinematic position
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(0.4).mesh()),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 1.0, 1.0), // white
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        },
        TracerBody,
    ));

    regenerate_field(&scenario, &mut overlay);
}

/// Per-frame tick: feed the engine the driver timestamp in milliseconds
fn engine_step(time: Res<Time>, mut scenario: ResMut<Scenario>) {
    let timestamp_ms = time.elapsed_seconds_f64() * 1000.0;
    if let Err(e) = scenario.engine.update(timestamp_ms) {
        warn!("engine update failed: {e}");
    }
}

/// Keyboard signals from the UI collaborator:
/// Space - toggle animation, R - reset, F - cycle field type
fn handle_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut scenario: ResMut<Scenario>,
    mut overlay: ResMut<FieldOverlay>,
) {
    if keys.just_pressed(KeyCode::Space) {
        let animating = scenario.engine.is_animating();
        if let Err(e) = scenario.engine.set_animating(!animating) {
            warn!("animation toggle failed: {e}");
        }
    }

    if keys.just_pressed(KeyCode::KeyR) {
        // reset also pauses, matching the reset signal of the UI panel
        if let Err(e) = scenario
            .engine
            .set_animating(false)
            .and_then(|_| scenario.engine.reset())
        {
            warn!("reset failed: {e}");
        }
        regenerate_field(&scenario, &mut overlay);
    }

    if keys.just_pressed(KeyCode::KeyF) {
        let next = scenario.field_request.field_type.next();
        scenario.field_request.field_type = next;
        info!(field_type = ?next, "field type switched");
        regenerate_field(&scenario, &mut overlay);
    }
}

/// Regenerate the overlay; a failed request keeps the previous field
fn regenerate_field(scenario: &Scenario, overlay: &mut FieldOverlay) {
    match scenario.engine.generate_field(&scenario.field_request) {
        Ok(field) => overlay.0 = Some(field),
        Err(e) => warn!("field generation failed: {e}"),
    }
}

/// Move the tracer sphere to the current kinematic position
fn sync_tracer(scenario: Res<Scenario>, mut query: Query<&mut Transform, With<TracerBody>>) {
    let Ok(state) = scenario.engine.current_state() else {
        return;
    };
    for mut transform in &mut query {
        transform.translation = to_screen(state.position, scenario.display_scale);
    }
}

/// Polyline through the retained trajectory points
fn draw_trajectory(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let Ok(trajectory) = scenario.engine.trajectory() else {
        return;
    };
    let points = trajectory.points();
    for (a, b) in points.iter().zip(points.iter().skip(1)) {
        gizmos.line(
            to_screen(a.position, scenario.display_scale),
            to_screen(b.position, scenario.display_scale),
            Color::srgb(0.35, 0.65, 1.0),
        );
    }
}

/// Arrows for the cached field overlay, colored per sample
fn draw_field(scenario: Res<Scenario>, overlay: Res<FieldOverlay>, mut gizmos: Gizmos) {
    let Some(field) = &overlay.0 else {
        return;
    };
    for v in &field.vectors {
        if v.magnitude <= 0.0 {
            continue; // zero samples draw nothing
        }
        let start = to_screen(v.position, scenario.display_scale);
        let len = (v.magnitude * field.arrow_scale) as f32 * scenario.display_scale;
        let dir = Vec3::new(v.direction.x as f32, v.direction.y as f32, v.direction.z as f32);
        gizmos.arrow(
            start,
            start + dir * len,
            Color::srgb(v.color[0], v.color[1], v.color[2]),
        );
    }
}

/// World-space -> screen-space scaling
fn to_screen(p: NVec3, scale: f32) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32) * scale
}

// =========================================================================================
// Draw 3D axes for visual reference
// =========================================================================================

fn spawn_axes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    // Axis length and thickness, in world units
    let axis_len = 40.0;
    let axis_thickness = 0.05;

    // X axis: red, along +X/-X
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(axis_len, axis_thickness, axis_thickness).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 0.0), // red
            unlit: true,
            ..Default::default()
        }),
        // Cuboid is centered at its transform origin, so this puts it crossing the world origin
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..Default::default()
    });

    // Y axis: green, along +Y/-Y
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(axis_thickness, axis_len, axis_thickness).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 1.0, 0.0), // green
            unlit: true,
            ..Default::default()
        }),
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..Default::default()
    });

    // Z axis: blue, along +Z/-Z
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(axis_thickness, axis_thickness, axis_len).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 0.0, 1.0), // blue
            unlit: true,
            ..Default::default()
        }),
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..Default::default()
    });
}
