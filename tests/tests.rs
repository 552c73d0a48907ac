use stsim::simulation::colormap::ColorMap;
use stsim::simulation::engine::{EnginePhase, SpacetimeEngine};
use stsim::simulation::error::{EngineError, FieldError, ParameterViolation};
use stsim::simulation::field::{self, FieldRequest, FieldType, MAX_FIELD_SAMPLES};
use stsim::simulation::kinematics::evaluate;
use stsim::simulation::params::{ParameterStore, PhysicalParameters};
use stsim::simulation::states::NVec3;
use stsim::simulation::trajectory::Trajectory;

/// Parameters with a small velocity vector and no time clamp
pub fn test_params() -> PhysicalParameters {
    PhysicalParameters {
        cx: 1.0,
        cy: 2.0,
        cz: 3.0,
        time_scale: 1.0,
        time_offset: 0.0,
        max_time: 0.0,
        trajectory_limit: 1000,
        field_density: 4,
        field_intensity: 1.0,
    }
}

/// Unit-grid field request at the given per-axis resolution
pub fn test_request(field_type: FieldType, resolution: [u32; 3]) -> FieldRequest {
    FieldRequest {
        field_type,
        grid_size: NVec3::new(1.0, 1.0, 1.0),
        resolution,
        color_map: ColorMap::Viridis,
        arrow_scale: 1.0,
    }
}

/// Record `n` states at 1 s intervals
pub fn record_linear(trajectory: &mut Trajectory, params: &PhysicalParameters, n: usize) {
    for i in 0..n {
        trajectory.record(evaluate(params, i as f64));
    }
}

// ==================================================================================
// Evaluator tests
// ==================================================================================

#[test]
fn evaluate_is_deterministic() {
    let p = test_params();
    let a = evaluate(&p, 1.7);
    let b = evaluate(&p, 1.7);
    assert_eq!(a, b);
}

#[test]
fn evaluate_is_linear_in_time() {
    let p = test_params();
    let s = evaluate(&p, 2.0);

    assert_eq!(s.position, NVec3::new(2.0, 4.0, 6.0));
    assert_eq!(s.velocity, NVec3::new(1.0, 2.0, 3.0));
    assert_eq!(s.acceleration, NVec3::zeros());
}

#[test]
fn evaluate_clamps_to_max_time() {
    let mut p = test_params();
    p.max_time = 5.0;

    let clamped = evaluate(&p, 100.0);
    let at_bound = evaluate(&p, 5.0);

    assert_eq!(clamped.position, at_bound.position);
    assert_eq!(clamped.t, 5.0);
}

#[test]
fn evaluate_applies_scale_and_offset() {
    let mut p = test_params();
    p.time_scale = 2.0;
    p.time_offset = 1.0;

    let s = evaluate(&p, 3.0);
    assert_eq!(s.t, 7.0);
    assert_eq!(s.position, NVec3::new(7.0, 14.0, 21.0));
}

// ==================================================================================
// Trajectory tests
// ==================================================================================

#[test]
fn trajectory_respects_retention_limit() {
    let p = test_params();
    let mut trajectory = Trajectory::new(10);

    record_linear(&mut trajectory, &p, 15);

    assert_eq!(trajectory.len(), 10);
    // the ten most recent survive: times 5..=14
    assert_eq!(trajectory.points().front().unwrap().t, 5.0);
    assert_eq!(trajectory.points().back().unwrap().t, 14.0);
}

#[test]
fn trajectory_statistics_match_recompute() {
    let p = test_params();
    let mut trajectory = Trajectory::new(8);

    record_linear(&mut trajectory, &p, 20);

    let stats = trajectory.stats();
    let first = trajectory.points().front().unwrap();
    let mut min_pos = first.position;
    let mut max_pos = first.position;
    let mut min_speed = first.speed();
    let mut max_speed = first.speed();
    for pt in trajectory.points() {
        min_pos = min_pos.inf(&pt.position);
        max_pos = max_pos.sup(&pt.position);
        min_speed = min_speed.min(pt.speed());
        max_speed = max_speed.max(pt.speed());
    }

    assert_eq!(stats.min_position, min_pos);
    assert_eq!(stats.max_position, max_pos);
    assert_eq!(stats.min_speed, min_speed);
    assert_eq!(stats.max_speed, max_speed);
}

#[test]
fn trajectory_distance_is_cumulative_across_eviction() {
    let p = test_params(); // |C| = sqrt(14)
    let mut trajectory = Trajectory::new(5);

    record_linear(&mut trajectory, &p, 11); // 10 unit-time segments

    let segment = 14.0_f64.sqrt();
    assert_eq!(trajectory.len(), 5);
    assert!((trajectory.total_distance() - 10.0 * segment).abs() < 1e-9);
    assert!((trajectory.total_time() - 10.0).abs() < 1e-12);
    assert!((trajectory.average_speed() - segment).abs() < 1e-9);
}

#[test]
fn trajectory_reset_zeroes_aggregates() {
    let p = test_params();
    let mut trajectory = Trajectory::new(100);

    record_linear(&mut trajectory, &p, 5);
    assert!(trajectory.total_distance() > 0.0);

    trajectory.reset();

    assert!(trajectory.is_empty());
    assert_eq!(trajectory.total_distance(), 0.0);
    assert_eq!(trajectory.total_time(), 0.0);
    assert_eq!(trajectory.average_speed(), 0.0);
    assert_eq!(trajectory.stats().max_speed, 0.0);
}

#[test]
fn trajectory_skips_non_increasing_timestamps() {
    let p = test_params();
    let mut trajectory = Trajectory::new(100);

    trajectory.record(evaluate(&p, 1.0));
    trajectory.record(evaluate(&p, 2.0));
    let distance = trajectory.total_distance();
    let time = trajectory.total_time();

    trajectory.record(evaluate(&p, 2.0)); // repeated timestamp
    trajectory.record(evaluate(&p, 0.5)); // clock went backwards

    // points retained for display, aggregates untouched
    assert_eq!(trajectory.len(), 4);
    assert_eq!(trajectory.total_distance(), distance);
    assert_eq!(trajectory.total_time(), time);
}

#[test]
fn trajectory_single_point_has_zero_average_speed() {
    let p = test_params();
    let mut trajectory = Trajectory::new(10);

    trajectory.record(evaluate(&p, 1.0));

    assert_eq!(trajectory.total_time(), 0.0);
    assert_eq!(trajectory.average_speed(), 0.0);
}

#[test]
fn trajectory_set_limit_truncates_and_recomputes() {
    let p = test_params();
    let mut trajectory = Trajectory::new(10);

    record_linear(&mut trajectory, &p, 10); // times 0..=9

    trajectory.set_limit(3);

    assert_eq!(trajectory.len(), 3);
    // stats now describe only times 7..=9
    assert_eq!(trajectory.stats().min_position, evaluate(&p, 7.0).position);
    assert_eq!(trajectory.stats().max_position, evaluate(&p, 9.0).position);
}

// ==================================================================================
// Vector field tests
// ==================================================================================

#[test]
fn field_produces_resolution_product_samples() {
    let p = test_params();
    let f = field::generate(&p, &test_request(FieldType::Spacetime, [2, 2, 2]), 1.0).unwrap();

    assert_eq!(f.vectors.len(), 8);
}

#[test]
fn field_directions_are_unit_or_zero() {
    let p = test_params();
    for field_type in [FieldType::Spacetime, FieldType::Velocity, FieldType::Acceleration] {
        let f = field::generate(&p, &test_request(field_type, [3, 3, 3]), 1.0).unwrap();

        for v in &f.vectors {
            assert!(v.magnitude >= 0.0);
            if v.magnitude > 0.0 {
                assert!((v.direction.norm() - 1.0).abs() < 1e-12);
            } else {
                assert_eq!(v.direction, NVec3::zeros());
            }
        }
    }
}

#[test]
fn field_velocity_type_is_position_independent() {
    let p = test_params();
    let f = field::generate(&p, &test_request(FieldType::Velocity, [2, 2, 2]), 3.0).unwrap();

    let speed = p.velocity().norm();
    for v in &f.vectors {
        assert!((v.magnitude - speed).abs() < 1e-12);
        assert!((v.direction - p.velocity() / speed).norm() < 1e-12);
    }
}

#[test]
fn field_acceleration_type_is_all_zero() {
    let p = test_params();
    let f = field::generate(&p, &test_request(FieldType::Acceleration, [2, 2, 2]), 1.0).unwrap();

    let low_end = ColorMap::Viridis.sample(0.0);
    for v in &f.vectors {
        assert_eq!(v.magnitude, 0.0);
        assert_eq!(v.direction, NVec3::zeros());
        assert_eq!(v.color, low_end);
    }
}

#[test]
fn spacetime_field_points_toward_current_position() {
    let p = test_params();
    let request = test_request(FieldType::Spacetime, [3, 3, 3]);
    let f = field::generate(&p, &request, 1.0).unwrap();

    let target = evaluate(&p, 1.0).position; // (1, 2, 3), outside the unit grid
    for v in &f.vectors {
        let toward = target - v.position;
        assert!(v.direction.dot(&toward) > 0.0);
    }
}

#[test]
fn field_is_deterministic() {
    let p = test_params();
    let request = test_request(FieldType::Spacetime, [4, 4, 4]);

    let a = field::generate(&p, &request, 2.5).unwrap();
    let b = field::generate(&p, &request, 2.5).unwrap();

    assert_eq!(a.vectors, b.vectors);
}

#[test]
fn field_rejects_zero_resolution() {
    let p = test_params();
    let err = field::generate(&p, &test_request(FieldType::Velocity, [4, 0, 4]), 0.0).unwrap_err();

    assert_eq!(err, FieldError::ZeroResolution { axis: 1 });
}

#[test]
fn field_rejects_oversized_requests() {
    let p = test_params();
    let err = field::generate(&p, &test_request(FieldType::Velocity, [65, 65, 65]), 0.0).unwrap_err();

    match err {
        FieldError::TooManySamples { requested, cap } => {
            assert_eq!(requested, 65 * 65 * 65);
            assert_eq!(cap, MAX_FIELD_SAMPLES);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn field_rejects_degenerate_grid() {
    let p = test_params();
    let mut request = test_request(FieldType::Velocity, [2, 2, 2]);
    request.grid_size = NVec3::new(1.0, 0.0, 1.0);

    let err = field::generate(&p, &request, 0.0).unwrap_err();
    assert_eq!(err, FieldError::BadGridExtent { axis: 1, extent: 0.0 });
}

// ==================================================================================
// Color map tests
// ==================================================================================

#[test]
fn colormaps_stay_in_rgb_range() {
    let maps = [
        ColorMap::Rainbow,
        ColorMap::Plasma,
        ColorMap::Viridis,
        ColorMap::Cool,
        ColorMap::Warm,
    ];

    for map in maps {
        for i in 0..=20 {
            let rgb = map.sample(i as f64 / 20.0);
            for channel in rgb {
                assert!((0.0..=1.0).contains(&channel), "{map:?} out of range: {rgb:?}");
            }
        }
    }
}

#[test]
fn colormap_clamps_input() {
    let map = ColorMap::Plasma;
    assert_eq!(map.sample(-1.0), map.sample(0.0));
    assert_eq!(map.sample(2.0), map.sample(1.0));
}

// ==================================================================================
// Parameter store tests
// ==================================================================================

#[test]
fn store_rejects_invalid_sets_atomically() {
    let mut store = ParameterStore::default();
    let before = store.get().clone();

    let mut bad = test_params();
    bad.time_scale = -1.0;
    bad.trajectory_limit = 0;

    let err = store.set(bad).unwrap_err();
    match err {
        EngineError::InvalidParameters(violations) => {
            assert!(violations.contains(&ParameterViolation::TimeScale(-1.0)));
            assert!(violations.contains(&ParameterViolation::TrajectoryLimit));
        }
        other => panic!("unexpected error: {other}"),
    }

    // previous value untouched
    assert_eq!(store.get(), &before);
}

#[test]
fn store_rejects_oversized_field_density() {
    let mut store = ParameterStore::default();

    let mut bad = test_params();
    bad.field_density = 100; // 100^3 is over the cap

    assert!(store.set(bad).is_err());
}

#[test]
fn store_accepts_complete_valid_set() {
    let mut store = ParameterStore::default();

    store.set(test_params()).unwrap();

    assert_eq!(store.get(), &test_params());
}

// ==================================================================================
// Engine facade tests
// ==================================================================================

#[test]
fn engine_requires_initialization() {
    let mut engine = SpacetimeEngine::new();

    assert_eq!(engine.phase(), EnginePhase::Uninitialized);
    assert!(matches!(engine.update(0.0), Err(EngineError::NotInitialized)));
    assert!(matches!(engine.current_state(), Err(EngineError::NotInitialized)));
    assert!(matches!(
        engine.update_parameters(test_params()),
        Err(EngineError::NotInitialized)
    ));
}

#[test]
fn engine_rejects_calls_after_dispose() {
    let mut engine = SpacetimeEngine::new();
    engine.initialize();
    engine.dispose();

    assert_eq!(engine.phase(), EnginePhase::Disposed);
    assert!(matches!(engine.update(0.0), Err(EngineError::NotInitialized)));
    assert!(matches!(engine.reset(), Err(EngineError::NotInitialized)));
    assert!(matches!(engine.current_state(), Err(EngineError::NotInitialized)));
}

#[test]
fn engine_keeps_previous_parameters_on_rejected_update() {
    let mut engine = SpacetimeEngine::new();
    engine.initialize();
    engine.update_parameters(test_params()).unwrap();

    let mut bad = test_params();
    bad.time_scale = -1.0;
    assert!(engine.update_parameters(bad).is_err());

    // the simulation keeps running under the last-valid configuration
    let state = engine.current_state().unwrap();
    assert_eq!(state.parameters, test_params());
}

#[test]
fn engine_records_only_while_animating() {
    let mut engine = SpacetimeEngine::new();
    engine.initialize();
    engine.update_parameters(test_params()).unwrap();

    engine.update(0.0).unwrap();
    engine.update(1000.0).unwrap();
    assert_eq!(engine.trajectory().unwrap().len(), 0);

    engine.set_animating(true).unwrap();
    engine.update(2000.0).unwrap();
    engine.update(3000.0).unwrap();
    assert_eq!(engine.trajectory().unwrap().len(), 2);
}

#[test]
fn engine_parameter_update_shrinks_retention() {
    let mut engine = SpacetimeEngine::new();
    engine.initialize();
    engine.update_parameters(test_params()).unwrap();
    engine.set_animating(true).unwrap();

    for i in 0..10 {
        engine.update(i as f64 * 1000.0).unwrap();
    }
    assert_eq!(engine.trajectory().unwrap().len(), 10);

    let mut shrunk = test_params();
    shrunk.trajectory_limit = 4;
    engine.update_parameters(shrunk).unwrap();

    assert_eq!(engine.trajectory().unwrap().len(), 4);
}

#[test]
fn engine_reset_rebases_the_clock() {
    let mut engine = SpacetimeEngine::new();
    engine.initialize();
    engine.update_parameters(test_params()).unwrap();
    engine.set_animating(true).unwrap();

    engine.update(5000.0).unwrap();
    engine.update(6000.0).unwrap();
    assert_eq!(engine.trajectory().unwrap().len(), 2);

    engine.reset().unwrap();
    assert_eq!(engine.trajectory().unwrap().len(), 0);

    // the next timestamp becomes t = 0 again
    engine.update(9000.0).unwrap();
    assert!((engine.current_state().unwrap().time - 0.0).abs() < 1e-12);
    engine.update(10_000.0).unwrap();
    assert!((engine.current_state().unwrap().time - 1.0).abs() < 1e-12);
}

#[test]
fn engine_generate_field_uses_current_time() {
    let mut engine = SpacetimeEngine::new();
    engine.initialize();

    let mut p = test_params();
    p.cx = 1.0;
    p.cy = 0.0;
    p.cz = 0.0;
    engine.update_parameters(p).unwrap();
    engine.set_animating(true).unwrap();

    engine.update(0.0).unwrap();
    engine.update(2000.0).unwrap(); // position now (2, 0, 0)

    let request = test_request(FieldType::Spacetime, [2, 2, 2]);
    let f = engine.generate_field(&request).unwrap();

    // every sample of the unit grid sits left of x = 2, so all arrows lean +x
    for v in &f.vectors {
        assert!(v.direction.x > 0.0);
    }
}

#[test]
fn engine_invalid_field_request_yields_no_field() {
    let mut engine = SpacetimeEngine::new();
    engine.initialize();

    let request = test_request(FieldType::Velocity, [0, 1, 1]);
    let err = engine.generate_field(&request).unwrap_err();

    assert!(matches!(err, EngineError::InvalidFieldRequest(_)));
}

#[test]
fn engine_end_to_end_linear_run() {
    let mut engine = SpacetimeEngine::new();
    engine.initialize();

    let mut p = test_params();
    p.cx = 10.0;
    p.cy = 0.0;
    p.cz = 0.0;
    p.max_time = 10.0;
    engine.update_parameters(p).unwrap();
    engine.set_animating(true).unwrap();

    for ms in [0.0, 1000.0, 2000.0] {
        engine.update(ms).unwrap();
    }

    let trajectory = engine.trajectory().unwrap();
    assert_eq!(trajectory.len(), 3);

    let positions: Vec<NVec3> = trajectory.points().iter().map(|pt| pt.position).collect();
    assert_eq!(positions[0], NVec3::new(0.0, 0.0, 0.0));
    assert!((positions[1] - NVec3::new(10.0, 0.0, 0.0)).norm() < 1e-9);
    assert!((positions[2] - NVec3::new(20.0, 0.0, 0.0)).norm() < 1e-9);

    assert!((trajectory.total_distance() - 20.0).abs() < 1e-9);
    assert!((trajectory.average_speed() - 10.0).abs() < 1e-9);

    let state = engine.current_state().unwrap();
    assert!((state.position - NVec3::new(20.0, 0.0, 0.0)).norm() < 1e-9);
    assert_eq!(state.trajectory.point_count, 3);
    assert_eq!(state.velocity, NVec3::new(10.0, 0.0, 0.0));
    assert_eq!(state.acceleration, NVec3::zeros());
}
