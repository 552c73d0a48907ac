use std::time::Instant;

use crate::simulation::colormap::ColorMap;
use crate::simulation::field::{generate, FieldRequest, FieldType};
use crate::simulation::kinematics;
use crate::simulation::params::PhysicalParameters;
use crate::simulation::states::NVec3;
use crate::simulation::trajectory::Trajectory;

/// Time one field generation per resolution, up to the sample cap
pub fn bench_field() {
    // Per-axis resolutions to test; 64^3 is the cap
    let resolutions = [4u32, 8, 16, 32, 64];

    let params = PhysicalParameters {
        cx: 3.0,
        cy: 2.0,
        cz: 1.0,
        ..Default::default()
    };

    for n in resolutions {
        let request = FieldRequest {
            field_type: FieldType::Spacetime,
            grid_size: NVec3::new(10.0, 10.0, 10.0),
            resolution: [n, n, n],
            color_map: ColorMap::Viridis,
            arrow_scale: 1.0,
        };

        let t0 = Instant::now();
        let field = match generate(&params, &request, 1.0) {
            Ok(field) => field,
            Err(e) => {
                println!("bench_field: generation failed at {n}^3: {e}");
                continue;
            }
        };
        let dt = t0.elapsed().as_secs_f64() * 1000.0;

        println!(
            "bench_field: {n:>2}^3 = {:>6} samples in {dt:.3} ms",
            field.vectors.len()
        );
    }
}

/// Time trajectory recording throughput at a fixed retention window
pub fn bench_trajectory() {
    let params = PhysicalParameters {
        cx: 1.0,
        cy: 2.0,
        cz: 3.0,
        max_time: 0.0, // unclamped so every record covers new ground
        ..Default::default()
    };

    let counts = [1_000usize, 10_000, 100_000];

    for n in counts {
        let mut trajectory = Trajectory::new(1_000);

        let t0 = Instant::now();
        for i in 0..n {
            // one record per simulated frame at ~60 fps
            let state = kinematics::evaluate(&params, i as f64 * 0.016);
            trajectory.record(state);
        }
        let dt = t0.elapsed().as_secs_f64() * 1000.0;

        println!(
            "bench_trajectory: {n:>6} records in {dt:.3} ms ({} retained)",
            trajectory.len()
        );
    }
}
