// Host-side tests for the three point-cloud systems.

use intro_core::constants::*;
use intro_core::particles::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn assembly_progress_is_zero_through_the_delay() {
    assert_eq!(assembly_progress(0.0), 0.0);
    assert_eq!(assembly_progress(ASSEMBLY_DELAY_SECS * 0.5), 0.0);
    assert_eq!(assembly_progress(ASSEMBLY_DELAY_SECS), 0.0);
}

#[test]
fn assembly_progress_saturates_exactly_at_one() {
    let done = ASSEMBLY_DELAY_SECS + ASSEMBLY_SPAN_SECS;
    assert_eq!(assembly_progress(done), 1.0);
    // No overshoot or oscillation after convergence
    for i in 0..100 {
        let t = done + i as f32 * 0.37;
        assert_eq!(assembly_progress(t), 1.0, "progress drifted at t={t}");
    }
}

#[test]
fn assembly_progress_is_monotonic_and_decelerating() {
    let done = ASSEMBLY_DELAY_SECS + ASSEMBLY_SPAN_SECS;
    let mut prev = 0.0;
    let mut prev_step = f32::MAX;
    let steps = 200;
    for i in 1..=steps {
        let t = ASSEMBLY_DELAY_SECS + ASSEMBLY_SPAN_SECS * i as f32 / steps as f32;
        let p = assembly_progress(t);
        assert!(p >= prev, "progress decreased at t={t}");
        let step = p - prev;
        // Cubic ease-out: increments shrink toward the end
        assert!(step <= prev_step + 1e-6, "progress accelerated at t={t}");
        prev = p;
        prev_step = step;
        assert!(t <= done + 1e-6);
    }
    assert!((prev - 1.0).abs() < 1e-6);
}

#[test]
fn assembly_population_is_invariant_across_the_run() {
    let mut field = AssemblyField::new(ASSEMBLY_COUNT, &mut rng());
    assert_eq!(field.len(), ASSEMBLY_COUNT);
    for frame in 0..600 {
        field.update(frame as f32 / 60.0);
        assert_eq!(field.len(), ASSEMBLY_COUNT);
        assert!(field.positions().iter().all(|v| v.is_finite()));
    }
}

#[test]
fn assembly_at_time_zero_sits_at_the_scattered_start() {
    let mut field = AssemblyField::new(64, &mut rng());
    let before: Vec<f32> = field.positions().to_vec();
    field.update(0.0);
    // Progress and jitter are both zero, so nothing moves
    assert_eq!(field.positions(), &before[..]);
}

#[test]
fn assembled_points_land_on_the_target_shell() {
    let mut field = AssemblyField::new(ASSEMBLY_COUNT, &mut rng());
    field.update(ASSEMBLY_DELAY_SECS + ASSEMBLY_SPAN_SECS + 1.0);
    let lo = ASSEMBLY_TARGET_RADIUS_MIN - ASSEMBLY_JITTER_AMPLITUDE * 2.0;
    let hi = ASSEMBLY_TARGET_RADIUS_MIN + ASSEMBLY_TARGET_RADIUS_SPAN + ASSEMBLY_JITTER_AMPLITUDE * 2.0;
    for p in field.positions().chunks_exact(3) {
        let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        assert!(r >= lo && r <= hi, "assembled point at radius {r}");
    }
}

#[test]
fn stream_depth_increases_until_reset_and_never_passes_the_near_plane() {
    let mut field = StreamField::new(tunnel_params(), &mut rng());
    let dt = 1.0 / 60.0;
    let mut prev: Vec<f32> = field
        .positions()
        .chunks_exact(3)
        .map(|p| p[2])
        .collect();
    for _ in 0..2000 {
        field.advance(dt);
        for (i, p) in field.positions().chunks_exact(3).enumerate() {
            let z = p[2];
            if z == STREAM_FAR_Z {
                // Recycled this frame (or spawned exactly there)
            } else {
                assert!(z > prev[i], "depth did not increase for point {i}");
            }
            assert!(z <= STREAM_NEAR_Z, "point {i} escaped past the near plane: {z}");
            prev[i] = z;
        }
    }
}

#[test]
fn stream_population_and_speeds_are_invariant() {
    let mut field = StreamField::new(glow_params(), &mut rng());
    assert_eq!(field.len(), GLOW_COUNT);
    let speeds: Vec<f32> = (0..field.len()).map(|i| field.speed(i)).collect();
    for _ in 0..600 {
        field.advance(1.0 / 60.0);
    }
    assert_eq!(field.len(), GLOW_COUNT);
    for (i, s) in speeds.iter().enumerate() {
        assert_eq!(field.speed(i), *s, "speed changed for point {i}");
    }
}

#[test]
fn tunnel_colors_interpolate_the_two_endpoints() {
    let field = StreamField::new(tunnel_params(), &mut rng());
    let colors = field.colors().expect("tunnel carries per-point colors");
    assert_eq!(colors.len(), TUNNEL_COUNT * 3);
    for c in colors.chunks_exact(3) {
        for k in 0..3 {
            let lo = TUNNEL_COLOR_A[k].min(TUNNEL_COLOR_B[k]);
            let hi = TUNNEL_COLOR_A[k].max(TUNNEL_COLOR_B[k]);
            assert!(c[k] >= lo - 1e-6 && c[k] <= hi + 1e-6);
        }
    }
    // Glow is a single-color field
    let glow = StreamField::new(glow_params(), &mut rng());
    assert!(glow.colors().is_none());
}

#[test]
fn assembly_start_positions_are_biased_toward_the_viewer() {
    let field = AssemblyField::new(ASSEMBLY_COUNT, &mut rng());
    let mean_z: f32 = field
        .positions()
        .chunks_exact(3)
        .map(|p| p[2])
        .sum::<f32>()
        / ASSEMBLY_COUNT as f32;
    assert!(
        mean_z > ASSEMBLY_SCATTER_Z_BIAS * 0.5,
        "expected a +z bias, mean z = {mean_z}"
    );
}
