// Sanity relationships between tuning constants. These catch accidental
// edits that would silently break the sequencing.

use intro_core::constants::*;

#[test]
fn timeline_thresholds_are_strictly_ordered() {
    assert!(AUDIO_CUE_AT < TEXT_REVEAL_AT);
    assert!(TEXT_REVEAL_AT < BUTTON_REVEAL_AT);
    assert!(BUTTON_REVEAL_AT < AUTO_EXIT_AT);
    assert!(EXIT_FADE_SECS > 0.0);
}

#[test]
fn assembly_finishes_before_the_button_appears() {
    assert!(ASSEMBLY_DELAY_SECS + ASSEMBLY_SPAN_SECS <= BUTTON_REVEAL_AT);
}

#[test]
fn recycle_band_is_wide_and_behind_the_resting_camera() {
    assert!(STREAM_FAR_Z < STREAM_NEAR_Z);
    assert!(STREAM_NEAR_Z > CAMERA_TARGET_Z);
    // Spawn spreads fit inside the band on the far side
    assert!(-TUNNEL_Z_SPREAD / 2.0 > STREAM_FAR_Z);
    assert!(-GLOW_Z_SPREAD / 2.0 > STREAM_FAR_Z);
}

#[test]
fn camera_flies_inward_with_positive_rates() {
    assert!(CAMERA_TARGET_Z < CAMERA_START_Z);
    assert!(CAMERA_FLY_RATE > 0.0);
    assert!(POINTER_SMOOTH_RATE > 0.0);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
}

#[test]
fn cue_envelope_is_well_formed() {
    assert!(CUE_START_HZ < CUE_END_HZ);
    assert!(CUE_ATTACK_SECS < CUE_RELEASE_END_SECS);
    assert!(CUE_RELEASE_END_SECS <= CUE_STOP_SECS);
    assert!(CUE_SWEEP_SECS <= CUE_STOP_SECS);
    assert!(CUE_FLOOR_GAIN > 0.0 && CUE_FLOOR_GAIN < CUE_PEAK_GAIN);
    assert!(CUE_PEAK_GAIN <= 1.0);
}

#[test]
fn populations_and_visual_parameters_are_positive() {
    assert!(ASSEMBLY_COUNT > 0 && TUNNEL_COUNT > 0 && GLOW_COUNT > 0);
    assert!(ASSEMBLY_TARGET_RADIUS_MIN > LOGO_CAGE_RADIUS * 0.5);
    assert!(TUNNEL_RADIUS_MIN > LOGO_CAGE_RADIUS);
    for v in [ASSEMBLY_OPACITY, TUNNEL_OPACITY, GLOW_OPACITY] {
        assert!(v > 0.0 && v <= 1.0);
    }
    for c in [
        BACKGROUND_COLOR,
        ASSEMBLY_COLOR,
        TUNNEL_COLOR_A,
        TUNNEL_COLOR_B,
        GLOW_COLOR,
    ] {
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
    }
    assert!(FOG_DENSITY > 0.0);
    // The backing-store cap keeps crispness without unbounded pixel cost
    assert!((1.0..=2.0).contains(&MAX_PIXEL_RATIO));
}

#[test]
fn logo_core_fits_inside_the_cage() {
    assert!(LOGO_CORE_RADIUS < LOGO_CAGE_RADIUS);
    assert!(LOGO_BREATH_AMPLITUDE > 0.0 && LOGO_BREATH_AMPLITUDE < 0.5);
}
