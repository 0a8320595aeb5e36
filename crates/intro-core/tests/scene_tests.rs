// Whole-scene scenarios: the frame loop driven from the outside.

use intro_core::camera::PointerInput;
use intro_core::constants::*;
use intro_core::scene::{FrameEvents, IntroScene, Phase};

const DT: f32 = 1.0 / 60.0;

/// Step the scene frame by frame up to `until`, collecting every edge event.
fn run_until(scene: &mut IntroScene, from: f32, until: f32) -> Vec<(f32, FrameEvents)> {
    let mut events = Vec::new();
    let mut t = from;
    while t < until {
        let ev = scene.update(t, DT, PointerInput::default());
        if ev.start_audio || ev.begin_exit {
            events.push((t, ev));
        }
        t += DT;
    }
    events
}

#[test]
fn first_frame_everything_is_at_rest() {
    let mut scene = IntroScene::new(7);
    scene.update(0.0, 0.0, PointerInput::default());
    assert_eq!(intro_core::particles::assembly_progress(0.0), 0.0);
    assert_eq!(scene.rig.position.z, CAMERA_START_Z);
    let flags = scene.overlay_flags();
    assert!(!flags.text_visible && !flags.button_visible);
    assert_eq!(scene.phase(), Phase::Running);
    assert_eq!(scene.overlay_opacity(0.0), 1.0);
}

#[test]
fn midway_snapshot_is_in_flight_but_nothing_revealed() {
    let mut scene = IntroScene::new(7);
    let midway = ASSEMBLY_DELAY_SECS + ASSEMBLY_SPAN_SECS * 0.5;
    run_until(&mut scene, 0.0, midway + DT * 0.5);
    let p = intro_core::particles::assembly_progress(midway);
    assert!(p > 0.0 && p < 1.0, "progress {p} not strictly in flight");
    assert!(scene.rig.position.z < CAMERA_START_Z);
    assert!(scene.rig.position.z > CAMERA_TARGET_Z);
    let flags = scene.overlay_flags();
    assert!(!flags.text_visible && !flags.button_visible);
}

#[test]
fn audio_cue_fires_exactly_once_when_unmuted() {
    let mut scene = IntroScene::new(7);
    let events = run_until(&mut scene, 0.0, 5.0);
    let cues: Vec<_> = events.iter().filter(|(_, e)| e.start_audio).collect();
    assert_eq!(cues.len(), 1);
    assert!(cues[0].0 >= AUDIO_CUE_AT && cues[0].0 < AUDIO_CUE_AT + DT);
}

#[test]
fn muting_before_the_threshold_swallows_the_cue_for_good() {
    let mut scene = IntroScene::new(7);
    scene.set_muted(true);
    let events = run_until(&mut scene, 0.0, 5.0);
    assert!(events.iter().all(|(_, e)| !e.start_audio));
    // Unmuting later does not resurrect the one-shot
    scene.set_muted(false);
    let later = run_until(&mut scene, 5.0, 8.0);
    assert!(later.iter().all(|(_, e)| !e.start_audio));
}

#[test]
fn auto_exit_begins_the_fade_and_finishes_after_it() {
    let mut scene = IntroScene::new(7);
    let events = run_until(&mut scene, 0.0, AUTO_EXIT_AT + 0.1);
    let exits: Vec<_> = events.iter().filter(|(_, e)| e.begin_exit).collect();
    assert_eq!(exits.len(), 1);
    let started = exits[0].0;
    assert!(started >= AUTO_EXIT_AT);

    assert!(!scene.finished(started));
    assert!(!scene.finished(started + EXIT_FADE_SECS * 0.5));
    // f32 can't represent the fade end exactly; one frame past it must do
    assert!(scene.finished(started + EXIT_FADE_SECS + DT));
    assert!(scene.finished(started + 10.0));
}

#[test]
fn early_click_exits_once_and_cancels_the_auto_exit() {
    let mut scene = IntroScene::new(7);
    run_until(&mut scene, 0.0, 1.0);
    assert!(scene.request_exit(1.0));
    // A second request is a no-op, as is any later teardown trigger
    assert!(!scene.request_exit(1.0));
    assert!(!scene.request_exit(2.0));

    // The scheduled auto-exit must not fire on top of the user exit
    let events = run_until(&mut scene, 1.0, AUTO_EXIT_AT + 1.0);
    assert!(events.iter().all(|(_, e)| !e.begin_exit));

    assert!(!scene.finished(1.0 + EXIT_FADE_SECS * 0.5));
    assert!(scene.finished(1.0 + EXIT_FADE_SECS + DT));
}

#[test]
fn overlay_opacity_ramps_linearly_through_the_exit_fade() {
    let mut scene = IntroScene::new(7);
    scene.request_exit(2.0);
    assert_eq!(scene.overlay_opacity(2.0), 1.0);
    let half = scene.overlay_opacity(2.0 + EXIT_FADE_SECS * 0.5);
    assert!((half - 0.5).abs() < 1e-5);
    assert!(scene.overlay_opacity(2.0 + EXIT_FADE_SECS) < 1e-6);
    assert_eq!(scene.overlay_opacity(2.0 + EXIT_FADE_SECS + DT), 0.0);
    assert_eq!(scene.overlay_opacity(100.0), 0.0);
}

#[test]
fn particle_instances_fill_the_fixed_capacity_every_frame() {
    let mut scene = IntroScene::new(7);
    let capacity = scene.particle_capacity();
    assert_eq!(capacity, ASSEMBLY_COUNT + TUNNEL_COUNT + GLOW_COUNT);

    let mut instances = Vec::new();
    for frame in 0..120 {
        scene.update(frame as f32 * DT, DT, PointerInput::default());
        scene.particle_instances(&mut instances);
        assert_eq!(instances.len(), capacity);
        assert!(instances
            .iter()
            .all(|i| i.pos.iter().all(|v| v.is_finite()) && i.size > 0.0));
    }
}

#[test]
fn instance_packing_orders_the_three_systems() {
    let scene = IntroScene::new(7);
    let mut instances = Vec::new();
    scene.particle_instances(&mut instances);
    assert_eq!(instances[0].size, ASSEMBLY_POINT_SIZE);
    assert_eq!(instances[ASSEMBLY_COUNT].size, TUNNEL_POINT_SIZE);
    assert_eq!(
        instances[ASSEMBLY_COUNT + TUNNEL_COUNT].size,
        GLOW_POINT_SIZE
    );
    assert_eq!(instances[instances.len() - 1].color[3], GLOW_OPACITY);
}

#[test]
fn identical_seeds_give_identical_runs() {
    let mut a = IntroScene::new(99);
    let mut b = IntroScene::new(99);
    for frame in 0..300 {
        let t = frame as f32 * DT;
        a.update(t, DT, PointerInput { x: 0.3, y: -0.2 });
        b.update(t, DT, PointerInput { x: 0.3, y: -0.2 });
    }
    assert_eq!(a.assembly.positions(), b.assembly.positions());
    assert_eq!(a.tunnel.positions(), b.tunnel.positions());
    assert_eq!(a.rig.position, b.rig.position);
}

#[test]
fn logo_transform_is_finite_and_breathes_around_unit_scale() {
    let mut scene = IntroScene::new(7);
    for frame in 0..600 {
        let t = frame as f32 * DT;
        scene.update(t, DT, PointerInput::default());
        let m = scene.logo_transform();
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
        let scale = intro_core::logo::logo_scale(t);
        assert!((scale - 1.0).abs() <= LOGO_BREATH_AMPLITUDE + 1e-6);
    }
}
