// Tuning constants for the intro sequence, shared by the web and native
// frontends. Rates are per second; the original per-frame factors were
// measured at 60 fps.

// Particle populations (fixed for the life of a run)
pub const ASSEMBLY_COUNT: usize = 400;
pub const TUNNEL_COUNT: usize = 1500;
pub const GLOW_COUNT: usize = 200;

// Assembly targets sit on a shell just outside the logo cage
pub const ASSEMBLY_TARGET_RADIUS_MIN: f32 = 1.5;
pub const ASSEMBLY_TARGET_RADIUS_SPAN: f32 = 0.5;
// Start positions: target direction scaled far out, biased toward the camera
pub const ASSEMBLY_SCATTER_MIN: f32 = 5.0;
pub const ASSEMBLY_SCATTER_SPAN: f32 = 10.0;
pub const ASSEMBLY_SCATTER_Z_BIAS: f32 = 10.0;
// Convergence window: progress is 0 until the delay, 1 at delay + span
pub const ASSEMBLY_DELAY_SECS: f32 = 0.5;
pub const ASSEMBLY_SPAN_SECS: f32 = 2.5;
// Idle wobble once assembled
pub const ASSEMBLY_JITTER_AMPLITUDE: f32 = 0.05;

// Tunnel streaks: annulus in xy, long spread in z
pub const TUNNEL_RADIUS_MIN: f32 = 8.0;
pub const TUNNEL_RADIUS_SPAN: f32 = 25.0;
pub const TUNNEL_Z_SPREAD: f32 = 150.0;
pub const TUNNEL_SPEED_MIN: f32 = 30.0;
pub const TUNNEL_SPEED_SPAN: f32 = 90.0;

// Glow haze: same motion model, slower and closer in
pub const GLOW_RADIUS_MAX: f32 = 15.0;
pub const GLOW_Z_SPREAD: f32 = 100.0;
pub const GLOW_SPEED_MIN: f32 = 12.0;
pub const GLOW_SPEED_SPAN: f32 = 18.0;

// Recycle band for both streaming fields. Derived from the camera constants
// below: near_z sits behind the eye once the fly-in settles at z = 4.5.
pub const STREAM_NEAR_Z: f32 = 20.0;
pub const STREAM_FAR_Z: f32 = -100.0;

// Camera
pub const CAMERA_START_Z: f32 = 12.0;
pub const CAMERA_TARGET_Z: f32 = 4.5;
pub const CAMERA_FOV_Y_RADIANS: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
// 1 - exp(-rate/60) ~= the original per-frame factors (0.025 and 0.05)
pub const CAMERA_FLY_RATE: f32 = 1.52;
pub const POINTER_SMOOTH_RATE: f32 = 3.08;
pub const PARALLAX_SCALE: f32 = 0.5;
pub const ROLL_SCALE: f32 = -0.15;
pub const TILT_PITCH_SCALE: f32 = 0.05;
pub const TILT_YAW_SCALE: f32 = -0.05;

// Timeline thresholds (seconds of elapsed run time)
pub const AUDIO_CUE_AT: f32 = 0.1;
pub const TEXT_REVEAL_AT: f32 = 2.0;
pub const BUTTON_REVEAL_AT: f32 = 3.5;
pub const AUTO_EXIT_AT: f32 = 6.0;
pub const EXIT_FADE_SECS: f32 = 0.8;

// Logo motion and geometry
pub const LOGO_SPIN_X: f32 = 0.15;
pub const LOGO_SPIN_Y: f32 = 0.25;
pub const LOGO_BREATH_AMPLITUDE: f32 = 0.02;
pub const LOGO_BREATH_FREQUENCY: f32 = 2.0;
pub const LOGO_CORE_RADIUS: f32 = 1.2;
pub const LOGO_CAGE_RADIUS: f32 = 1.8;

// One-shot audio cue: exponential sweep with a linear attack and an
// exponential release down to the silence floor
pub const CUE_START_HZ: f32 = 100.0;
pub const CUE_END_HZ: f32 = 600.0;
pub const CUE_SWEEP_SECS: f32 = 3.0;
pub const CUE_ATTACK_SECS: f32 = 1.0;
pub const CUE_PEAK_GAIN: f32 = 0.05;
pub const CUE_RELEASE_END_SECS: f32 = 4.0;
pub const CUE_STOP_SECS: f32 = 4.5;
pub const CUE_FLOOR_GAIN: f32 = 0.001;

// Canvas backing-store scale cap; beyond 2x density the extra pixels cost
// more than they show
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Palette (linear-ish RGB from the site theme)
pub const BACKGROUND_COLOR: [f32; 3] = [0.008, 0.024, 0.09];
// Exponential-squared depth fade applied to the particle passes
pub const FOG_DENSITY: f32 = 0.015;
pub const ASSEMBLY_COLOR: [f32; 3] = [0.737, 0.075, 0.996];
pub const TUNNEL_COLOR_A: [f32; 3] = [0.0, 0.953, 1.0];
pub const TUNNEL_COLOR_B: [f32; 3] = [0.737, 0.075, 0.996];
pub const GLOW_COLOR: [f32; 3] = [0.314, 0.251, 1.0];

// Point sprite sizing and opacity per system
pub const ASSEMBLY_POINT_SIZE: f32 = 0.08;
pub const ASSEMBLY_OPACITY: f32 = 0.8;
pub const TUNNEL_POINT_SIZE: f32 = 0.12;
pub const TUNNEL_OPACITY: f32 = 0.7;
pub const GLOW_POINT_SIZE: f32 = 1.5;
pub const GLOW_OPACITY: f32 = 0.05;

// Logo materials: translucent solid core, faint wireframe cage
pub const LOGO_CORE_COLOR: [f32; 3] = [0.737, 0.075, 0.996];
pub const LOGO_CORE_OPACITY: f32 = 0.85;
pub const LOGO_CAGE_COLOR: [f32; 3] = [0.0, 0.953, 1.0];
pub const LOGO_CAGE_OPACITY: f32 = 0.3;

// Lighting set for the logo: ambient plus two colored point lights
pub const AMBIENT_LIGHT: [f32; 3] = [0.13, 0.13, 0.13];
pub const LIGHT_A_COLOR: [f32; 3] = [0.0, 0.953, 1.0];
pub const LIGHT_A_POSITION: [f32; 3] = [5.0, 5.0, 10.0];
pub const LIGHT_B_COLOR: [f32; 3] = [0.737, 0.075, 0.996];
pub const LIGHT_B_POSITION: [f32; 3] = [-5.0, -5.0, 5.0];
pub const LIGHT_INTENSITY: f32 = 15.0;
pub const LIGHT_RANGE: f32 = 30.0;
