//! The three point-cloud systems of the intro: assembly fragments that
//! converge into the logo shell, the high-speed tunnel streaks, and the slow
//! volumetric glow haze.
//!
//! Positions live in flat `Vec<f32>` xyz buffers rather than per-point
//! structs so a frontend can upload them to the GPU without repacking.

use crate::constants::*;
use rand::prelude::*;

/// Cubic ease-out assembly progress. Exactly 0.0 before the delay and
/// exactly 1.0 at or after `ASSEMBLY_DELAY_SECS + ASSEMBLY_SPAN_SECS`.
#[inline]
pub fn assembly_progress(elapsed: f32) -> f32 {
    let p = ((elapsed - ASSEMBLY_DELAY_SECS) / ASSEMBLY_SPAN_SECS).clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Fragments that materialize into the logo shell. Each point keeps its
/// `start` and `target`; `current` is rewritten every frame as
/// `lerp(start, target, ease) + jitter * ease`.
pub struct AssemblyField {
    start: Vec<f32>,
    target: Vec<f32>,
    current: Vec<f32>,
}

impl AssemblyField {
    pub fn new(count: usize, rng: &mut StdRng) -> Self {
        let mut start = vec![0.0f32; count * 3];
        let mut target = vec![0.0f32; count * 3];
        for i in 0..count {
            // Uniform direction on the unit sphere
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            let cos_phi = rng.gen::<f32>() * 2.0 - 1.0;
            let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
            let (dx, dy, dz) = (sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi);

            let r = ASSEMBLY_TARGET_RADIUS_MIN + rng.gen::<f32>() * ASSEMBLY_TARGET_RADIUS_SPAN;
            let idx = i * 3;
            target[idx] = dx * r;
            target[idx + 1] = dy * r;
            target[idx + 2] = dz * r;

            // Scatter along the same direction, pushed toward the viewer so
            // the fragments fly in instead of merely shrinking
            let scatter = ASSEMBLY_SCATTER_MIN + rng.gen::<f32>() * ASSEMBLY_SCATTER_SPAN;
            start[idx] = target[idx] * scatter;
            start[idx + 1] = target[idx + 1] * scatter;
            start[idx + 2] = target[idx + 2] * scatter + ASSEMBLY_SCATTER_Z_BIAS;
        }
        let current = start.clone();
        Self { start, target, current }
    }

    pub fn len(&self) -> usize {
        self.current.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Rewrite every `current` position for the given run time. The jitter
    /// term vanishes at progress 0 and is fully present once assembled.
    pub fn update(&mut self, elapsed: f32) {
        let ease = assembly_progress(elapsed);
        let jitter = ASSEMBLY_JITTER_AMPLITUDE * ease;
        for i in 0..self.len() {
            let idx = i * 3;
            let fi = i as f32;
            let cx = self.start[idx] + (self.target[idx] - self.start[idx]) * ease;
            let cy = self.start[idx + 1] + (self.target[idx + 1] - self.start[idx + 1]) * ease;
            let cz = self.start[idx + 2] + (self.target[idx + 2] - self.start[idx + 2]) * ease;
            self.current[idx] = cx + (elapsed + fi).sin() * jitter;
            self.current[idx + 1] = cy + (elapsed + fi * 0.5).cos() * jitter;
            self.current[idx + 2] = cz;
        }
    }

    /// Flat xyz triples, ready for a vertex buffer upload.
    pub fn positions(&self) -> &[f32] {
        &self.current
    }
}

/// Spawn geometry and recycle band for a streaming field.
#[derive(Clone, Copy, Debug)]
pub struct StreamParams {
    pub count: usize,
    pub radius_min: f32,
    pub radius_span: f32,
    pub z_spread: f32,
    pub speed_min: f32,
    pub speed_span: f32,
    /// Depth at which a point is recycled back to `far_z`.
    pub near_z: f32,
    pub far_z: f32,
    /// Endpoint colors blended per point with a fresh random weight.
    pub color_mix: Option<([f32; 3], [f32; 3])>,
}

pub fn tunnel_params() -> StreamParams {
    StreamParams {
        count: TUNNEL_COUNT,
        radius_min: TUNNEL_RADIUS_MIN,
        radius_span: TUNNEL_RADIUS_SPAN,
        z_spread: TUNNEL_Z_SPREAD,
        speed_min: TUNNEL_SPEED_MIN,
        speed_span: TUNNEL_SPEED_SPAN,
        near_z: STREAM_NEAR_Z,
        far_z: STREAM_FAR_Z,
        color_mix: Some((TUNNEL_COLOR_A, TUNNEL_COLOR_B)),
    }
}

pub fn glow_params() -> StreamParams {
    StreamParams {
        count: GLOW_COUNT,
        radius_min: 0.0,
        radius_span: GLOW_RADIUS_MAX,
        z_spread: GLOW_Z_SPREAD,
        speed_min: GLOW_SPEED_MIN,
        speed_span: GLOW_SPEED_SPAN,
        near_z: STREAM_NEAR_Z,
        far_z: STREAM_FAR_Z,
        color_mix: None,
    }
}

/// A fixed-population ring buffer in depth space: points stream toward the
/// camera and respawn at the far plane, keeping x/y, speed and color.
pub struct StreamField {
    positions: Vec<f32>,
    speeds: Vec<f32>,
    colors: Option<Vec<f32>>,
    near_z: f32,
    far_z: f32,
}

impl StreamField {
    pub fn new(params: StreamParams, rng: &mut StdRng) -> Self {
        let mut positions = vec![0.0f32; params.count * 3];
        let mut speeds = vec![0.0f32; params.count];
        let mut colors = params.color_mix.map(|_| vec![0.0f32; params.count * 3]);
        for i in 0..params.count {
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let radius = params.radius_min + rng.gen::<f32>() * params.radius_span;
            let idx = i * 3;
            positions[idx] = angle.cos() * radius;
            positions[idx + 1] = angle.sin() * radius;
            positions[idx + 2] = (rng.gen::<f32>() - 0.5) * params.z_spread;
            speeds[i] = params.speed_min + rng.gen::<f32>() * params.speed_span;
            if let (Some(buf), Some((a, b))) = (colors.as_mut(), params.color_mix) {
                let w = rng.gen::<f32>();
                for c in 0..3 {
                    buf[idx + c] = a[c] + (b[c] - a[c]) * w;
                }
            }
        }
        Self {
            positions,
            speeds,
            colors,
            near_z: params.near_z,
            far_z: params.far_z,
        }
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    /// Advance every point by its own speed. Any point past the near
    /// threshold after the move is respawned at the far plane.
    pub fn advance(&mut self, dt: f32) {
        for i in 0..self.len() {
            let z = &mut self.positions[i * 3 + 2];
            *z += self.speeds[i] * dt;
            if *z > self.near_z {
                *z = self.far_z;
            }
        }
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Per-point rgb triples; `None` for single-color fields.
    pub fn colors(&self) -> Option<&[f32]> {
        self.colors.as_deref()
    }

    pub fn speed(&self, index: usize) -> f32 {
        self.speeds[index]
    }
}
