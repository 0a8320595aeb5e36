//! The whole intro as one explicit state value: per-frame mutation happens
//! only inside [`IntroScene::update`], which takes the clock sample and the
//! latest pointer input and returns the frame's edge events. Frontends own
//! the platform resources and draw from the buffers this exposes.

use crate::camera::{CameraRig, PointerInput};
use crate::constants::*;
use crate::logo::{self, LogoGeometry};
use crate::particles::{glow_params, tunnel_params, AssemblyField, StreamField};
use crate::timeline::{OverlayFlags, Timeline};
use glam::Mat4;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run phase. There is no torn-down variant here: teardown is the frontends'
/// job, and it happens after `finished` reports true (or immediately if the
/// render surface never came up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Running,
    Exiting { since: f32 },
}

/// Edge events the frontend acts on once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameEvents {
    /// Attempt the one-shot audio cue (already gated on the mute flag).
    pub start_audio: bool,
    /// The exit transition started this frame (user click or auto-exit).
    pub begin_exit: bool,
}

/// One GPU instance per particle, shared by both frontends' instanced
/// point-sprite pipelines.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

pub struct IntroScene {
    pub assembly: AssemblyField,
    pub tunnel: StreamField,
    pub glow: StreamField,
    pub rig: CameraRig,
    pub geometry: LogoGeometry,
    timeline: Timeline,
    muted: bool,
    phase: Phase,
    elapsed: f32,
}

impl IntroScene {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            assembly: AssemblyField::new(ASSEMBLY_COUNT, &mut rng),
            tunnel: StreamField::new(tunnel_params(), &mut rng),
            glow: StreamField::new(glow_params(), &mut rng),
            rig: CameraRig::new(),
            geometry: LogoGeometry::new(),
            timeline: Timeline::new(),
            muted: false,
            phase: Phase::Running,
            elapsed: 0.0,
        }
    }

    /// Advance the whole simulation by one frame.
    pub fn update(&mut self, elapsed: f32, dt: f32, pointer: PointerInput) -> FrameEvents {
        self.elapsed = elapsed;
        self.assembly.update(elapsed);
        self.tunnel.advance(dt);
        self.glow.advance(dt);
        self.rig.update(dt, pointer);

        let sampled = self.timeline.sample(elapsed);
        let mut events = FrameEvents::default();
        if sampled.start_audio && !self.muted {
            events.start_audio = true;
        }
        if sampled.auto_exit {
            events.begin_exit = self.request_exit(elapsed);
        }
        events
    }

    /// Begin the exit transition. Idempotent: the first call wins, cancels
    /// the pending auto-exit, and returns true; later calls return false.
    pub fn request_exit(&mut self, elapsed: f32) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Exiting { since: elapsed };
                self.timeline.cancel_auto_exit();
                log::info!("intro exit started at {:.2}s", elapsed);
                true
            }
            Phase::Exiting { .. } => false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn exiting(&self) -> bool {
        matches!(self.phase, Phase::Exiting { .. })
    }

    /// True once the exit fade has fully played out and the frontend should
    /// tear down and signal completion.
    pub fn finished(&self, elapsed: f32) -> bool {
        match self.phase {
            Phase::Running => false,
            Phase::Exiting { since } => elapsed - since >= EXIT_FADE_SECS,
        }
    }

    /// Overlay opacity for the host page: 1.0 while running, ramping to 0.0
    /// across the exit fade.
    pub fn overlay_opacity(&self, elapsed: f32) -> f32 {
        match self.phase {
            Phase::Running => 1.0,
            Phase::Exiting { since } => 1.0 - ((elapsed - since) / EXIT_FADE_SECS).clamp(0.0, 1.0),
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn overlay_flags(&self) -> OverlayFlags {
        self.timeline.flags()
    }

    pub fn logo_transform(&self) -> Mat4 {
        logo::logo_transform(self.elapsed)
    }

    /// Total particle population across the three systems; instance buffers
    /// are sized to this once.
    pub fn particle_capacity(&self) -> usize {
        self.assembly.len() + self.tunnel.len() + self.glow.len()
    }

    /// Pack every particle into `out` as GPU instances: assembly first, then
    /// tunnel (per-point colors), then glow.
    pub fn particle_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.reserve(self.particle_capacity());

        let push_uniform =
            |out: &mut Vec<ParticleInstance>, positions: &[f32], size: f32, color: [f32; 4]| {
                for p in positions.chunks_exact(3) {
                    out.push(ParticleInstance {
                        pos: [p[0], p[1], p[2]],
                        size,
                        color,
                    });
                }
            };

        push_uniform(
            out,
            self.assembly.positions(),
            ASSEMBLY_POINT_SIZE,
            [ASSEMBLY_COLOR[0], ASSEMBLY_COLOR[1], ASSEMBLY_COLOR[2], ASSEMBLY_OPACITY],
        );

        match self.tunnel.colors() {
            Some(colors) => {
                for (p, c) in self
                    .tunnel
                    .positions()
                    .chunks_exact(3)
                    .zip(colors.chunks_exact(3))
                {
                    out.push(ParticleInstance {
                        pos: [p[0], p[1], p[2]],
                        size: TUNNEL_POINT_SIZE,
                        color: [c[0], c[1], c[2], TUNNEL_OPACITY],
                    });
                }
            }
            None => push_uniform(
                out,
                self.tunnel.positions(),
                TUNNEL_POINT_SIZE,
                [TUNNEL_COLOR_A[0], TUNNEL_COLOR_A[1], TUNNEL_COLOR_A[2], TUNNEL_OPACITY],
            ),
        }

        push_uniform(
            out,
            self.glow.positions(),
            GLOW_POINT_SIZE,
            [GLOW_COLOR[0], GLOW_COLOR[1], GLOW_COLOR[2], GLOW_OPACITY],
        );
    }
}
