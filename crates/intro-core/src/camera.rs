//! Fly-in camera with pointer parallax and banking.
//!
//! Three inputs drive the rig each frame and must never conflict: time pulls
//! z toward its resting distance, pointer position offsets x/y (parallax) and
//! adds roll/pitch/yaw on top of the look-at orientation. All smoothing is
//! `1 - exp(-rate * dt)` so the approach looks identical at any refresh rate.

use crate::constants::*;
use glam::{Mat4, Quat, Vec3};

/// Normalized pointer position, x right and y up, both in [-1, 1].
/// Defaults to the screen center; a device that never reports pointer events
/// leaves every derived offset at exactly zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    pub x: f32,
    pub y: f32,
}

pub struct CameraRig {
    pub position: Vec3,
    roll: f32,
    tilt_pitch: f32,
    tilt_yaw: f32,
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_START_Z),
            roll: 0.0,
            tilt_pitch: 0.0,
            tilt_yaw: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, pointer: PointerInput) {
        // Exponential approach toward the resting distance; never overshoots
        let fly = 1.0 - (-CAMERA_FLY_RATE * dt).exp();
        self.position.z += (CAMERA_TARGET_Z - self.position.z) * fly;

        // Parallax: smoothed toward the pointer-scaled target. The raw
        // pointer is itself already a smoothed target, giving the double
        // smoothing that keeps noisy input from jittering the frame.
        let k = 1.0 - (-POINTER_SMOOTH_RATE * dt).exp();
        self.position.x += (pointer.x * PARALLAX_SCALE - self.position.x) * k;
        self.position.y += (pointer.y * PARALLAX_SCALE - self.position.y) * k;

        // Banking and tilt, each low-pass filtered independently
        self.roll += (pointer.x * ROLL_SCALE - self.roll) * k;
        self.tilt_pitch += (pointer.y * TILT_PITCH_SCALE - self.tilt_pitch) * k;
        self.tilt_yaw += (pointer.x * TILT_YAW_SCALE - self.tilt_yaw) * k;
    }

    /// World-to-view matrix: look at the origin first, then layer the
    /// pointer tilt in camera space. Applying the tilt after the look-at is
    /// what keeps the look-at from cancelling it.
    pub fn view_matrix(&self) -> Mat4 {
        let look = Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y);
        let tilt = Quat::from_euler(
            glam::EulerRot::XYZ,
            self.tilt_pitch,
            self.tilt_yaw,
            self.roll,
        );
        Mat4::from_quat(tilt.conjugate()) * look
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(CAMERA_FOV_Y_RADIANS, aspect.max(1e-3), CAMERA_NEAR, CAMERA_FAR)
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn tilt(&self) -> (f32, f32) {
        (self.tilt_pitch, self.tilt_yaw)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}
