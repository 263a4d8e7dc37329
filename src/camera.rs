//! Orbit camera around the tree with slow auto-rotation

use std::f32::consts::TAU;

use crate::config::CameraConfig;
use crate::constants::*;
use crate::math::{Mat4, Vec3};

/// Radians per pixel of pointer drag
const ORBIT_SENSITIVITY: f32 = 0.01;
/// Distance change per wheel unit
const ZOOM_STEP: f32 = 0.5;

/// Spherical-coordinate camera. Input is accumulated into pending deltas
/// which are eased in over the following frames.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    distance: f32,
    /// Angle around Y, zero looking down -Z
    azimuth: f32,
    /// Angle from +Y
    polar: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub fov: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let start = Vec3::new(CAMERA_START[0], CAMERA_START[1], CAMERA_START[2]);
        let radius = start.length();

        Self {
            target: Vec3::ZERO,
            distance: config.distance.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE),
            azimuth: start.x.atan2(start.z),
            polar: (start.y / radius).clamp(-1.0, 1.0).acos().clamp(CAMERA_MIN_POLAR, CAMERA_MAX_POLAR),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            auto_rotate: config.auto_rotate,
            auto_rotate_speed: config.auto_rotate_speed,
            fov: CAMERA_FOV_DEG.to_radians(),
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Advance auto-rotation and ease in pending input
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            self.pending_azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt.max(0.0);
        }

        self.azimuth = (self.azimuth + self.pending_azimuth * CAMERA_DAMPING).rem_euclid(TAU);
        self.polar = (self.polar + self.pending_polar * CAMERA_DAMPING)
            .clamp(CAMERA_MIN_POLAR, CAMERA_MAX_POLAR);

        self.pending_azimuth *= 1.0 - CAMERA_DAMPING;
        self.pending_polar *= 1.0 - CAMERA_DAMPING;
    }

    /// Pointer drag in pixels
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.pending_azimuth -= delta_x * ORBIT_SENSITIVITY;
        self.pending_polar -= delta_y * ORBIT_SENSITIVITY;
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta * ZOOM_STEP).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target
            + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a).scale(self.distance)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position(), self.target, Vec3::UP)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(self.fov, aspect, CAMERA_NEAR, CAMERA_FAR)
    }
}
