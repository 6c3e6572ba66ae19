//! Perspective camera with pointer parallax, and the host viewport it is
//! sized against.

use super::constants::*;
use glam::{Mat4, Vec2, Vec3};

/// Upper bound on the device pixel ratio used for the backing store.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Host viewport in CSS pixels plus the (clamped) device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Returns `None` for empty or non-finite sizes so callers can skip the event.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Option<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return None;
        }
        let pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Some(Self {
            width,
            height,
            pixel_ratio,
        })
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Backing-store size in device pixels, never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).round() as u32;
        let h = (self.height * self.pixel_ratio).round() as u32;
        (w.max(1), h.max(1))
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Ease the eye toward a small pointer-driven offset, always looking at the origin.
    pub fn follow_pointer(&mut self, pointer: Vec2, motion_factor: f32) {
        let rate = PARALLAX_FOLLOW * motion_factor;
        self.eye.x += (pointer.x * PARALLAX_RANGE_X - self.eye.x) * rate;
        self.eye.y += (pointer.y * PARALLAX_RANGE_Y - self.eye.y) * rate;
        self.target = Vec3::ZERO;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}
