//! Per-frame integration of the front point layer and derivation of the
//! back layer.
//!
//! The spring toward each anchor is tiny per frame but dominates over long
//! horizons; without it the field turns into a random walk and the network
//! shape dissolves.

use super::constants::*;
use super::field::PointField;
use glam::{Vec2, Vec3};

/// Colors and positions derived from the front layer each frame.
#[derive(Clone, Debug, Default)]
pub struct DerivedLayers {
    pub front_colors: Vec<Vec3>,
    pub back_positions: Vec<Vec3>,
    pub back_colors: Vec<Vec3>,
}

impl DerivedLayers {
    pub fn with_len(n: usize) -> Self {
        Self {
            front_colors: vec![Vec3::ZERO; n],
            back_positions: vec![Vec3::ZERO; n],
            back_colors: vec![Vec3::ZERO; n],
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StepInput {
    /// Pointer position on the z = 0 plane; `None` disables the pointer term.
    pub pointer_world: Option<Vec3>,
    pub motion_factor: f32,
    pub elapsed_sec: f32,
    pub base_color: Vec3,
}

/// Map a normalized pointer (x right, y up, both in [-1, 1]) onto the world plane.
#[inline]
pub fn pointer_to_world(pointer: Vec2) -> Vec3 {
    Vec3::new(pointer.x, pointer.y, 0.0) * POINTER_WORLD_SCALE
}

#[inline]
pub fn spring_impulse(anchor: Vec3, position: Vec3) -> Vec3 {
    (anchor - position) * ANCHOR_GAIN
}

/// Planar push away from the pointer, fading linearly in squared distance
/// to zero at the capture radius.
#[inline]
pub fn pointer_impulse(position: Vec3, pointer_world: Vec3, motion_factor: f32) -> Vec3 {
    let d = Vec2::new(position.x - pointer_world.x, position.y - pointer_world.y);
    let dist_sq = d.length_squared();
    if dist_sq >= POINTER_CAPTURE_RADIUS_SQ {
        return Vec3::ZERO;
    }
    let inv = 1.0 / dist_sq.sqrt().max(POINTER_MIN_DISTANCE);
    let force = (1.0 - dist_sq / POINTER_CAPTURE_RADIUS_SQ) * POINTER_FORCE * motion_factor;
    Vec3::new(d.x * inv * force, d.y * inv * force, 0.0)
}

/// Bounce one axis off the walls at `±half`. An overshoot is folded back
/// inside and the velocity is reversed only while it still points outward,
/// so a steady outward push cannot walk a point past the wall.
#[inline]
pub fn reflect_axis(position: f32, velocity: f32, half: f32) -> (f32, f32) {
    if position > half {
        (2.0 * half - position, if velocity > 0.0 { -velocity } else { velocity })
    } else if position < -half {
        (-2.0 * half - position, if velocity < 0.0 { -velocity } else { velocity })
    } else {
        (position, velocity)
    }
}

/// Reflect a point off the bounding box, axis by axis.
#[inline]
pub fn reflect(position: Vec3, velocity: Vec3) -> (Vec3, Vec3) {
    let h = FIELD_HALF_EXTENT;
    let (px, vx) = reflect_axis(position.x, velocity.x, h.x);
    let (py, vy) = reflect_axis(position.y, velocity.y, h.y);
    let (pz, vz) = reflect_axis(position.z, velocity.z, h.z);
    (Vec3::new(px, py, pz), Vec3::new(vx, vy, vz))
}

#[inline]
pub fn back_position(front: Vec3) -> Vec3 {
    Vec3::new(
        front.x * BACK_LAYER_SCALE,
        front.y * BACK_LAYER_SCALE,
        front.z + BACK_LAYER_Z_OFFSET,
    )
}

#[inline]
pub fn twinkle(elapsed_sec: f32, motion_factor: f32, phase: f32) -> f32 {
    TWINKLE_BASE + TWINKLE_SPAN * (elapsed_sec * (TWINKLE_SPEED * motion_factor) + phase).sin()
}

#[inline]
pub fn back_brightness(twinkle: f32) -> f32 {
    BACK_BRIGHTNESS_BASE + twinkle * BACK_BRIGHTNESS_SPAN
}

/// Advance every point by one frame and refresh the derived layers.
pub fn step(field: &mut PointField, input: &StepInput, derived: &mut DerivedLayers) {
    let n = field.len();
    if derived.front_colors.len() != n {
        *derived = DerivedLayers::with_len(n);
    }
    for i in 0..n {
        let anchor = field.anchors[i];
        let mut position = field.positions[i];
        let mut velocity = field.velocities[i];

        velocity += spring_impulse(anchor, position);
        if let Some(pointer) = input.pointer_world {
            velocity += pointer_impulse(position, pointer, input.motion_factor);
        }
        position += velocity;
        (position, velocity) = reflect(position, velocity);

        field.positions[i] = position;
        field.velocities[i] = velocity;

        let tw = twinkle(input.elapsed_sec, input.motion_factor, field.twinkle_phases[i]);
        derived.front_colors[i] = input.base_color * tw;
        derived.back_positions[i] = back_position(position);
        derived.back_colors[i] = input.base_color * back_brightness(tw);
    }
}
