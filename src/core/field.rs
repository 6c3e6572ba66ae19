use super::constants::{FIELD_HALF_EXTENT, INITIAL_SPEED_SPAN};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Front-layer point state. Anchors and twinkle phases are fixed for the
/// lifetime of the field; positions and velocities are advanced every frame.
#[derive(Clone, Debug, Default)]
pub struct PointField {
    pub anchors: Vec<Vec3>,
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub twinkle_phases: Vec<f32>,
}

impl PointField {
    /// Sample `count` anchors uniformly inside [`FIELD_HALF_EXTENT`].
    pub fn generate<R: Rng>(count: usize, motion_factor: f32, rng: &mut R) -> Self {
        let mut field = Self {
            anchors: Vec::with_capacity(count),
            positions: Vec::with_capacity(count),
            velocities: Vec::with_capacity(count),
            twinkle_phases: Vec::with_capacity(count),
        };
        let h = FIELD_HALF_EXTENT;
        for _ in 0..count {
            let anchor = Vec3::new(
                (rng.gen::<f32>() - 0.5) * 2.0 * h.x,
                (rng.gen::<f32>() - 0.5) * 2.0 * h.y,
                (rng.gen::<f32>() - 0.5) * 2.0 * h.z,
            );
            let velocity = Vec3::new(
                (rng.gen::<f32>() - 0.5) * INITIAL_SPEED_SPAN,
                (rng.gen::<f32>() - 0.5) * INITIAL_SPEED_SPAN,
                (rng.gen::<f32>() - 0.5) * INITIAL_SPEED_SPAN,
            ) * motion_factor;
            field.anchors.push(anchor);
            field.positions.push(anchor);
            field.velocities.push(velocity);
            field.twinkle_phases.push(rng.gen::<f32>() * TAU);
        }
        field
    }

    /// Build a field from explicit positions at rest. Anchors equal positions.
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        let n = positions.len();
        Self {
            anchors: positions.clone(),
            positions,
            velocities: vec![Vec3::ZERO; n],
            twinkle_phases: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
