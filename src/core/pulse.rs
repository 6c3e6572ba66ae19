//! Signal markers that travel along the live proximity graph.
//!
//! A pulse keeps interpolating between the same two point indices until it
//! finishes its traversal, even if those points drifted apart and the edge is
//! gone this frame. Only on completion does it pick a new edge from the live
//! set. Edges have no identity across frames, so there is nothing to follow.

use super::constants::{PULSE_HIDDEN_POSITION, PULSE_SPEED_MIN, PULSE_SPEED_SPAN};
use super::graph::Edge;
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub endpoints: (usize, usize),
    /// Normalized progress along the edge, in [0, 1).
    pub t: f32,
    pub speed: f32,
}

#[inline]
pub fn random_speed<R: Rng>(motion_factor: f32, rng: &mut R) -> f32 {
    (PULSE_SPEED_MIN + rng.gen::<f32>() * PULSE_SPEED_SPAN) * motion_factor
}

#[derive(Clone, Debug)]
pub struct PulseAnimator {
    pulses: Vec<Pulse>,
    positions: Vec<Vec3>,
    motion_factor: f32,
}

impl PulseAnimator {
    /// Seed `count` pulses between random point indices. No real edges exist
    /// yet, so endpoints are drawn from the whole point range.
    pub fn new<R: Rng>(count: usize, point_count: usize, motion_factor: f32, rng: &mut R) -> Self {
        let pick = |rng: &mut R| {
            if point_count == 0 {
                0
            } else {
                rng.gen_range(0..point_count)
            }
        };
        let pulses = (0..count)
            .map(|_| {
                let i = pick(rng);
                let j = pick(rng);
                Pulse {
                    endpoints: (i, j),
                    t: rng.gen::<f32>(),
                    speed: random_speed(motion_factor, rng),
                }
            })
            .collect();
        Self {
            pulses,
            positions: vec![PULSE_HIDDEN_POSITION; count],
            motion_factor,
        }
    }

    pub fn from_pulses(pulses: Vec<Pulse>, motion_factor: f32) -> Self {
        let n = pulses.len();
        Self {
            pulses,
            positions: vec![PULSE_HIDDEN_POSITION; n],
            motion_factor,
        }
    }

    /// Advance every pulse against this frame's edges and point positions.
    pub fn advance<R: Rng>(&mut self, edges: &[Edge], points: &[Vec3], rng: &mut R) {
        if edges.is_empty() {
            self.positions.fill(PULSE_HIDDEN_POSITION);
            return;
        }
        for (pulse, out) in self.pulses.iter_mut().zip(self.positions.iter_mut()) {
            pulse.t += pulse.speed;
            if pulse.t >= 1.0 {
                let edge = edges[rng.gen_range(0..edges.len())];
                pulse.endpoints = (edge.a, edge.b);
                pulse.t = 0.0;
                pulse.speed = random_speed(self.motion_factor, rng);
            }
            let (i, j) = pulse.endpoints;
            *out = match (points.get(i), points.get(j)) {
                (Some(&a), Some(&b)) => a.lerp(b, pulse.t),
                _ => PULSE_HIDDEN_POSITION,
            };
        }
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn pulses_mut(&mut self) -> &mut [Pulse] {
        &mut self.pulses
    }

    /// Rendered positions from the last [`advance`](Self::advance).
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }
}
