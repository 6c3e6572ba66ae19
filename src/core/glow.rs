use super::config::{GlowStyle, Palette};
use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

/// One sinusoidal channel: `amplitude * sin(t * frequency + phase)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Oscillator {
    pub const fn sin(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase: 0.0,
        }
    }

    pub const fn cos(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase: FRAC_PI_2,
        }
    }

    #[inline]
    pub fn sample(&self, t: f32) -> f32 {
        self.amplitude * (t * self.frequency + self.phase).sin()
    }
}

/// Large soft sprite orbiting a fixed center with breathing opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowSprite {
    pub center: Vec3,
    pub drift_x: Oscillator,
    pub drift_y: Oscillator,
    pub breath: Oscillator,
    pub style: GlowStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowSample {
    pub position: Vec3,
    pub opacity: f32,
    pub color: Vec3,
}

impl GlowSprite {
    pub fn sample(&self, elapsed_sec: f32) -> GlowSample {
        let offset = Vec2::new(
            self.drift_x.sample(elapsed_sec),
            self.drift_y.sample(elapsed_sec),
        );
        GlowSample {
            position: self.center + offset.extend(0.0),
            opacity: (self.style.base_opacity + self.breath.sample(elapsed_sec)).max(0.0),
            color: self.style.color,
        }
    }
}

/// The two ambient glows. Frequencies differ per sprite so they never sync up.
pub fn ambient_glows(palette: &Palette) -> [GlowSprite; 2] {
    [
        GlowSprite {
            center: Vec3::new(-4.0, 2.0, -3.0),
            drift_x: Oscillator::sin(1.3, 0.2),
            drift_y: Oscillator::cos(1.1, 0.18),
            breath: Oscillator::sin(0.01, 0.8),
            style: palette.glows[0],
        },
        GlowSprite {
            center: Vec3::new(4.0, -2.0, -3.0),
            drift_x: Oscillator::cos(1.5, 0.16),
            drift_y: Oscillator::sin(1.2, 0.22),
            breath: Oscillator::cos(0.008, 0.7),
            style: palette.glows[1],
        },
    ]
}
