//! Owned simulation state and the single per-frame tick.
//!
//! Everything the render loop mutates lives in [`NeuralScene`]. Within one
//! tick the order is fixed: integrate all points, rebuild the proximity graph
//! from the new positions, then advance pulses against that same graph.

use super::camera::{Camera, Viewport};
use super::config::{BackdropConfig, LayerStyle, Palette};
use super::constants::*;
use super::field::PointField;
use super::glow::{ambient_glows, GlowSample, GlowSprite};
use super::graph::ProximityGraph;
use super::physics::{self, DerivedLayers, StepInput};
use super::pulse::PulseAnimator;
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

/// Slow per-layer rotation that gives the field a sense of depth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerDrift {
    pub front_yaw: f32,
    pub back_yaw: f32,
    pub line_yaw: f32,
    pub line_pitch: f32,
}

impl LayerDrift {
    pub fn advance(&mut self, elapsed_sec: f32, motion_factor: f32) {
        self.front_yaw += FRONT_YAW_STEP * motion_factor;
        self.back_yaw += BACK_YAW_STEP * motion_factor;
        self.line_yaw += LINE_YAW_STEP * motion_factor;
        self.line_pitch = (elapsed_sec * LINE_PITCH_SPEED).sin() * LINE_PITCH_AMPLITUDE;
    }

    pub fn front_model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.front_yaw)
    }

    pub fn back_model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.back_yaw)
    }

    pub fn line_model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.line_yaw) * Mat4::from_rotation_x(self.line_pitch)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum PointColors<'a> {
    PerPoint(&'a [Vec3]),
    Uniform(Vec3),
}

#[derive(Clone, Copy, Debug)]
pub struct PointLayer<'a> {
    pub positions: &'a [Vec3],
    pub colors: PointColors<'a>,
    pub model: Mat4,
    pub style: LayerStyle,
}

#[derive(Clone, Copy, Debug)]
pub struct LineLayer<'a> {
    pub vertices: &'a [Vec3],
    pub model: Mat4,
    pub style: LayerStyle,
}

/// Read-only view of one frame, handed to a render backend.
#[derive(Clone, Copy, Debug)]
pub struct SceneFrame<'a> {
    pub view: Mat4,
    pub projection: Mat4,
    pub back: PointLayer<'a>,
    pub front: PointLayer<'a>,
    pub lines: LineLayer<'a>,
    pub pulses: PointLayer<'a>,
    pub glows: [GlowSample; 2],
    pub glow_scale: f32,
}

pub struct NeuralScene<R: Rng> {
    config: BackdropConfig,
    palette: Palette,
    motion_factor: f32,
    field: PointField,
    derived: DerivedLayers,
    graph: ProximityGraph,
    pulses: PulseAnimator,
    glows: [GlowSprite; 2],
    glow_samples: [GlowSample; 2],
    drift: LayerDrift,
    camera: Camera,
    pointer: Vec2,
    ticks: u64,
    rng: R,
}

impl<R: Rng> NeuralScene<R> {
    pub fn new(config: BackdropConfig, viewport: Viewport, mut rng: R) -> Self {
        let motion_factor = config.motion_factor();
        let n = config.point_count();
        let field = PointField::generate(n, motion_factor, &mut rng);
        let pulses = PulseAnimator::new(config.pulse_count(), n, motion_factor, &mut rng);
        Self::assemble(config, viewport, field, pulses, rng)
    }

    /// Build a scene around a prepared field and pulse pool.
    pub fn with_parts(
        config: BackdropConfig,
        viewport: Viewport,
        field: PointField,
        pulses: PulseAnimator,
        rng: R,
    ) -> Self {
        Self::assemble(config, viewport, field, pulses, rng)
    }

    fn assemble(
        config: BackdropConfig,
        viewport: Viewport,
        field: PointField,
        pulses: PulseAnimator,
        rng: R,
    ) -> Self {
        let palette = config.palette();
        let glows = ambient_glows(&palette);
        let glow_samples = [glows[0].sample(0.0), glows[1].sample(0.0)];
        let mut derived = DerivedLayers::with_len(field.len());
        for (i, &p) in field.positions.iter().enumerate() {
            derived.front_colors[i] = palette.node;
            derived.back_positions[i] = physics::back_position(p);
            derived.back_colors[i] = palette.node;
        }
        Self {
            config,
            palette,
            motion_factor: config.motion_factor(),
            graph: ProximityGraph::with_capacity(field.len()),
            field,
            derived,
            pulses,
            glows,
            glow_samples,
            drift: LayerDrift::default(),
            camera: Camera::new(viewport.aspect()),
            pointer: Vec2::ZERO,
            ticks: 0,
            rng,
        }
    }

    /// Advance the whole scene by one frame.
    pub fn tick(&mut self, elapsed_sec: f32) {
        let pointer_world =
            (!self.config.reduced_motion).then(|| physics::pointer_to_world(self.pointer));
        let input = StepInput {
            pointer_world,
            motion_factor: self.motion_factor,
            elapsed_sec,
            base_color: self.palette.node,
        };
        physics::step(&mut self.field, &input, &mut self.derived);
        self.graph.rebuild(&self.field.positions);
        self.pulses
            .advance(self.graph.edges(), &self.field.positions, &mut self.rng);

        self.drift.advance(elapsed_sec, self.motion_factor);
        for (sample, glow) in self.glow_samples.iter_mut().zip(self.glows.iter()) {
            *sample = glow.sample(elapsed_sec);
        }
        self.camera.follow_pointer(self.pointer, self.motion_factor);
        self.ticks += 1;
    }

    /// Normalized pointer in [-1, 1], y up. Read on the next tick.
    pub fn set_pointer(&mut self, pointer: Vec2) {
        if pointer.is_finite() {
            self.pointer = pointer;
        }
    }

    /// Only the camera changes on resize; scene content is kept as is.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.set_aspect(viewport.aspect());
    }

    pub fn frame(&self) -> SceneFrame<'_> {
        SceneFrame {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            back: PointLayer {
                positions: &self.derived.back_positions,
                colors: PointColors::PerPoint(&self.derived.back_colors),
                model: self.drift.back_model(),
                style: self.palette.back,
            },
            front: PointLayer {
                positions: &self.field.positions,
                colors: PointColors::PerPoint(&self.derived.front_colors),
                model: self.drift.front_model(),
                style: self.palette.front,
            },
            lines: LineLayer {
                vertices: self.graph.segment_vertices(),
                model: self.drift.line_model(),
                style: self.palette.lines,
            },
            pulses: PointLayer {
                positions: self.pulses.positions(),
                colors: PointColors::Uniform(self.palette.pulses.color),
                model: self.drift.line_model(),
                style: self.palette.pulses,
            },
            glows: self.glow_samples,
            glow_scale: GLOW_SCALE,
        }
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn motion_factor(&self) -> f32 {
        self.motion_factor
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn derived(&self) -> &DerivedLayers {
        &self.derived
    }

    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    pub fn pulses(&self) -> &PulseAnimator {
        &self.pulses
    }

    pub fn pulses_mut(&mut self) -> &mut PulseAnimator {
        &mut self.pulses
    }

    pub fn drift(&self) -> &LayerDrift {
        &self.drift
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
