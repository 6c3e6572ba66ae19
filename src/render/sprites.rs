use crate::core::{GlowSample, PointColors, PointLayer};
use std::ops::Range;
use wgpu;

const POINT_SOFTNESS: f32 = 0.0;
const GLOW_SOFTNESS: f32 = 1.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpriteInstance {
    pub(crate) center_size: [f32; 4],
    pub(crate) color: [f32; 4],
    pub(crate) shape: [f32; 4],
}

const SPRITE_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4, 2 => Float32x4];

pub(crate) fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SpriteInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &SPRITE_ATTRIBUTES,
    }
}

/// Append one point layer and return its instance range.
pub(crate) fn push_points(out: &mut Vec<SpriteInstance>, layer: &PointLayer<'_>) -> Range<u32> {
    let start = out.len() as u32;
    let size = layer.style.size;
    for (i, p) in layer.positions.iter().enumerate() {
        let rgb = match layer.colors {
            PointColors::PerPoint(colors) => colors.get(i).copied().unwrap_or(layer.style.color),
            PointColors::Uniform(c) => c,
        };
        out.push(SpriteInstance {
            center_size: [p.x, p.y, p.z, size],
            color: [rgb.x, rgb.y, rgb.z, 1.0],
            shape: [POINT_SOFTNESS, 0.0, 0.0, 0.0],
        });
    }
    start..out.len() as u32
}

pub(crate) fn push_glows(
    out: &mut Vec<SpriteInstance>,
    glows: &[GlowSample],
    scale: f32,
) -> Range<u32> {
    let start = out.len() as u32;
    for g in glows {
        out.push(SpriteInstance {
            center_size: [g.position.x, g.position.y, g.position.z, scale],
            color: [g.color.x, g.color.y, g.color.z, g.opacity],
            shape: [GLOW_SOFTNESS, 0.0, 0.0, 0.0],
        });
    }
    start..out.len() as u32
}
