use glam::Vec3;
use wgpu;

const LINE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

pub(crate) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &LINE_ATTRIBUTES,
    }
}

/// Clip an edge vertex list to what the preallocated buffer can hold,
/// keeping whole segments.
#[inline]
pub(crate) fn fit_segments(vertices: &[Vec3], capacity: usize) -> &[Vec3] {
    let n = vertices.len().min(capacity) & !1;
    &vertices[..n]
}
