use crate::core::{max_pairs, RenderBackend, SceneFrame, Viewport};
use glam::Mat4;
use std::ops::Range;

mod helpers;
mod lines;
mod sprites;
mod targets;
use sprites::SpriteInstance;
use targets::RenderTargets;

// ===================== WebGPU state =====================

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LayerUniforms {
    view_model: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    tint: [f32; 4],
}

impl LayerUniforms {
    fn new(view: Mat4, model: Mat4, projection: Mat4, tint: [f32; 4]) -> Self {
        Self {
            view_model: (view * model).to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            tint,
        }
    }
}

/// Per-draw uniform buffer and the bind group that exposes it.
struct LayerBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl LayerBinding {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = helpers::create_uniform_buffer(
            device,
            label,
            std::mem::size_of::<LayerUniforms>() as u64,
        );
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }
}

struct GpuResources<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    targets: RenderTargets,

    sprite_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,

    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    line_buffer: wgpu::Buffer,
    line_capacity: usize,

    glow_layer: LayerBinding,
    back_layer: LayerBinding,
    line_layer: LayerBinding,
    front_layer: LayerBinding,
    pulse_layer: LayerBinding,
}

impl GpuResources<'_> {
    fn destroy(&self) {
        self.instance_buffer.destroy();
        self.line_buffer.destroy();
        for layer in [
            &self.glow_layer,
            &self.back_layer,
            &self.line_layer,
            &self.front_layer,
            &self.pulse_layer,
        ] {
            layer.buffer.destroy();
        }
        self.targets.destroy();
        self.device.destroy();
    }
}

/// wgpu implementation of [`RenderBackend`].
///
/// All GPU objects live in one optional bundle so `release` can drop them
/// exactly once; later calls and draws after release are no-ops.
pub struct GpuState<'a> {
    inner: Option<GpuResources<'a>>,
    instances: Vec<SpriteInstance>,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    /// Configure `surface` and build pipelines sized for `points` nodes plus
    /// `extra_sprites` pulses and glows.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'a>,
        (width, height): (u32, u32),
        points: usize,
        extra_sprites: usize,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Colors are linear; draw through an sRGB view even when the canvas
        // itself only offers a plain unorm format.
        let view_format = format.add_srgb_suffix();
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: if view_format == format {
                vec![]
            } else {
                vec![view_format]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height, view_format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("network_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::NETWORK_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("layer_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("layer_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let sprite_pipeline = helpers::make_network_pipeline(
            &device,
            "sprite_pipeline",
            &pl,
            &shader,
            ("vs_sprite", "fs_sprite"),
            &[sprites::instance_layout()],
            wgpu::PrimitiveTopology::TriangleList,
            view_format,
        );
        let line_pipeline = helpers::make_network_pipeline(
            &device,
            "line_pipeline",
            &pl,
            &shader,
            ("vs_line", "fs_line"),
            &[lines::vertex_layout()],
            wgpu::PrimitiveTopology::LineList,
            view_format,
        );

        // back + front layers, then pulses and glows
        let instance_capacity = points * 2 + extra_sprites;
        let instance_buffer = helpers::create_vertex_buffer(
            &device,
            "sprite_instances",
            (instance_capacity * std::mem::size_of::<SpriteInstance>()) as u64,
        );
        let line_capacity = max_pairs(points) * 2;
        let line_buffer = helpers::create_vertex_buffer(
            &device,
            "edge_vertices",
            (line_capacity * std::mem::size_of::<glam::Vec3>()) as u64,
        );

        log::info!(
            "[gpu] surface {}x{} format={:?} view={:?} alpha={:?}",
            width,
            height,
            format,
            view_format,
            alpha_mode
        );

        Ok(Self {
            inner: Some(GpuResources {
                glow_layer: LayerBinding::new(&device, &bgl, "glow_layer"),
                back_layer: LayerBinding::new(&device, &bgl, "back_layer"),
                line_layer: LayerBinding::new(&device, &bgl, "line_layer"),
                front_layer: LayerBinding::new(&device, &bgl, "front_layer"),
                pulse_layer: LayerBinding::new(&device, &bgl, "pulse_layer"),
                surface,
                device,
                queue,
                config,
                view_format,
                targets,
                sprite_pipeline,
                line_pipeline,
                instance_buffer,
                instance_capacity,
                line_buffer,
                line_capacity,
            }),
            instances: Vec::with_capacity(instance_capacity),
            width,
            height,
        })
    }

    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        if let Some(g) = self.inner.as_mut() {
            g.config.width = width;
            g.config.height = height;
            g.surface.configure(&g.device, &g.config);
            g.targets.recreate(&g.device, width, height);
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    pub fn render(&mut self, frame: &SceneFrame<'_>) -> anyhow::Result<()> {
        let Some(g) = self.inner.as_mut() else {
            return Ok(());
        };

        let surface_tex = match g.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                g.surface.configure(&g.device, &g.config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = surface_tex.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(g.view_format),
            ..Default::default()
        });

        self.instances.clear();
        let glows = sprites::push_glows(&mut self.instances, &frame.glows, frame.glow_scale);
        let back = sprites::push_points(&mut self.instances, &frame.back);
        let front = sprites::push_points(&mut self.instances, &frame.front);
        let pulses = sprites::push_points(&mut self.instances, &frame.pulses);
        self.instances.truncate(g.instance_capacity);
        if !self.instances.is_empty() {
            g.queue
                .write_buffer(&g.instance_buffer, 0, bytemuck::cast_slice(&self.instances));
        }

        let segments = lines::fit_segments(frame.lines.vertices, g.line_capacity);
        if !segments.is_empty() {
            g.queue
                .write_buffer(&g.line_buffer, 0, bytemuck::cast_slice(segments));
        }

        let write = |binding: &LayerBinding, model: Mat4, tint: [f32; 4]| {
            let u = LayerUniforms::new(frame.view, model, frame.projection, tint);
            g.queue.write_buffer(&binding.buffer, 0, bytemuck::bytes_of(&u));
        };
        write(&g.glow_layer, Mat4::IDENTITY, [1.0, 1.0, 1.0, 1.0]);
        write(&g.back_layer, frame.back.model, opacity_tint(frame.back.style.opacity));
        write(&g.front_layer, frame.front.model, opacity_tint(frame.front.style.opacity));
        write(&g.pulse_layer, frame.pulses.model, opacity_tint(frame.pulses.style.opacity));
        let c = frame.lines.style.color;
        write(
            &g.line_layer,
            frame.lines.model,
            [c.x, c.y, c.z, frame.lines.style.opacity],
        );

        let mut encoder = g
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("network_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &g.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let limit = self.instances.len() as u32;
            let clamp = |r: Range<u32>| r.start.min(limit)..r.end.min(limit);

            rpass.set_pipeline(&g.sprite_pipeline);
            rpass.set_vertex_buffer(0, g.instance_buffer.slice(..));
            for (binding, range) in [
                (&g.glow_layer, clamp(glows)),
                (&g.back_layer, clamp(back)),
            ] {
                if !range.is_empty() {
                    rpass.set_bind_group(0, &binding.bind_group, &[]);
                    rpass.draw(0..6, range);
                }
            }

            if !segments.is_empty() {
                rpass.set_pipeline(&g.line_pipeline);
                rpass.set_bind_group(0, &g.line_layer.bind_group, &[]);
                rpass.set_vertex_buffer(0, g.line_buffer.slice(..));
                rpass.draw(0..segments.len() as u32, 0..1);
            }

            rpass.set_pipeline(&g.sprite_pipeline);
            rpass.set_vertex_buffer(0, g.instance_buffer.slice(..));
            for (binding, range) in [
                (&g.front_layer, clamp(front)),
                (&g.pulse_layer, clamp(pulses)),
            ] {
                if !range.is_empty() {
                    rpass.set_bind_group(0, &binding.bind_group, &[]);
                    rpass.draw(0..6, range);
                }
            }
        }

        g.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }

    pub fn release(&mut self) {
        if let Some(g) = self.inner.take() {
            g.destroy();
            log::info!("[gpu] resources released");
        }
    }
}

#[inline]
fn opacity_tint(opacity: f32) -> [f32; 4] {
    [1.0, 1.0, 1.0, opacity]
}

impl RenderBackend for GpuState<'_> {
    fn resize(&mut self, viewport: Viewport) {
        let (w, h) = viewport.physical_size();
        self.resize_if_needed(w, h);
    }

    fn draw(&mut self, frame: &SceneFrame<'_>) -> anyhow::Result<()> {
        self.render(frame)
    }

    fn release(&mut self) {
        GpuState::release(self);
    }
}

impl Drop for GpuState<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
