use super::helpers;
use wgpu;

/// Multisampled color target resolved into the swapchain each frame.
///
/// Sized to the surface; recreated whenever the surface is reconfigured.
pub(crate) struct RenderTargets {
    pub(crate) msaa_tex: wgpu::Texture,
    pub(crate) msaa_view: wgpu::TextureView,
    format: wgpu::TextureFormat,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let (msaa_tex, msaa_view) = helpers::create_color_texture(
            device,
            "msaa_color",
            width,
            height,
            format,
            helpers::MSAA_SAMPLES,
        );
        Self {
            msaa_tex,
            msaa_view,
            format,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.msaa_tex.destroy();
        (self.msaa_tex, self.msaa_view) = helpers::create_color_texture(
            device,
            "msaa_color",
            width,
            height,
            self.format,
            helpers::MSAA_SAMPLES,
        );
    }

    pub(crate) fn destroy(&self) {
        self.msaa_tex.destroy();
    }
}
