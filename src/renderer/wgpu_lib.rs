//! WGPU renderer for the application window.
//!
//! [`WgpuRenderer`] owns the surface, device and queue. Each frame it clears the surface to
//! the background color, draws the prepared text and presents.

use crate::renderer::RenderError;
use crate::renderer::text::TextRenderer;

/// Background clear color, 8-bit sRGB.
pub const BACKGROUND_COLOR: [u8; 3] = [21, 21, 21];

pub struct WgpuRenderer {
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    /// The surface configuration (format, size, etc.).
    pub surface_config: wgpu::SurfaceConfiguration,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    clear_color: wgpu::Color,
}

impl WgpuRenderer {
    /// Initializes the device and configures `surface` at `width` x `height`.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let adapter = Self::create_adapter(instance, &surface).await?;
        let (device, queue) = Self::create_device(&adapter).await?;
        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;

        surface.configure(&device, &surface_config);
        let clear_color = clear_color(BACKGROUND_COLOR, surface_config.format.is_srgb());

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            clear_color,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Reconfigures the surface. Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Clears, draws the text and presents one frame.
    ///
    /// A lost or outdated surface is reconfigured and the frame is skipped.
    pub fn render(&mut self, text_renderer: &mut TextRenderer) -> Result<(), RenderError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        text_renderer.prepare(&self.device, &self.queue, self.size())?;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear And Text Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            text_renderer.render(&mut render_pass)?;
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> Result<wgpu::Adapter, RenderError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .ok_or(RenderError::NoAdapter)
    }

    async fn create_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), RenderError> {
        let device = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        Ok(device)
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, RenderError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: capabilities.alpha_modes[0],
            view_formats: vec![],
        })
    }
}

/// Converts an 8-bit sRGB color to the clear color of a surface.
///
/// sRGB surfaces expect linear values, others take the encoded value as-is.
pub fn clear_color(rgb: [u8; 3], srgb_surface: bool) -> wgpu::Color {
    let channel = |c: u8| {
        let encoded = c as f64 / 255.0;
        if srgb_surface {
            srgb_to_linear(encoded)
        } else {
            encoded
        }
    };
    wgpu::Color {
        r: channel(rgb[0]),
        g: channel(rgb[1]),
        b: channel(rgb[2]),
        a: 1.0,
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_passes_through_on_linear_surfaces() {
        let color = clear_color(BACKGROUND_COLOR, false);
        assert!((color.r - 21.0 / 255.0).abs() < 1e-9);
        assert_eq!(color.r, color.g);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn clear_color_is_linearized_on_srgb_surfaces() {
        let color = clear_color(BACKGROUND_COLOR, true);
        assert!((color.r - 0.007499).abs() < 1e-5);
        assert!((clear_color([255, 255, 255], true).r - 1.0).abs() < 1e-9);
        assert_eq!(clear_color([0, 0, 0], true).r, 0.0);
    }
}
