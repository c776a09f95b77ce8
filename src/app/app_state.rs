//! AppState module.
//!
//! [`AppState`] holds everything that only exists while a window does.

use std::path::Path;

use glyphon::{Color, Weight};
use tracing::debug;
use winit::window::Window;

use crate::app::{DISPLAY_FONT_NAME, DISPLAY_FONT_PATH, DISPLAY_FONT_SIZE, DISPLAY_TEXT};
use crate::renderer::RenderError;
use crate::renderer::text::{TextRenderer, TextStyle};
use crate::renderer::wgpu_lib::WgpuRenderer;

/// Rendering resources bound to the application window.
///
/// Fields drop in declaration order, so text resources go before the GPU renderer.
pub struct AppState {
    /// The text renderer for the static line of text.
    pub text_renderer: TextRenderer,
    /// The WGPU renderer owning the surface, device and queue.
    pub wgpu_renderer: WgpuRenderer,
}

impl AppState {
    /// Creates the renderers for `window`'s surface.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        window: &Window,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let wgpu_renderer = WgpuRenderer::new(instance, surface, size.width, size.height).await?;

        let mut text_renderer = TextRenderer::new(
            &wgpu_renderer.device,
            &wgpu_renderer.queue,
            wgpu_renderer.format(),
        );
        if let Err(err) = text_renderer.load_font(Path::new(DISPLAY_FONT_PATH), DISPLAY_FONT_NAME)
        {
            debug!("{DISPLAY_FONT_PATH} not loaded ({err}), using system fonts");
        }

        Ok(Self {
            text_renderer,
            wgpu_renderer,
        })
    }

    /// Shapes the display text. Called once when the application starts.
    pub fn prepare_text(&mut self) {
        let style = TextStyle {
            font_family: Some(DISPLAY_FONT_NAME.to_string()),
            font_size: DISPLAY_FONT_SIZE,
            line_height: DISPLAY_FONT_SIZE * 1.2,
            color: Color::rgb(255, 255, 255),
            weight: Weight::NORMAL,
        };
        self.text_renderer
            .set_static_text(DISPLAY_TEXT, style, self.wgpu_renderer.size());
    }

    /// Resizes the surface and keeps the text centered.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
        self.text_renderer.recenter(self.wgpu_renderer.size());
    }

    pub fn render(&mut self) -> Result<(), RenderError> {
        self.wgpu_renderer.render(&mut self.text_renderer)
    }
}
