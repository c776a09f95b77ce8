use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer, Viewport, Weight,
};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use wgpu::{Device, Queue, RenderPass};

use crate::renderer::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Family name; `None` uses the system sans-serif face.
    pub font_family: Option<String>,
    pub font_size: f32,
    pub line_height: f32,
    pub color: Color,
    pub weight: Weight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            line_height: 20.0,
            color: Color::rgb(255, 255, 255),
            weight: Weight::NORMAL,
        }
    }
}

/// Top-left corner that centers a `content` sized box in a `surface` sized one.
pub fn centered_origin(surface: (f32, f32), content: (f32, f32)) -> (f32, f32) {
    (
        surface.0 * 0.5 - content.0 * 0.5,
        surface.1 * 0.5 - content.1 * 0.5,
    )
}

struct StaticText {
    buffer: Buffer,
    color: Color,
    size: (f32, f32),
    origin: (f32, f32),
}

/// Draws one line of text that is shaped once and then only repositioned.
pub struct TextRenderer {
    pub font_system: FontSystem,
    pub swash_cache: SwashCache,
    pub viewport: Viewport,
    pub atlas: TextAtlas,
    pub text_renderer: GlyphonTextRenderer,
    pub loaded_fonts: Vec<String>,
    text: Option<StaticText>,
}

impl TextRenderer {
    pub fn new(device: &Device, queue: &Queue, surface_format: wgpu::TextureFormat) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, surface_format);
        let text_renderer =
            GlyphonTextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            text_renderer,
            loaded_fonts: Vec::new(),
            text: None,
        }
    }

    /// Load a font from a file path and register it with a name
    pub fn load_font(&mut self, font_path: &Path, font_name: &str) -> Result<(), std::io::Error> {
        let font_data = fs::read(font_path)?;
        self.font_system.db_mut().load_font_data(font_data);
        self.loaded_fonts.push(font_name.to_string());
        debug!("loaded font {font_name} from {}", font_path.display());
        Ok(())
    }

    /// Shapes `text` once and centers it in a `surface_size` surface.
    pub fn set_static_text(&mut self, text: &str, mut style: TextStyle, surface_size: (u32, u32)) {
        if let Some(family) = &style.font_family {
            if !self.loaded_fonts.contains(family) {
                warn!("font '{family}' not loaded, falling back to a system font");
                style.font_family = None;
            }
        }

        let metrics = Metrics::new(style.font_size, style.line_height);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);

        let family = match &style.font_family {
            Some(name) => Family::Name(name.as_str()),
            None => Family::SansSerif,
        };
        let attrs = Attrs::new().family(family).weight(style.weight);
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let size = buffer
            .layout_runs()
            .fold((0.0f32, 0.0f32), |(width, height), run| {
                (width.max(run.line_w), height + run.line_height)
            });
        if size.0 == 0.0 {
            warn!("text '{text}' shaped to an empty layout");
        }

        let origin = centered_origin(
            (surface_size.0 as f32, surface_size.1 as f32),
            size,
        );
        self.text = Some(StaticText {
            buffer,
            color: style.color,
            size,
            origin,
        });
    }

    /// Re-centers the static text after the surface changed size.
    pub fn recenter(&mut self, surface_size: (u32, u32)) {
        if let Some(text) = self.text.as_mut() {
            text.origin = centered_origin(
                (surface_size.0 as f32, surface_size.1 as f32),
                text.size,
            );
        }
    }

    /// Uploads glyphs for the current frame.
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        surface_size: (u32, u32),
    ) -> Result<(), RenderError> {
        self.viewport.update(
            queue,
            Resolution {
                width: surface_size.0,
                height: surface_size.1,
            },
        );

        let text_areas = self.text.iter().map(|text| TextArea {
            buffer: &text.buffer,
            left: text.origin.0,
            top: text.origin.1,
            scale: 1.0,
            bounds: TextBounds {
                left: 0,
                top: 0,
                right: surface_size.0 as i32,
                bottom: surface_size.1 as i32,
            },
            default_color: text.color,
            custom_glyphs: &[],
        });

        self.text_renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            text_areas,
            &mut self.swash_cache,
        )?;
        Ok(())
    }

    pub fn render(&mut self, render_pass: &mut RenderPass) -> Result<(), RenderError> {
        self.text_renderer
            .render(&self.atlas, &self.viewport, render_pass)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_content_in_surface() {
        assert_eq!(centered_origin((1024.0, 768.0), (200.0, 100.0)), (412.0, 334.0));
    }

    #[test]
    fn oversized_content_starts_off_surface() {
        let (x, y) = centered_origin((100.0, 100.0), (300.0, 120.0));
        assert_eq!((x, y), (-100.0, -10.0));
    }

    #[test]
    fn default_style_is_white_system_font() {
        let style = TextStyle::default();
        assert_eq!(style.font_family, None);
        assert_eq!(style.color, Color::rgb(255, 255, 255));
    }
}
