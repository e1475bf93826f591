//! Eye position overlay drawn with glyphon.

use crate::camera::CameraState;
use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer, Viewport,
};

/// Heading shown above the three coordinate lines.
pub const HEADING: &str = "Your eye is currently at";

const FONT_SIZE: f32 = 16.0;
const LINE_HEIGHT: f32 = 20.0;
const MARGIN: f32 = 12.0;

/// Full overlay text for a camera position.
pub fn hud_lines(camera: &CameraState) -> String {
    let [x, y, z] = camera.describe();
    format!("{HEADING}\n{x}\n{y}\n{z}")
}

pub struct HudText {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    text_renderer: TextRenderer,
    buffer: Buffer,
    /// Last text handed to the buffer; reshaping is skipped when unchanged.
    text: String,
    scale_factor: f32,
    color: Color,
}

impl HudText {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        scale_factor: f32,
    ) -> Self {
        let mut font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, surface_format);
        let text_renderer =
            TextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        let mut buffer = Buffer::new(&mut font_system, Metrics::new(FONT_SIZE, LINE_HEIGHT));
        buffer.set_size(&mut font_system, None, None);

        Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            text_renderer,
            buffer,
            text: String::new(),
            scale_factor,
            color: Color::rgb(255, 255, 255),
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Reshapes the overlay for the camera position if the text changed.
    pub fn update(&mut self, camera: &CameraState) {
        let text = hud_lines(camera);
        if text == self.text {
            return;
        }

        let attrs = Attrs::new().family(Family::SansSerif);
        self.buffer
            .set_text(&mut self.font_system, &text, attrs, Shaping::Advanced);
        self.buffer.shape_until_scroll(&mut self.font_system, false);
        self.text = text;
    }

    /// Prepares glyphs for the current frame.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
    ) -> Result<(), glyphon::PrepareError> {
        self.viewport.update(queue, Resolution { width, height });

        let area = TextArea {
            buffer: &self.buffer,
            left: MARGIN * self.scale_factor,
            top: MARGIN * self.scale_factor,
            scale: self.scale_factor,
            bounds: TextBounds {
                left: 0,
                top: 0,
                right: width as i32,
                bottom: height as i32,
            },
            default_color: self.color,
            custom_glyphs: &[],
        };

        self.text_renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            [area],
            &mut self.swash_cache,
        )
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass) -> Result<(), glyphon::RenderError> {
        self.text_renderer.render(&self.atlas, &self.viewport, pass)
    }

    /// Frees atlas space held by glyphs no longer on screen.
    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraMove;

    /// Tests the overlay text at the starting position and after a move.
    #[test]
    fn test_hud_lines() {
        let mut camera = CameraState::default();
        assert_eq!(
            hud_lines(&camera),
            "Your eye is currently at\n\
             X (horizontal, pointing right) = 0.00\n\
             Y (vertical, pointing up) = 0.00\n\
             Z (depth, pointing towards you) = 1.00"
        );

        camera.nudge(CameraMove::Up);
        assert!(hud_lines(&camera).contains("Y (vertical, pointing up) = 0.01"));
    }
}
