//! AppState module.
//!
//! Holds everything that exists only while a window is open: the renderer
//! and the camera it draws from.

use crate::camera::CameraState;
use crate::config::ViewerConfig;
use crate::renderer::wgpu_lib::{RendererError, WgpuRenderer};
use winit::window::Window;

/// State for a running viewer window.
pub struct AppState {
    pub wgpu_renderer: WgpuRenderer,
    pub camera: CameraState,
    pub config: ViewerConfig,
}

impl AppState {
    /// Creates the renderer for `surface` and a camera at its starting position.
    ///
    /// # Arguments
    /// - `instance`: The WGPU instance.
    /// - `surface`: The WGPU surface for rendering.
    /// - `window`: The window the surface belongs to.
    /// - `config`: Validated viewer settings.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        window: &Window,
        config: ViewerConfig,
    ) -> Result<Self, RendererError> {
        let size = window.inner_size();
        let wgpu_renderer = WgpuRenderer::new(
            instance,
            surface,
            size.width,
            size.height,
            window.scale_factor() as f32,
            &config,
        )
        .await?;

        Ok(Self {
            wgpu_renderer,
            camera: CameraState::new(config.camera_step),
            config,
        })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
    }
}
