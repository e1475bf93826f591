//! WGPU-based renderer for the cube grid viewer.
//!
//! [`WgpuRenderer`] owns the surface, device and queue, plus the
//! [`GridRenderer`] and the [`HudText`] overlay. Each frame is two passes:
//! the grid with depth testing over a cleared target, then the eye position
//! text on top.
//!
//! # Usage
//! Create a [`WgpuRenderer`] via [`WgpuRenderer::new`], then per frame call
//! [`WgpuRenderer::update`] with the frame's transforms and
//! [`WgpuRenderer::render`].

use crate::camera::CameraState;
use crate::config::ViewerConfig;
use crate::math::MathError;
use crate::renderer::grid_renderer::GridRenderer;
use crate::renderer::hud::HudText;
use crate::scene::FrameTransforms;
use thiserror::Error;
use wgpu::{SurfaceTexture, TextureView};

/// Failures while setting up or drawing with the GPU.
#[derive(Error, Debug)]
pub enum RendererError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no GPU adapter compatible with the window surface")]
    NoAdapter,

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("text preparation failed: {0}")]
    TextPrepare(#[from] glyphon::PrepareError),

    #[error("text rendering failed: {0}")]
    TextRender(#[from] glyphon::RenderError),
}

/// Main WGPU renderer.
pub struct WgpuRenderer {
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub grid_renderer: GridRenderer,
    pub hud: HudText,
    clear_color: wgpu::Color,
}

impl WgpuRenderer {
    /// Initializes the renderer and all GPU resources for the grid.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        scale_factor: f32,
        config: &ViewerConfig,
    ) -> Result<Self, RendererError> {
        let adapter = Self::create_adapter(instance, &surface).await?;
        let info = adapter.get_info();
        tracing::info!(name = %info.name, backend = ?info.backend, "selected GPU adapter");

        let (device, queue) = Self::create_device(&adapter).await?;
        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;
        surface.configure(&device, &surface_config);
        tracing::debug!(format = ?surface_config.format, width, height, "configured surface");

        let grid_renderer = GridRenderer::new(&device, &queue, &surface_config, config);
        let hud = HudText::new(&device, &queue, surface_config.format, scale_factor);

        let [r, g, b, a] = config.clear_color;
        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            grid_renderer,
            hud,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Reconfigures the surface. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Uploads the frame's matrices and the overlay text.
    pub fn update(&mut self, frame: &FrameTransforms, camera: &CameraState) -> Result<(), MathError> {
        self.grid_renderer.update(&self.device, &self.queue, frame)?;
        self.hud.update(camera);
        Ok(())
    }

    /// Draws the grid and overlay and presents the frame.
    pub fn render(&mut self) -> Result<(), RendererError> {
        let (surface_texture, surface_view) = self.get_surface_texture_and_view()?;
        let (width, height) = (self.surface_config.width, self.surface_config.height);
        let depth_view = self
            .grid_renderer
            .update_depth_texture(&self.device, width, height);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.render_grid(&mut encoder, &surface_view, &depth_view);
        self.render_hud(&mut encoder, &surface_view, width, height)?;

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        self.hud.trim();
        Ok(())
    }

    // Private helper methods

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> Result<wgpu::Adapter, RendererError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .ok_or(RendererError::NoAdapter)
    }

    async fn create_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), RendererError> {
        let device = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Cube Grid Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
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
    ) -> Result<wgpu::SurfaceConfiguration, RendererError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or(RendererError::NoSurfaceFormat)?;

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

    /// Acquires the next surface texture, reconfiguring once if the surface
    /// was lost or outdated.
    fn get_surface_texture_and_view(
        &mut self,
    ) -> Result<(SurfaceTexture, TextureView), RendererError> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e.into()),
        };

        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Ok((surface_texture, surface_view))
    }

    fn render_grid(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &TextureView,
        depth_view: &TextureView,
    ) {
        let mut grid_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Grid Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        self.grid_renderer.render(&mut grid_pass);
    }

    fn render_hud(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &TextureView,
        width: u32,
        height: u32,
    ) -> Result<(), RendererError> {
        self.hud.prepare(&self.device, &self.queue, width, height)?;

        let mut text_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("HUD Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.hud.render(&mut text_pass)?;
        Ok(())
    }
}
