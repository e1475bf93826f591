//! Event handler module.
//!
//! Contains the [`App`] struct and its winit event handling.

use crate::app::app_state::AppState;
use crate::config::ViewerConfig;
use crate::keys::{CameraKey, winit_key_to_camera_key};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

/// Viewer application driven by the winit event loop.
///
/// # Lifecycle
/// 1. Created with [`App::new`] holding the settings and a WGPU instance
/// 2. On `resumed` the window, surface and [`AppState`] are created
/// 3. Key presses move the camera and request a redraw
/// 4. Runs until the window is closed or a quit key is pressed
pub struct App {
    pub instance: wgpu::Instance,
    pub config: ViewerConfig,
    /// None until the window is created.
    pub state: Option<AppState>,
    pub window: Option<Arc<Window>>,
    /// Set when a fatal error occurred; the loop exits on the next event.
    pub exit_requested: bool,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            config,
            state: None,
            window: None,
            exit_requested: false,
        }
    }

    /// Creates the surface and renderer for `window`.
    ///
    /// Failures are logged and leave the app without state; the caller exits.
    pub async fn set_window(&mut self, window: Window) {
        let window = Arc::new(window);

        let surface = match self.instance.create_surface(window.clone()) {
            Ok(surface) => surface,
            Err(err) => {
                tracing::error!(error = %err, "failed to create surface");
                return;
            }
        };

        match AppState::new(&self.instance, surface, &window, self.config.clone()).await {
            Ok(state) => {
                self.state = Some(state);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(err) => tracing::error!(error = %err, "failed to initialize renderer"),
        }
    }

    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        match self.state.as_mut() {
            Some(state) => state.resize_surface(width, height),
            None => tracing::warn!("cannot resize surface without state initialized"),
        }
    }

    /// Applies a pressed key. Repeats count as presses.
    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        let Some(key) = winit_key_to_camera_key(&event.logical_key) else {
            return;
        };
        let Some(state) = self.state.as_mut() else {
            return;
        };

        if key == CameraKey::Quit {
            tracing::info!("quit requested");
            event_loop.exit();
            return;
        }

        key.apply(&mut state.camera);
        tracing::debug!(?key, camera = ?state.camera, "camera moved");
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                tracing::error!(error = %err, "failed to create window");
                event_loop.exit();
                return;
            }
        };

        pollster::block_on(self.set_window(window));
        if self.state.is_none() {
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.handle_resized(size.width, size.height);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(state) = self.state.as_mut() {
                    state.wgpu_renderer.hud.set_scale_factor(scale_factor as f32);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::RedrawRequested => self.handle_redraw(),
            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
