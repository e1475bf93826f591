//! Per-frame update and draw for the viewer.

use crate::renderer::wgpu_lib::RendererError;
use crate::scene::FrameTransforms;

use super::event_handler::App;

impl App {
    /// Rebuilds the frame's matrices from the camera and draws them.
    ///
    /// A frame whose matrices can't be built is skipped with a warning; the
    /// previous image stays on screen and the next key press or redraw tries
    /// again.
    pub fn handle_redraw(&mut self) {
        let (Some(window), Some(state)) = (self.window.as_ref(), self.state.as_mut()) else {
            tracing::warn!("redraw requested before the window was ready");
            return;
        };
        if window.is_minimized().unwrap_or(false) {
            return;
        }

        let frame = match FrameTransforms::build(
            &state.camera,
            &state.config.grid,
            &state.config.volume,
        ) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::warn!(error = %err, camera = ?state.camera, "skipping frame");
                return;
            }
        };

        if let Err(err) = state.wgpu_renderer.update(&frame, &state.camera) {
            tracing::warn!(error = %err, "skipping frame");
            return;
        }

        match state.wgpu_renderer.render() {
            Ok(()) => {}
            Err(RendererError::Surface(wgpu::SurfaceError::Timeout)) => {
                tracing::debug!("surface timed out, dropping frame");
            }
            Err(RendererError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                tracing::error!("GPU out of memory");
                self.exit_requested = true;
            }
            Err(err) => tracing::warn!(error = %err, "frame failed"),
        }
    }
}
