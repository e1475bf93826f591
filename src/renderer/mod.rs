//! Main renderer module.
//!
//! Submodules cover pipeline and uniform plumbing, cube geometry, the checker
//! texture, the instanced grid renderer and the text overlay. [`WgpuRenderer`]
//! ties them to a window surface.

/// Instanced face and outline drawing for the cube grid.
pub mod grid_renderer;
/// Eye position text overlay.
pub mod hud;
/// Pipeline building utilities for WGPU.
pub mod pipeline_builder;
/// Procedural checkerboard texture.
pub mod texture;
/// Camera uniform block.
pub mod uniform;
/// Cube vertices, edges and instance layout.
pub mod vertex;
/// Surface, device and frame orchestration.
pub mod wgpu_lib;

pub use wgpu_lib::{RendererError, WgpuRenderer};
