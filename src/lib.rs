//! cubegrid - a small 3D viewer for a textured grid of cubes.
//!
//! A grid of unit cubes sits on the x/z plane around the origin. The eye
//! starts on +z looking at the origin and is moved with the keyboard; its
//! position is shown in the top-left corner.
//!
//! # Architecture
//! - `math/`: column-major vectors and matrices, transform builders
//! - [`camera`]: eye position state and view matrix
//! - [`scene`]: grid layout and the per-frame transform set
//! - [`config`]: viewer settings and environment overrides
//! - [`keys`]: keyboard mapping
//! - `renderer/`: WGPU pipelines, geometry and text overlay
//! - `app/`: window lifecycle and event handling

pub mod app;
pub mod camera;
pub mod config;
pub mod keys;
pub mod math;
pub mod renderer;
pub mod scene;
