//! Application module.
//!
//! Wires the window, input and renderer together.
//!
//! # Module Structure
//!
//! - [`app_state`]: [`AppState`], the renderer and camera of an open window
//! - [`event_handler`]: [`App`] and its winit event handling
//! - [`update`]: the per-frame redraw
//!
//! # Event Flow
//!
//! 1. A key press is mapped to a [`CameraKey`](crate::keys::CameraKey) and
//!    applied to the camera
//! 2. A redraw is requested
//! 3. The redraw rebuilds every matrix from the camera and draws the grid
//!
//! Frames are only drawn on demand, so the event loop waits between events.

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
