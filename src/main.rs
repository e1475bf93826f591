//! cubegrid viewer entry point.
//!
//! # Controls
//! - Arrow keys: move the eye left, right, up and down
//! - Page Up / Page Down: move the eye closer to or farther from the grid
//! - Home or `R`: reset the eye position
//! - Escape or `Q`: quit
//!
//! # Environment
//! - `CUBEGRID_GRID=WxL`: grid size, e.g. `5x4`
//! - `CUBEGRID_STEP`: distance moved per key press
//! - `RUST_LOG`: log filter, defaults to `info`

use cubegrid::app::App;
use cubegrid::config::ViewerConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let config = match ViewerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            std::process::exit(2);
        }
    };
    tracing::info!(
        grid = %format_args!("{}x{}", config.grid.width, config.grid.length),
        step = config.camera_step,
        "starting viewer"
    );

    run(config);
}

/// Runs the event loop until the window closes.
fn run(config: ViewerConfig) {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            tracing::error!(error = %err, "error creating event loop");
            return;
        }
    };

    // Frames are drawn on demand after input.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    if let Err(err) = event_loop.run_app(&mut app) {
        tracing::error!(error = %err, "event loop failed");
    }
}
