//! Viewer settings.
//!
//! [`ViewerConfig::default`] reproduces the classic look: an 800x800 window,
//! a 3x3 grid of 0.125-unit cubes, mustard faces with violet outlines on black.
//! A couple of values can be overridden from the environment at startup.

use crate::camera::DEFAULT_STEP;
use crate::scene::{GridLayout, OrthoVolume};
use thiserror::Error;

/// Environment variable holding a `WIDTHxLENGTH` grid size, e.g. `5x4`.
pub const GRID_ENV: &str = "CUBEGRID_GRID";
/// Environment variable holding the camera step per key press.
pub const STEP_ENV: &str = "CUBEGRID_STEP";

/// Invalid viewer settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("window size must be non-zero, got {width}x{height}")]
    EmptyWindow { width: u32, height: u32 },

    #[error("grid must contain at least one cube, got {width}x{length}")]
    EmptyGrid { width: u32, length: u32 },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("projection volume is empty: {0:?}")]
    EmptyVolume(OrthoVolume),

    #[error("near plane {near} must be in front of far plane {far}")]
    InvertedDepth { near: f32, far: f32 },

    #[error("texture size {size} is not a positive multiple of {checks} checks")]
    BadTexture { size: u32, checks: u32 },

    #[error("cannot parse {var}={value:?}: expected {expected}")]
    BadEnv {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Everything the app needs to open a window and draw the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    pub grid: GridLayout,
    pub volume: OrthoVolume,
    pub camera_step: f32,
    pub clear_color: [f64; 4],
    /// Tint multiplied into the face texture.
    pub face_color: [f32; 4],
    pub line_color: [f32; 4],
    /// Side of the square checker texture in pixels.
    pub texture_size: u32,
    /// Checks per texture side.
    pub texture_checks: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 800,
            title: "cubegrid".to_string(),
            grid: GridLayout::default(),
            volume: OrthoVolume::default(),
            camera_step: DEFAULT_STEP,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            face_color: [0.627_451, 0.556_862_7, 0.094_117_65, 1.0],
            line_color: [0.372_549, 0.0, 0.905_882_4, 1.0],
            texture_size: 64,
            texture_checks: 4,
        }
    }
}

impl ViewerConfig {
    /// Default settings with environment overrides applied, then validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(
            std::env::var(GRID_ENV).ok().as_deref(),
            std::env::var(STEP_ENV).ok().as_deref(),
        )?;
        config.validate()?;
        Ok(config)
    }

    /// Applies raw override strings, as read from [`GRID_ENV`] and [`STEP_ENV`].
    pub fn apply_overrides(
        &mut self,
        grid: Option<&str>,
        step: Option<&str>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = grid {
            let (width, length) = parse_grid(value).ok_or_else(|| ConfigError::BadEnv {
                var: GRID_ENV,
                value: value.to_string(),
                expected: "WIDTHxLENGTH, e.g. 3x3",
            })?;
            self.grid.width = width;
            self.grid.length = length;
        }

        if let Some(value) = step {
            self.camera_step = value.trim().parse().map_err(|_| ConfigError::BadEnv {
                var: STEP_ENV,
                value: value.to_string(),
                expected: "a decimal number",
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::EmptyWindow {
                width: self.window_width,
                height: self.window_height,
            });
        }
        if self.grid.width == 0 || self.grid.length == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid.width,
                length: self.grid.length,
            });
        }
        for (name, value) in [
            ("unit length", self.grid.unit_length),
            ("outline scale", self.grid.outline_scale),
            ("camera step", self.camera_step),
        ] {
            // Written so NaN is rejected too.
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if self.volume.projection().is_err() {
            return Err(ConfigError::EmptyVolume(self.volume));
        }
        if self.volume.near >= self.volume.far {
            return Err(ConfigError::InvertedDepth {
                near: self.volume.near,
                far: self.volume.far,
            });
        }
        if self.texture_checks == 0
            || self.texture_size == 0
            || self.texture_size % self.texture_checks != 0
        {
            return Err(ConfigError::BadTexture {
                size: self.texture_size,
                checks: self.texture_checks,
            });
        }
        Ok(())
    }
}

fn parse_grid(value: &str) -> Option<(u32, u32)> {
    let (width, length) = value.trim().split_once(['x', 'X'])?;
    Some((width.trim().parse().ok()?, length.trim().parse().ok()?))
}
