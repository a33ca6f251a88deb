//! Read-only viewer configuration.
//!
//! Looked up at `<config_dir>/pdf-viewer/config.json`. Every field has a
//! default, so a partial file only overrides what it names. The viewer never
//! writes this file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::zoom::ZoomLimits;

const CONFIG_DIR_NAME: &str = "pdf-viewer";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_VIEWPORT_ORIGIN: Point = Point::new(50.0, 50.0);
pub const DEFAULT_OVERLAY_FONT_SIZE: f32 = 12.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: "PDF Viewer".to_owned(), width: 1000.0, height: 800.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Where the top-left corner of each page is drawn on the canvas.
    pub viewport_origin: Point,
    pub zoom: ZoomLimits,
    pub window: WindowConfig,
    pub overlay_font_size: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewport_origin: DEFAULT_VIEWPORT_ORIGIN,
            zoom: ZoomLimits::default(),
            window: WindowConfig::default(),
            overlay_font_size: DEFAULT_OVERLAY_FONT_SIZE,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl ViewerConfig {
    /// Load from the user config directory, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            log::debug!("no config directory; using default viewer config");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// A missing file is not an error; it yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        log::info!("loaded viewer config from {}", path.display());

        Ok(config.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        if !self.viewport_origin.is_finite() {
            self.viewport_origin = DEFAULT_VIEWPORT_ORIGIN;
        }

        self.zoom = self.zoom.sanitized();

        let window = WindowConfig::default();
        if !(self.window.width.is_finite() && self.window.width > 0.0) {
            self.window.width = window.width;
        }
        if !(self.window.height.is_finite() && self.window.height > 0.0) {
            self.window.height = window.height;
        }

        if !(self.overlay_font_size.is_finite() && self.overlay_font_size > 0.0) {
            self.overlay_font_size = DEFAULT_OVERLAY_FONT_SIZE;
        }

        self
    }
}
