//! Configuration types for the mealzone chart.
//!
//! Only presentation settings are configurable. The zones and interval
//! markers are fixed data and never read from a file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geometry::{LayoutOptions, Margins, ViewportGeometry};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "mealzone.json";

/// Presentation configuration for the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Width of the host window in pixels.
    #[serde(default = "default_host_width")]
    pub host_width: f64,

    /// Share of the host width used by the chart.
    #[serde(default = "default_viewport_fraction")]
    pub viewport_fraction: f64,

    /// Chart height in pixels.
    #[serde(default = "default_height")]
    pub height: f64,

    /// Margins around the plot.
    #[serde(default)]
    pub margins: Margins,

    /// Share of the height covered by zone bands.
    #[serde(default = "default_band_fraction")]
    pub band_fraction: f64,

    /// Pixels trimmed from the right edge of each band.
    #[serde(default = "default_gutter")]
    pub gutter: f64,

    /// Baseline of the zone labels.
    #[serde(default = "default_label_y")]
    pub label_y: f64,

    /// Top-left corner of the legend box.
    #[serde(default = "default_legend_origin")]
    pub legend_origin: (f64, f64),

    /// Legend fade duration in milliseconds.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    /// Tooltip offset from the cursor in pixels.
    #[serde(default = "default_tooltip_offset")]
    pub tooltip_offset: f64,
}

fn default_host_width() -> f64 {
    1920.0
}

fn default_viewport_fraction() -> f64 {
    0.7
}

fn default_height() -> f64 {
    400.0
}

fn default_band_fraction() -> f64 {
    LayoutOptions::default().band_fraction
}

fn default_gutter() -> f64 {
    LayoutOptions::default().gutter
}

fn default_label_y() -> f64 {
    LayoutOptions::default().label_y
}

fn default_legend_origin() -> (f64, f64) {
    LayoutOptions::default().legend_origin
}

fn default_transition_ms() -> u64 {
    LayoutOptions::default().transition_ms
}

fn default_tooltip_offset() -> f64 {
    LayoutOptions::default().tooltip_offset
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            host_width: default_host_width(),
            viewport_fraction: default_viewport_fraction(),
            height: default_height(),
            margins: Margins::default(),
            band_fraction: default_band_fraction(),
            gutter: default_gutter(),
            label_y: default_label_y(),
            legend_origin: default_legend_origin(),
            transition_ms: default_transition_ms(),
            tooltip_offset: default_tooltip_offset(),
        }
    }
}

impl ChartConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
            }
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Return a copy with a different host width.
    #[must_use]
    pub fn with_host_width(mut self, host_width: f64) -> Self {
        self.host_width = host_width;
        self
    }

    /// Viewport geometry derived from the host width.
    pub fn geometry(&self) -> ViewportGeometry {
        ViewportGeometry::from_host(
            self.host_width,
            self.viewport_fraction,
            self.height,
            self.margins,
        )
    }

    /// Layout constants for the renderer and interactive state.
    pub fn layout(&self) -> LayoutOptions {
        LayoutOptions {
            band_fraction: self.band_fraction,
            gutter: self.gutter,
            label_y: self.label_y,
            legend_origin: self.legend_origin,
            transition_ms: self.transition_ms,
            tooltip_offset: self.tooltip_offset,
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
