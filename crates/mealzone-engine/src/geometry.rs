//! Viewport geometry and the fixed layout constants of the chart.

use serde::{Deserialize, Serialize};

/// Pixel margins around the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 40.0,
            left: 50.0,
        }
    }
}

/// Size of the drawing surface, computed once from the host size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportGeometry {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl ViewportGeometry {
    /// Geometry with explicit width and height and default margins.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margins: Margins::default(),
        }
    }

    /// Geometry sized as a fraction of the host window width.
    pub fn from_host(host_width: f64, fraction: f64, height: f64, margins: Margins) -> Self {
        Self {
            width: host_width * fraction,
            height,
            margins,
        }
    }

    /// Y of the axis baseline.
    pub fn axis_y(&self) -> f64 {
        self.height - self.margins.bottom
    }

    /// Top of a vertically centred band covering `fraction` of the height.
    pub fn band_y(&self, fraction: f64) -> f64 {
        (self.height - self.band_height(fraction)) / 2.0
    }

    /// Height of a band covering `fraction` of the height.
    pub fn band_height(&self, fraction: f64) -> f64 {
        self.height * fraction
    }
}

/// Fixed placement and timing constants used by the renderer and the
/// interactive state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Share of the viewport height covered by zone bands.
    pub band_fraction: f64,
    /// Pixels trimmed from the right of each band.
    pub gutter: f64,
    /// Baseline of the zone labels.
    pub label_y: f64,
    /// Top-left corner of the legend box.
    pub legend_origin: (f64, f64),
    /// Legend fade duration in milliseconds.
    pub transition_ms: u64,
    /// Tooltip offset from the cursor, both axes.
    pub tooltip_offset: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            band_fraction: 0.7,
            gutter: 2.0,
            label_y: 100.0,
            legend_origin: (1000.0, 100.0),
            transition_ms: 200,
            tooltip_offset: 10.0,
        }
    }
}
