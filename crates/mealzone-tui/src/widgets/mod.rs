//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`ChartWidget`] - Paints the chart scene into cells
//! - [`TooltipWidget`] - Popup describing the hovered zone
//! - [`FooterHints`] - Bottom keybinding hints

mod chart;
mod footer_hints;
mod tooltip;

pub use chart::{CellMapper, ChartWidget};
pub use footer_hints::{FooterHints, KeyHint};
pub use tooltip::{TooltipWidget, TOOLTIP_MAX_WIDTH};
