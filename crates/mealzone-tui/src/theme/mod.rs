//! Theme components for the TUI.
//!
//! This module provides:
//! - [`Theme`] - Color palette (Catppuccin Mocha / High Contrast)
//! - CSS colour parsing and alpha blending for painting scene nodes

mod colors;

pub use colors::{blend, color_rgb, css_rgb, Theme};
