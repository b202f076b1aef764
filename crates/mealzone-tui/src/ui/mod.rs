//! UI module for the mealzone TUI.

pub mod layout;

pub use layout::*;
