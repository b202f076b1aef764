//! mealzone-engine: Headless engine for the meal-timing timeline chart
//!
//! This crate provides the chart core, independent of any display:
//! - Zone data and description lookup
//! - Linear hour -> pixel scale and viewport geometry
//! - Scene graph, drawing-surface trait and pointer subscriptions
//! - The timeline renderer and its interactive state
//! - SVG export and presentation configuration

pub mod config;
pub mod geometry;
pub mod render;
pub mod scale;
pub mod scene;
pub mod state;
pub mod surface;
pub mod svg;
pub mod transition;
pub mod zone;

// Re-export commonly used types
pub use config::{ChartConfig, ConfigError, CONFIG_FILE};
pub use geometry::{LayoutOptions, Margins, ViewportGeometry};
pub use render::{average_meals_per_day, RenderedChart, TimelineChartRenderer};
pub use scale::{hour_label, LinearScale};
pub use scene::{Length, Node, NodeId, Scene, Shape, Style, TextAnchor, TextContent, TextSpan};
pub use state::{ChartState, TooltipContent, TooltipState};
pub use surface::{
    DrawingSurface, EventTarget, PointerEvent, PointerKind, Reaction, SceneSurface, Subscription,
};
pub use svg::{to_svg, write_svg, ExportError};
pub use transition::{Easing, Fader, OpacityTransition};
pub use zone::{
    default_zones, zone_description, DescriptionLookup, Zone, ZoneError, ZoneSet, INTERVAL_HOURS,
};

/// A rendered chart together with its surface and interactive state.
///
/// This bundles what a host needs to display the chart and feed it
/// pointer events.
#[derive(Debug)]
pub struct Chart {
    pub surface: SceneSurface,
    pub rendered: RenderedChart,
    pub state: ChartState,
}

impl Chart {
    /// Render the built-in zones and intervals with `config`.
    pub fn from_config(config: &ChartConfig) -> Self {
        Self::build(&default_zones(), &INTERVAL_HOURS, config)
    }

    /// Render arbitrary zones and intervals with `config`.
    pub fn build(zones: &[Zone], intervals: &[f64], config: &ChartConfig) -> Self {
        let layout = config.layout();
        let geometry = config.geometry();
        let mut surface = SceneSurface::new();
        let rendered =
            TimelineChartRenderer::new(layout).render(zones, intervals, &geometry, &mut surface);
        let state = ChartState::new(zones, &layout);
        Self {
            surface,
            rendered,
            state,
        }
    }

    /// Deliver a pointer event on `target`, applying every subscribed
    /// reaction. Returns the number of reactions applied.
    pub fn dispatch(
        &mut self,
        target: &EventTarget,
        event: PointerEvent,
        now: std::time::Duration,
    ) -> usize {
        let reactions = self.surface.reactions(target, event.kind);
        for reaction in &reactions {
            self.state.apply(*reaction, &event, now);
        }
        self.state
            .sync(self.surface.scene_mut(), self.rendered.legend, now);
        reactions.len()
    }

    /// Refresh time-dependent scene attributes for `now`.
    pub fn sync(&mut self, now: std::time::Duration) {
        self.state
            .sync(self.surface.scene_mut(), self.rendered.legend, now);
    }

    /// Current SVG rendering of the scene.
    pub fn svg(&self) -> String {
        to_svg(self.surface.scene(), &self.rendered.geometry)
    }
}

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
