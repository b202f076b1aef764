//! Interactive chart state: tooltip and legend.
//!
//! This is the only mutable state of a rendered chart. It is changed by
//! applying [`Reaction`]s produced by pointer subscriptions.

use std::time::Duration;

use crate::geometry::LayoutOptions;
use crate::scene::{NodeId, Scene};
use crate::surface::{PointerEvent, Reaction};
use crate::transition::Fader;
use crate::zone::{DescriptionLookup, Zone};

/// Text shown in the tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    /// Emphasised heading (the zone label).
    pub heading: String,
    /// Zone description, possibly empty.
    pub body: String,
}

/// Tooltip visibility and placement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    /// Top-left corner in page coordinates.
    pub position: (f64, f64),
    pub content: Option<TooltipContent>,
    /// Index of the zone the tooltip describes.
    pub zone: Option<usize>,
}

/// Owned interactive state of one chart.
#[derive(Debug, Clone)]
pub struct ChartState {
    tooltip: TooltipState,
    legend: Fader,
    tooltip_offset: f64,
    zones: Vec<Zone>,
    descriptions: DescriptionLookup,
}

impl ChartState {
    /// Fresh state: tooltip hidden, legend transparent.
    pub fn new(zones: &[Zone], layout: &LayoutOptions) -> Self {
        Self {
            tooltip: TooltipState::default(),
            legend: Fader::new(0.0, Duration::from_millis(layout.transition_ms)),
            tooltip_offset: layout.tooltip_offset,
            zones: zones.to_vec(),
            descriptions: DescriptionLookup::from_zones(zones),
        }
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Legend opacity at `now`.
    pub fn legend_opacity(&self, now: Duration) -> f64 {
        self.legend.value(now)
    }

    /// Whether the legend is mid-fade at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.legend.is_animating(now)
    }

    /// Apply a reaction triggered by `event` at time `now`.
    pub fn apply(&mut self, reaction: Reaction, event: &PointerEvent, now: Duration) {
        tracing::debug!(?reaction, ?event.kind, "applying reaction");
        match reaction {
            Reaction::ShowTooltip { zone } => {
                let Some(z) = self.zones.get(zone) else {
                    tracing::warn!(zone, "tooltip requested for unknown zone index");
                    return;
                };
                self.tooltip.content = Some(TooltipContent {
                    heading: z.label.clone(),
                    body: self.descriptions.get(&z.label).to_string(),
                });
                self.tooltip.zone = Some(zone);
                self.tooltip.visible = true;
                self.tooltip.position = self.offset(event);
            }
            Reaction::TrackTooltip => {
                self.tooltip.position = self.offset(event);
            }
            Reaction::HideTooltip => {
                self.tooltip.visible = false;
                self.tooltip.content = None;
                self.tooltip.zone = None;
            }
            Reaction::FadeLegend { to } => {
                self.legend.fade_to(to, now);
            }
        }
    }

    /// Write the live legend opacity into the scene.
    pub fn sync(&self, scene: &mut Scene, legend: NodeId, now: Duration) {
        scene.set_opacity(legend, self.legend_opacity(now));
    }

    fn offset(&self, event: &PointerEvent) -> (f64, f64) {
        (event.x + self.tooltip_offset, event.y + self.tooltip_offset)
    }
}
