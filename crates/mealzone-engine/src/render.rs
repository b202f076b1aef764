//! The timeline chart renderer.
//!
//! Rendering appends the axis, zone bands, interval markers, zone labels and
//! the hidden legend to a [`DrawingSurface`], and registers the pointer
//! subscriptions that drive the tooltip and the legend fade.

use crate::geometry::{LayoutOptions, ViewportGeometry};
use crate::scale::{hour_label, LinearScale};
use crate::scene::{Length, NodeId, Shape, Style, TextAnchor, TextContent, TextSpan};
use crate::surface::{DrawingSurface, EventTarget, PointerKind, Reaction, Subscription};
use crate::zone::Zone;

/// Class on the axis group; the axis restyle is scoped to it.
pub const AXIS_CLASS: &str = "x-axis";
pub const ZONE_CLASS: &str = "zone";
pub const INTERVAL_CLASS: &str = "interval-line";
pub const LABEL_CLASS: &str = "zone-label";
pub const LEGEND_CLASS: &str = "legend";
pub const TICK_CLASS: &str = "tick";

/// Meals counted per day over the tracked period. Shown as an average in
/// the legend; deliberately not derived from the zones.
pub const MEALS_PER_DAY: [u32; 8] = [4, 4, 1, 3, 3, 4, 3, 3];

/// Legend caption.
pub const LEGEND_CAPTION: &str = "Average meals per day =";

const AXIS_TICKS: usize = 24;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const AXIS_COLOR: &str = "#ffffff";
const INTERVAL_COLOR: &str = "lightblue";
const LABEL_COLOR: &str = "#000";
const LABEL_FONT_SIZE: f64 = 14.0;
const LEGEND_SIZE: (f64, f64) = (220.0, 60.0);
const LEGEND_RADIUS: f64 = 10.0;
const LEGEND_FONT_SIZE: f64 = 12.0;
const SECOND_LINE_DY: f64 = 1.2;

/// Average of [`MEALS_PER_DAY`].
pub fn average_meals_per_day() -> f64 {
    let total: u32 = MEALS_PER_DAY.iter().sum();
    f64::from(total) / MEALS_PER_DAY.len() as f64
}

/// Node ids and subscriptions produced by one render.
#[derive(Debug)]
pub struct RenderedChart {
    pub scale: LinearScale,
    pub geometry: ViewportGeometry,
    pub axis: NodeId,
    pub zone_rects: Vec<NodeId>,
    pub interval_lines: Vec<NodeId>,
    pub zone_labels: Vec<NodeId>,
    pub legend: NodeId,
    subscriptions: Vec<Subscription>,
}

impl RenderedChart {
    /// Number of subscriptions still owned by this chart.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Zone index for a zone rect node.
    pub fn zone_for_node(&self, node: NodeId) -> Option<usize> {
        self.zone_rects.iter().position(|id| *id == node)
    }

    /// Dispose every subscription this chart registered.
    pub fn teardown<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let disposed = self
            .subscriptions
            .drain(..)
            .map(|s| surface.unsubscribe(s))
            .filter(|removed| *removed)
            .count();
        tracing::debug!(disposed, "chart subscriptions disposed");
        disposed
    }
}

/// Draws the meal-timing timeline onto a drawing surface.
#[derive(Debug, Clone, Default)]
pub struct TimelineChartRenderer {
    layout: LayoutOptions,
}

impl TimelineChartRenderer {
    pub fn new(layout: LayoutOptions) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Render `zones` and `intervals` onto `surface`.
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        zones: &[Zone],
        intervals: &[f64],
        geometry: &ViewportGeometry,
        surface: &mut S,
    ) -> RenderedChart {
        if zones.is_empty() {
            tracing::warn!("rendering a timeline without zones");
        }

        let scale = LinearScale::hours(geometry.width);
        let mut subscriptions = Vec::new();

        let axis = self.draw_axis(&scale, geometry, surface);
        let zone_rects = self.draw_zones(zones, &scale, geometry, surface, &mut subscriptions);
        let interval_lines = Self::draw_intervals(intervals, &scale, geometry, surface);
        let zone_labels = self.draw_labels(zones, &scale, surface);
        let legend = self.draw_legend(surface);

        subscriptions.push(surface.subscribe(
            EventTarget::title(),
            PointerKind::Enter,
            Reaction::FadeLegend { to: 1.0 },
        ));
        subscriptions.push(surface.subscribe(
            EventTarget::title(),
            PointerKind::Leave,
            Reaction::FadeLegend { to: 0.0 },
        ));

        tracing::debug!(
            zones = zone_rects.len(),
            intervals = interval_lines.len(),
            subscriptions = subscriptions.len(),
            width = geometry.width,
            "timeline rendered"
        );

        RenderedChart {
            scale,
            geometry: *geometry,
            axis,
            zone_rects,
            interval_lines,
            zone_labels,
            legend,
            subscriptions,
        }
    }

    fn draw_axis<S: DrawingSurface + ?Sized>(
        &self,
        scale: &LinearScale,
        geometry: &ViewportGeometry,
        surface: &mut S,
    ) -> NodeId {
        let scene = surface.scene_mut();
        let root = scene.root();
        let axis = scene.append(root, Shape::Group, Style::default());
        scene.set_translate(axis, 0.0, geometry.axis_y());

        let (r0, r1) = scale.range();
        scene.append(axis, Shape::line(r0, 0.0, r1, 0.0), Style::default());

        for hour in scale.ticks(AXIS_TICKS) {
            let x = scale.map(hour);
            let tick = scene.append(axis, Shape::Group, Style::default());
            scene.set_translate(tick, x, 0.0);
            scene.add_class(tick, TICK_CLASS);
            scene.append(tick, Shape::line(0.0, 0.0, 0.0, TICK_SIZE), Style::default());
            scene.append(
                tick,
                Shape::Text {
                    x: 0.0,
                    y: TICK_SIZE + TICK_PADDING,
                    dy: Length::Em(0.71),
                    anchor: TextAnchor::Middle,
                    content: TextContent::Plain(hour_label(hour)),
                },
                Style::default(),
            );
        }
        scene.add_class(axis, AXIS_CLASS);

        // Restyle only what the axis generated.
        for line in scene.select_within(axis, "line") {
            if let Some(node) = scene.node_mut(line) {
                node.style = node.style.clone().stroke(AXIS_COLOR, 2.0);
            }
        }
        for text in scene.select_within(axis, "text") {
            if let Some(node) = scene.node_mut(text) {
                node.style = node.style.clone().fill(AXIS_COLOR).font(12.0, true);
            }
        }
        axis
    }

    fn draw_zones<S: DrawingSurface + ?Sized>(
        &self,
        zones: &[Zone],
        scale: &LinearScale,
        geometry: &ViewportGeometry,
        surface: &mut S,
        subscriptions: &mut Vec<Subscription>,
    ) -> Vec<NodeId> {
        let y = geometry.band_y(self.layout.band_fraction);
        let height = geometry.band_height(self.layout.band_fraction);

        let mut rects = Vec::with_capacity(zones.len());
        for (index, zone) in zones.iter().enumerate() {
            let x = scale.map(zone.start);
            let width = scale.map(zone.end) - x - self.layout.gutter;
            let scene = surface.scene_mut();
            let root = scene.root();
            let rect = scene.append(
                root,
                Shape::rect(x, y, width, height),
                Style::default().fill(zone.color.as_str()),
            );
            scene.add_class(rect, ZONE_CLASS);

            let target = EventTarget::Node(rect);
            subscriptions.push(surface.subscribe(
                target.clone(),
                PointerKind::Enter,
                Reaction::ShowTooltip { zone: index },
            ));
            subscriptions.push(surface.subscribe(
                target.clone(),
                PointerKind::Move,
                Reaction::TrackTooltip,
            ));
            subscriptions.push(surface.subscribe(target, PointerKind::Leave, Reaction::HideTooltip));
            rects.push(rect);
        }
        rects
    }

    fn draw_intervals<S: DrawingSurface + ?Sized>(
        intervals: &[f64],
        scale: &LinearScale,
        geometry: &ViewportGeometry,
        surface: &mut S,
    ) -> Vec<NodeId> {
        let scene = surface.scene_mut();
        let root = scene.root();
        intervals
            .iter()
            .map(|hour| {
                let x = scale.map(*hour);
                let line = scene.append(
                    root,
                    Shape::line(x, 0.0, x, geometry.height),
                    Style::default().stroke(INTERVAL_COLOR, 2.0).dash(&[4.0, 4.0]),
                );
                scene.add_class(line, INTERVAL_CLASS);
                line
            })
            .collect()
    }

    fn draw_labels<S: DrawingSurface + ?Sized>(
        &self,
        zones: &[Zone],
        scale: &LinearScale,
        surface: &mut S,
    ) -> Vec<NodeId> {
        let scene = surface.scene_mut();
        let root = scene.root();
        zones
            .iter()
            .map(|zone| {
                let x = (scale.map(zone.start) + scale.map(zone.end)) / 2.0;
                let lines = zone.label_lines();
                let content = if lines.len() == 1 {
                    TextContent::Plain(zone.label.clone())
                } else {
                    TextContent::Spans(
                        lines
                            .iter()
                            .enumerate()
                            .map(|(i, text)| TextSpan {
                                x,
                                dy: if i == 0 {
                                    Length::Px(0.0)
                                } else {
                                    Length::Em(SECOND_LINE_DY)
                                },
                                text: (*text).to_string(),
                            })
                            .collect(),
                    )
                };
                let label = scene.append(
                    root,
                    Shape::Text {
                        x,
                        y: self.layout.label_y,
                        dy: Length::Px(0.0),
                        anchor: TextAnchor::Middle,
                        content,
                    },
                    Style::default().fill(LABEL_COLOR).font(LABEL_FONT_SIZE, true),
                );
                scene.add_class(label, LABEL_CLASS);
                label
            })
            .collect()
    }

    fn draw_legend<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> NodeId {
        let scene = surface.scene_mut();
        let root = scene.root();
        let legend = scene.append(root, Shape::Group, Style::default().opacity(0.0));
        let (lx, ly) = self.layout.legend_origin;
        scene.set_translate(legend, lx, ly);
        scene.add_class(legend, LEGEND_CLASS);

        scene.append(
            legend,
            Shape::Rect {
                x: 0.0,
                y: 0.0,
                width: LEGEND_SIZE.0,
                height: LEGEND_SIZE.1,
                rx: LEGEND_RADIUS,
                ry: LEGEND_RADIUS,
            },
            Style::default().fill("#ffffff").stroke("#000", 1.0),
        );
        scene.append(
            legend,
            Shape::text(10.0, 20.0, TextAnchor::Start, LEGEND_CAPTION),
            Style::default().fill("#000").font(LEGEND_FONT_SIZE, false),
        );
        scene.append(
            legend,
            Shape::text(
                10.0,
                40.0,
                TextAnchor::Start,
                average_meals_per_day().to_string(),
            ),
            Style::default().fill("#000").font(LEGEND_FONT_SIZE, false),
        );
        legend
    }
}
