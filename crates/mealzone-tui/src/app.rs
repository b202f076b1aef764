//! Application state for the mealzone TUI.

use std::time::{Duration, Instant};

use mealzone_engine::{
    default_zones, hour_label, Chart, ChartConfig, DrawingSurface, EventTarget, PointerEvent, Shape,
    Zone, INTERVAL_HOURS,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::event::Action;
use crate::pointer::PointerTracker;
use crate::theme::Theme;
use crate::ui::{centered_fixed, main_layout};
use crate::widgets::CellMapper;

/// Chart title. Hovering it reveals the legend.
pub const TITLE: &str = "Meal Timing Zones";

/// Main application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// The rendered chart and its interactive state.
    pub chart: Chart,

    /// Colour palette.
    pub theme: Theme,

    /// Zone whose tooltip is showing, from the mouse or the arrow keys.
    pub selected_zone: Option<usize>,

    /// Terminal area from the most recent draw.
    pub area: Rect,

    zones: Vec<Zone>,
    pointer: PointerTracker,
    started: Instant,
}

impl App {
    /// Create the app with the built-in zones.
    pub fn new(config: &ChartConfig) -> Self {
        let zones = default_zones();
        let chart = Chart::build(&zones, &INTERVAL_HOURS, config);
        Self {
            should_quit: false,
            show_help: false,
            chart,
            theme: Theme::from_env(),
            selected_zone: None,
            area: Rect::default(),
            zones,
            pointer: PointerTracker::new(),
            started: Instant::now(),
        }
    }

    /// Time since the app started; the clock for chart transitions.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Label and hour span of the active zone.
    pub fn selected_zone_summary(&self) -> Option<(&str, String)> {
        let zone = self.zones.get(self.selected_zone?)?;
        Some((
            zone.label.as_str(),
            format!("{}-{}", hour_label(zone.start), hour_label(zone.end)),
        ))
    }

    /// Cells of the title row covered by the title text.
    pub fn title_area(&self) -> Rect {
        let (title_row, _, _) = main_layout(self.area);
        let width = u16::try_from(TITLE.width()).unwrap_or(u16::MAX);
        centered_fixed(width, 1, title_row)
    }

    /// Cell <-> pixel mapping for the chart area.
    pub fn mapper(&self) -> CellMapper {
        let (_, chart_area, _) = main_layout(self.area);
        CellMapper::new(chart_area, &self.chart.rendered.geometry)
    }

    /// Handle a key action.
    pub fn handle_action(&mut self, action: Action, now: Duration) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::Left => self.step_zone(-1, now),
            Action::Right => self.step_zone(1, now),
            Action::Back => {
                let mapper = self.mapper();
                let (x, y) = mapper.to_px(mapper.area.x, mapper.area.y);
                if let Some(event) = self.pointer.clear(x, y) {
                    self.deliver(vec![event], now);
                }
            }
            _ => {}
        }
    }

    /// Handle the mouse at a terminal cell.
    pub fn handle_mouse(&mut self, col: u16, row: u16, now: Duration) {
        let mapper = self.mapper();
        let (x, y) = mapper.to_px(col, row);

        let title = self.title_area();
        let on_title = col >= title.x
            && col < title.x + title.width
            && row >= title.y
            && row < title.y + title.height;

        let target = if on_title {
            Some(EventTarget::title())
        } else if mapper.contains(col, row) {
            self.chart.surface.hit_test((x, y)).map(EventTarget::Node)
        } else {
            None
        };

        let events = self.pointer.update(target, x, y);
        self.deliver(events, now);
    }

    /// Advance time-dependent state.
    pub fn tick(&mut self, now: Duration) {
        self.chart.sync(now);
    }

    /// Move the keyboard selection by `step` zones, wrapping around.
    ///
    /// The selection is delivered as a pointer over the centre of the band
    /// so it drives the same tooltip as the mouse.
    fn step_zone(&mut self, step: i64, now: Duration) {
        let rects = &self.chart.rendered.zone_rects;
        if rects.is_empty() {
            return;
        }
        let count = i64::try_from(rects.len()).unwrap_or(i64::MAX);
        let next = match self.selected_zone {
            None if step < 0 => count - 1,
            None => 0,
            Some(current) => (i64::try_from(current).unwrap_or(0) + step).rem_euclid(count),
        };
        let Some(&rect) = usize::try_from(next).ok().and_then(|i| rects.get(i)) else {
            return;
        };

        let centre = self
            .chart
            .surface
            .scene()
            .node(rect)
            .and_then(|node| match node.shape {
                Shape::Rect {
                    x, y, width, height, ..
                } => Some((x + width / 2.0, y + height / 2.0)),
                _ => None,
            });
        let Some((x, y)) = centre else {
            return;
        };

        tracing::debug!(zone = next, "keyboard zone selection");
        let events = self.pointer.update(Some(EventTarget::Node(rect)), x, y);
        self.deliver(events, now);
    }

    fn deliver(&mut self, events: Vec<(EventTarget, PointerEvent)>, now: Duration) {
        for (target, event) in events {
            self.chart.dispatch(&target, event, now);
        }
        self.selected_zone = self.chart.state.tooltip().zone;
    }
}
