//! Chart widget: paints a scene graph into a terminal buffer.
//!
//! Pixel coordinates are sampled at cell centres. Nodes are painted in
//! document order: rects fill cell backgrounds, lines draw box glyphs on
//! blank cells only, texts always overwrite glyphs but keep the background.
//! Tick labels that would touch an earlier tick label are dropped; other
//! labels slide right past the text they would cover.

use mealzone_engine::render::TICK_CLASS;
use mealzone_engine::{NodeId, Scene, Shape, TextAnchor, TextContent, ViewportGeometry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{blend, css_rgb, Theme};

/// Groups below this opacity are not painted at all.
const MIN_VISIBLE_OPACITY: f64 = 0.05;

/// Share of the font size between the baseline and the visual centre of a
/// line of text.
const BASELINE_TO_CENTER: f64 = 0.35;

const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Maps chart pixels to terminal cells and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMapper {
    pub area: Rect,
    px_per_col: f64,
    px_per_row: f64,
}

impl CellMapper {
    pub fn new(area: Rect, geometry: &ViewportGeometry) -> Self {
        let cols = f64::from(area.width.max(1));
        let rows = f64::from(area.height.max(1));
        Self {
            area,
            px_per_col: geometry.width / cols,
            px_per_row: geometry.height / rows,
        }
    }

    pub fn px_per_col(&self) -> f64 {
        self.px_per_col
    }

    pub fn px_per_row(&self) -> f64 {
        self.px_per_row
    }

    /// Whether the cell lies inside the mapped area.
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.area.x
            && col < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// Pixel at the centre of a cell.
    pub fn to_px(&self, col: u16, row: u16) -> (f64, f64) {
        let x = (f64::from(col.saturating_sub(self.area.x)) + 0.5) * self.px_per_col;
        let y = (f64::from(row.saturating_sub(self.area.y)) + 0.5) * self.px_per_row;
        (x, y)
    }

    /// Column offset (relative to the area) containing pixel `x`.
    fn col_offset(&self, x: f64) -> i64 {
        (x / self.px_per_col).floor() as i64
    }

    /// Row offset (relative to the area) containing pixel `y`.
    fn row_offset(&self, y: f64) -> i64 {
        (y / self.px_per_row).floor() as i64
    }

    /// Cell containing a pixel, if inside the area.
    pub fn to_cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        self.absolute(self.col_offset(x), self.row_offset(y))
    }

    /// First cell at or after a pixel, clamped into the area.
    pub fn to_cell_after(&self, x: f64, y: f64) -> (u16, u16) {
        let col = (x / self.px_per_col).ceil() as i64;
        let row = (y / self.px_per_row).ceil() as i64;
        let col = col.clamp(0, i64::from(self.area.width.saturating_sub(1)));
        let row = row.clamp(0, i64::from(self.area.height.saturating_sub(1)));
        (
            self.area.x + u16::try_from(col).unwrap_or(0),
            self.area.y + u16::try_from(row).unwrap_or(0),
        )
    }

    fn absolute(&self, col: i64, row: i64) -> Option<(u16, u16)> {
        if col < 0 || row < 0 {
            return None;
        }
        let col = u16::try_from(col).ok()?;
        let row = u16::try_from(row).ok()?;
        if col >= self.area.width || row >= self.area.height {
            return None;
        }
        Some((self.area.x + col, self.area.y + row))
    }
}

/// Widget that paints a chart scene.
pub struct ChartWidget<'a> {
    scene: &'a Scene,
    geometry: &'a ViewportGeometry,
    theme: &'a Theme,
}

impl<'a> ChartWidget<'a> {
    pub fn new(scene: &'a Scene, geometry: &'a ViewportGeometry, theme: &'a Theme) -> Self {
        Self {
            scene,
            geometry,
            theme,
        }
    }
}

struct Painter<'a> {
    scene: &'a Scene,
    mapper: CellMapper,
    theme: &'a Theme,
    /// Text already placed: (row, first col, last col).
    placed: Vec<(u16, u16, u16)>,
}

impl Widget for ChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(self.theme.base));

        let mut painter = Painter {
            scene: self.scene,
            mapper: CellMapper::new(area, self.geometry),
            theme: self.theme,
            placed: Vec::new(),
        };
        for id in self.scene.descendants(self.scene.root()) {
            painter.paint(id, buf);
        }
    }
}

impl Painter<'_> {
    fn paint(&mut self, id: NodeId, buf: &mut Buffer) {
        let scene = self.scene;
        let Some(node) = scene.node(id) else {
            return;
        };
        let opacity = scene.effective_opacity(id);
        if opacity < MIN_VISIBLE_OPACITY {
            return;
        }
        let (ox, oy) = scene.absolute_offset(id);

        match &node.shape {
            Shape::Group => {}
            Shape::Rect {
                x, y, width, height, ..
            } => {
                let Some(fill) = node.style.fill.as_deref().and_then(css_rgb) else {
                    return;
                };
                self.fill_rect(x + ox, y + oy, *width, *height, fill, opacity, buf);
            }
            Shape::Line { x1, y1, x2, y2 } => {
                let color = node
                    .style
                    .stroke
                    .as_deref()
                    .and_then(css_rgb)
                    .unwrap_or((255, 255, 255));
                let dashed = node.style.dash.is_some();
                self.draw_line((x1 + ox, y1 + oy), (x2 + ox, y2 + oy), color, dashed, opacity, buf);
            }
            Shape::Text {
                x,
                y,
                dy,
                anchor,
                content,
            } => {
                let font_size = node.style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
                let color = node.style.fill.as_deref().and_then(css_rgb);
                let is_tick = node
                    .parent
                    .and_then(|p| scene.node(p))
                    .is_some_and(|p| p.has_class(TICK_CLASS));
                let mut style = Style::default();
                if node.style.bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                let origin = (x + ox, y + oy + dy.to_px(font_size));

                match content {
                    TextContent::Plain(text) => {
                        self.draw_text(origin, *anchor, text, font_size, color, opacity, style, is_tick, buf);
                    }
                    TextContent::Spans(spans) => {
                        let mut baseline = origin.1;
                        let mut last_row: Option<i64> = None;
                        for span in spans {
                            let shift = span.dy.to_px(font_size);
                            baseline += shift;
                            let mut row = self.text_row(baseline, font_size);
                            if let Some(prev) = last_row {
                                if shift > 0.0 && row <= prev {
                                    row = prev + 1;
                                }
                            }
                            last_row = Some(row);
                            self.place_text(
                                self.mapper.col_offset(span.x + ox),
                                row,
                                *anchor,
                                &span.text,
                                color,
                                opacity,
                                style,
                                false,
                                buf,
                            );
                        }
                    }
                }
            }
        }
    }

    fn cell_bg(&self, buf: &Buffer, col: u16, row: u16) -> Color {
        buf.cell((col, row)).map_or(self.theme.base, |c| c.bg)
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_rect(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: (u8, u8, u8),
        opacity: f64,
        buf: &mut Buffer,
    ) {
        let area = self.mapper.area;
        for row in area.y..area.y + area.height {
            for col in area.x..area.x + area.width {
                let (cx, cy) = self.mapper.to_px(col, row);
                if cx < x || cx >= x + width || cy < y || cy >= y + height {
                    continue;
                }
                let bg = blend(fill, self.cell_bg(buf, col, row), opacity);
                if let Some(cell) = buf.cell_mut((col, row)) {
                    cell.set_symbol(" ");
                    cell.set_bg(bg);
                }
            }
        }
    }

    fn draw_line(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        color: (u8, u8, u8),
        dashed: bool,
        opacity: f64,
        buf: &mut Buffer,
    ) {
        let vertical = (from.0 - to.0).abs() <= (from.1 - to.1).abs();
        let glyph = match (vertical, dashed) {
            (true, true) => "┊",
            (true, false) => "│",
            (false, true) => "┄",
            (false, false) => "─",
        };

        let cells: Vec<(i64, i64)> = if vertical {
            let col = self.mapper.col_offset(from.0);
            let (lo, hi) = (from.1.min(to.1), from.1.max(to.1));
            let first = self.mapper.row_offset(lo);
            let last = self.mapper.row_offset(hi - f64::EPSILON * hi.abs().max(1.0)).max(first);
            (first..=last).map(|row| (col, row)).collect()
        } else {
            let row = self.mapper.row_offset(from.1);
            let (lo, hi) = (from.0.min(to.0), from.0.max(to.0));
            let first = self.mapper.col_offset(lo);
            let last = self.mapper.col_offset(hi - f64::EPSILON * hi.abs().max(1.0)).max(first);
            (first..=last).map(|col| (col, row)).collect()
        };

        for (col, row) in cells {
            let Some((col, row)) = self.mapper.absolute(col, row) else {
                continue;
            };
            let bg = self.cell_bg(buf, col, row);
            let fg = blend(color, bg, opacity);
            if let Some(cell) = buf.cell_mut((col, row)) {
                if cell.symbol() != " " {
                    continue;
                }
                cell.set_symbol(glyph);
                cell.set_fg(fg);
            }
        }
    }

    fn text_row(&self, baseline: f64, font_size: f64) -> i64 {
        self.mapper.row_offset(baseline - font_size * BASELINE_TO_CENTER)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        origin: (f64, f64),
        anchor: TextAnchor,
        text: &str,
        font_size: f64,
        color: Option<(u8, u8, u8)>,
        opacity: f64,
        style: Style,
        is_tick: bool,
        buf: &mut Buffer,
    ) {
        let row = self.text_row(origin.1, font_size);
        let col = self.mapper.col_offset(origin.0);
        self.place_text(col, row, anchor, text, color, opacity, style, is_tick, buf);
    }

    #[allow(clippy::too_many_arguments)]
    fn place_text(
        &mut self,
        anchor_col: i64,
        row: i64,
        anchor: TextAnchor,
        text: &str,
        color: Option<(u8, u8, u8)>,
        opacity: f64,
        style: Style,
        is_tick: bool,
        buf: &mut Buffer,
    ) {
        let area = self.mapper.area;
        let width = i64::try_from(text.width()).unwrap_or(i64::MAX);
        let start = match anchor {
            TextAnchor::Start => anchor_col,
            TextAnchor::Middle => anchor_col - width / 2,
            TextAnchor::End => anchor_col - width,
        };
        // Keep the whole label on screen where it fits.
        let max_start = i64::from(area.width) - width;
        let start = start.min(max_start).max(0);

        let Some((mut col, row)) = self.mapper.absolute(start, row) else {
            return;
        };
        let span = u16::try_from(width).unwrap_or(u16::MAX).max(1);
        let right = area.x + area.width;

        let overlapping = |placed: &[(u16, u16, u16)], col: u16| {
            let end = col.saturating_add(span - 1);
            placed
                .iter()
                .find(|(r, a, b)| *r == row && col <= b.saturating_add(1) && end.saturating_add(1) >= *a)
                .copied()
        };
        if is_tick {
            if overlapping(&self.placed, col).is_some() {
                return;
            }
        } else {
            while let Some((_, _, b)) = overlapping(&self.placed, col) {
                let shifted = b.saturating_add(2);
                if shifted.saturating_add(span) > right {
                    break;
                }
                col = shifted;
            }
        }
        self.placed.push((row, col, col.saturating_add(span - 1)));

        let room = usize::from(area.x + area.width - col);
        let mut x = col;
        for grapheme in text.chars() {
            let mut tmp = [0u8; 4];
            let symbol: &str = grapheme.encode_utf8(&mut tmp);
            let symbol_width = u16::try_from(symbol.width()).unwrap_or(1);
            if usize::from(x - col) + usize::from(symbol_width) > room {
                break;
            }
            let bg = self.cell_bg(buf, x, row);
            let fg = color.map_or(self.theme.text, |c| blend(c, bg, opacity));
            if let Some(cell) = buf.cell_mut((x, row)) {
                cell.set_symbol(symbol);
                cell.set_style(style.fg(fg));
            }
            x += symbol_width.max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use mealzone_engine::{Chart, ChartConfig, DrawingSurface, Length, Style as NodeStyle};

    fn mapper() -> CellMapper {
        CellMapper::new(Rect::new(0, 1, 80, 20), &ViewportGeometry::new(800.0, 400.0))
    }

    #[test]
    fn test_mapper_round_trip() {
        let mapper = mapper();
        assert!((mapper.px_per_col() - 10.0).abs() < 1e-9);
        assert!((mapper.px_per_row() - 20.0).abs() < 1e-9);
        assert_eq!(mapper.to_px(0, 1), (5.0, 10.0));
        assert_eq!(mapper.to_cell(5.0, 10.0), Some((0, 1)));
        assert_eq!(mapper.to_cell(799.0, 399.0), Some((79, 20)));
        assert_eq!(mapper.to_cell(800.0, 10.0), None);
        assert_eq!(mapper.to_cell(-1.0, 10.0), None);
        assert!(mapper.contains(79, 20));
        assert!(!mapper.contains(79, 0));
    }

    #[test]
    fn test_mapper_cell_after() {
        let mapper = mapper();
        assert_eq!(mapper.to_cell_after(15.0, 30.0), (2, 3));
        assert_eq!(mapper.to_cell_after(10_000.0, 10_000.0), (79, 20));
    }

    fn render_scene(scene: &Scene, geometry: &ViewportGeometry, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        ChartWidget::new(scene, geometry, &Theme::default()).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_rect_fills_background() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene.append(root, Shape::rect(0.0, 0.0, 50.0, 40.0), NodeStyle::default().fill("#FF0000"));
        let geometry = ViewportGeometry::new(100.0, 40.0);
        let buf = render_scene(&scene, &geometry, 10, 4);

        assert_eq!(buf.cell((0, 0)).unwrap().bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf.cell((4, 3)).unwrap().bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf.cell((5, 0)).unwrap().bg, Theme::default().base);
    }

    #[test]
    fn test_transparent_group_is_skipped() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.append(root, Shape::Group, NodeStyle::default().opacity(0.0));
        scene.append(group, Shape::text(0.0, 20.0, TextAnchor::Start, "hidden"), NodeStyle::default());
        let buf = render_scene(&scene, &ViewportGeometry::new(100.0, 40.0), 10, 4);
        assert!(!buffer_to_string(&buf).contains("hidden"));
    }

    #[test]
    fn test_lines_do_not_overwrite_text() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene.append(root, Shape::text(0.0, 10.0, TextAnchor::Start, "abc"), NodeStyle::default());
        scene.append(
            root,
            Shape::line(15.0, 0.0, 15.0, 40.0),
            NodeStyle::default().stroke("lightblue", 2.0).dash(&[4.0, 4.0]),
        );
        let buf = render_scene(&scene, &ViewportGeometry::new(100.0, 40.0), 10, 4);
        let text = buffer_to_string(&buf);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("abc"));
        assert_eq!(lines[1], " ┊");
        assert_eq!(buf.cell((1, 1)).unwrap().fg, Color::Rgb(173, 216, 230));
    }

    #[test]
    fn test_full_chart_shows_labels() {
        let chart = Chart::from_config(&ChartConfig::default());
        let buf = render_scene(chart.surface.scene(), &chart.rendered.geometry, 80, 22);
        let text = buffer_to_string(&buf);

        assert!(text.contains("Consistent Failure Zone"));
        assert!(text.contains("Danger"));
        assert!(text.contains("Zone"));
        assert!(text.contains("Reasonable Success"));
        assert!(text.contains("0:00"));
        assert!(text.contains('┊'));
        assert!(!text.contains("Average meals per day"));

        // "Danger" sits directly above "Zone" and the neighbouring label
        // does not cover it.
        let lines: Vec<&str> = text.lines().collect();
        let danger_row = lines.iter().position(|l| l.contains("Danger")).unwrap();
        assert!(lines[danger_row + 1].contains("Zone"));
    }

    #[test]
    fn test_tick_labels_do_not_collide() {
        let chart = Chart::from_config(&ChartConfig::default());
        let buf = render_scene(chart.surface.scene(), &chart.rendered.geometry, 60, 22);
        let text = buffer_to_string(&buf);
        let tick_row = text.lines().find(|l| l.contains("0:00")).unwrap();
        assert!(!tick_row.contains(":00:"));
        assert!(!tick_row.contains("00:0"));
    }

    #[test]
    fn test_zone_band_colors() {
        let chart = Chart::from_config(&ChartConfig::default());
        let mapper = CellMapper::new(Rect::new(0, 0, 80, 22), &chart.rendered.geometry);
        let buf = render_scene(chart.surface.scene(), &chart.rendered.geometry, 80, 22);
        let scale = chart.rendered.scale;

        let (col, row) = mapper.to_cell(scale.map(12.0) + 3.0, 200.0).unwrap();
        assert_eq!(buf.cell((col, row)).unwrap().bg, Color::Rgb(255, 215, 0));
        let (col, row) = mapper.to_cell(scale.map(22.0), 200.0).unwrap();
        assert_eq!(buf.cell((col, row)).unwrap().bg, Theme::default().base);
    }

    #[test]
    fn test_length_unit_used_for_ticks() {
        assert!((Length::Em(0.71).to_px(12.0) - 8.52).abs() < 1e-9);
    }
}
