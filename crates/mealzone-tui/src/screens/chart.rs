//! The chart screen: title, timeline, tooltip and footer.

use mealzone_engine::DrawingSurface;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Widget,
};

use super::{render_help_overlay, Screen};
use crate::app::{App, TITLE};
use crate::ui::main_layout;
use crate::widgets::{ChartWidget, FooterHints, TooltipWidget};

/// The only screen of the app.
pub struct ChartScreen;

impl Screen for ChartScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let theme = &app.theme;
        buf.set_style(area, Style::default().bg(theme.base));

        let (title_row, chart_area, footer) = main_layout(area);

        let title_style = Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD);
        let title_area = app.title_area();
        buf.set_span(title_area.x, title_row.y, &Span::styled(TITLE, title_style), title_area.width);

        let geometry = app.chart.rendered.geometry;
        ChartWidget::new(app.chart.surface.scene(), &geometry, theme).render(chart_area, buf);
        TooltipWidget::new(app.chart.state.tooltip(), app.mapper(), theme).render(chart_area, buf);

        let hints = FooterHints::default_hints();
        let mut footer_widget = FooterHints::new(&hints, theme);
        if let Some((label, span)) = app.selected_zone_summary() {
            footer_widget = footer_widget.zone(label, span);
        }
        footer_widget.render(footer, buf);

        if app.show_help {
            render_help_overlay(area, buf, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::event::Action;
    use crate::test_utils::{create_test_app, render_app_to_string};
    use std::time::Duration;

    #[test]
    fn test_initial_screen() {
        let mut app = create_test_app();
        let text = render_app_to_string(&mut app);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains("Meal Timing Zones"));
        assert!(text.contains("Consistent Failure Zone"));
        assert!(text.contains("Danger"));
        assert!(text.contains("Consistent Success"));
        assert!(lines[23].ends_with("[q] quit"));
        assert!(!text.contains("Average meals per day"));
    }

    #[test]
    fn test_hovered_zone_shows_tooltip_and_footer() {
        let mut app = create_test_app();
        app.handle_action(Action::Right, Duration::ZERO);
        app.handle_action(Action::Right, Duration::ZERO);
        app.handle_action(Action::Right, Duration::ZERO);
        let text = render_app_to_string(&mut app);

        assert!(text.contains("This window represents a period where"));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[23].starts_with("Reasonable Success │ 10:00-14:00"));
    }

    #[test]
    fn test_title_hover_reveals_legend() {
        let mut app = create_test_app();
        let title = app.title_area();
        app.handle_mouse(title.x, title.y, Duration::ZERO);
        app.tick(Duration::from_millis(400));
        let text = render_app_to_string(&mut app);

        assert!(text.contains("Average meals per day ="));
        assert!(text.contains("3.125"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = create_test_app();
        app.handle_action(Action::Help, Duration::ZERO);
        let text = render_app_to_string(&mut app);
        assert!(text.contains("Help"));
        assert!(text.contains("Step through zones"));
    }
}
