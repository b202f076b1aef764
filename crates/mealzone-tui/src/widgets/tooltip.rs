//! Tooltip popup for the hovered zone.

use mealzone_engine::TooltipState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;
use crate::ui::clamp_popup;

use super::chart::CellMapper;

/// Widest the popup gets, borders included.
pub const TOOLTIP_MAX_WIDTH: u16 = 44;

/// Tooltip popup. Renders nothing while the tooltip is hidden.
pub struct TooltipWidget<'a> {
    state: &'a TooltipState,
    mapper: CellMapper,
    theme: &'a Theme,
}

impl<'a> TooltipWidget<'a> {
    pub fn new(state: &'a TooltipState, mapper: CellMapper, theme: &'a Theme) -> Self {
        Self {
            state,
            mapper,
            theme,
        }
    }

    /// Screen rect the popup occupies inside `bounds`, if visible.
    pub fn popup_area(&self, bounds: Rect) -> Option<Rect> {
        let content = self.visible_content()?;
        let (lines, _, inner_width) = layout_lines(&content.heading, &content.body, bounds);
        let width = inner_width + 2;
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
        let anchor = self
            .mapper
            .to_cell_after(self.state.position.0, self.state.position.1);
        Some(clamp_popup(anchor, width, height, bounds))
    }

    fn visible_content(&self) -> Option<&'a mealzone_engine::TooltipContent> {
        if self.state.visible {
            self.state.content.as_ref()
        } else {
            None
        }
    }
}

/// Wrapped heading and body lines, how many of them belong to the heading,
/// and the inner width they need.
fn layout_lines(heading: &str, body: &str, bounds: Rect) -> (Vec<String>, usize, u16) {
    let max_inner = usize::from(TOOLTIP_MAX_WIDTH.min(bounds.width).saturating_sub(2)).max(1);
    let mut lines: Vec<String> = textwrap::wrap(heading, max_inner)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    let heading_lines = lines.len();
    if !body.is_empty() {
        lines.extend(
            textwrap::wrap(body, max_inner)
                .into_iter()
                .map(|l| l.into_owned()),
        );
    }
    let widest = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let inner = u16::try_from(widest.min(max_inner)).unwrap_or(1).max(1);
    (lines, heading_lines, inner)
}

impl Widget for TooltipWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(content) = self.visible_content() else {
            return;
        };
        let Some(popup) = self.popup_area(area) else {
            return;
        };
        let (lines, heading_lines, _) = layout_lines(&content.heading, &content.body, area);

        let text: Vec<Line> = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                if i < heading_lines {
                    Line::from(Span::styled(
                        line,
                        Style::default()
                            .fg(self.theme.primary)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(line, Style::default().fg(self.theme.text)))
                }
            })
            .collect();

        Clear.render(popup, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .style(Style::default().bg(self.theme.surface));
        Paragraph::new(text).block(block).render(popup, buf);
    }
}
