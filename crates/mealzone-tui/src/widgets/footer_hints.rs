//! Footer status bar widget.
//!
//! Format: `Reasonable Success │ 10:00-14:00        [←/→] zone │ [?] help`
//!
//! The left side names the zone under the pointer or keyboard selection,
//! the right side lists key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "q", "Ctrl+C").
    pub key: String,
    /// The action description (e.g., "quit").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Footer status bar widget.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    zone: Option<&'a str>,
    span: Option<String>,
}

impl<'a> FooterHints<'a> {
    /// Create a new footer hints widget.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            zone: None,
            span: None,
        }
    }

    /// Set the active zone label and its hour span.
    #[must_use]
    pub fn zone(mut self, label: &'a str, span: impl Into<String>) -> Self {
        self.zone = Some(label);
        self.span = Some(span.into());
        self
    }

    /// Hints shown on the chart screen.
    pub fn default_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("←/→", "zone"),
            KeyHint::new("Esc", "clear"),
            KeyHint::new("?", "help"),
            KeyHint::new("q", "quit"),
        ]
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        if let Some(zone) = self.zone {
            left_spans.push(Span::styled(zone, Style::default().fg(self.theme.primary)));
            if let Some(span) = self.span {
                left_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
                left_spans.push(Span::styled(span, Style::default().fg(self.theme.subtext)));
            }
        }

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.key, Style::default().fg(self.theme.primary)));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.action, Style::default().fg(self.theme.subtext)));
        }

        // Display widths, not byte lengths: the arrow hint is multi-byte.
        let left_width: usize = left_spans.iter().map(|s| s.content.width()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.content.width()).sum();
        let total_width = area.width as usize;

        let padding = total_width.saturating_sub(left_width + right_width);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        let paragraph =
            Paragraph::new(Line::from(left_spans)).style(Style::default().bg(self.theme.surface));
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_key_hint_creation() {
        let hint = KeyHint::new("q", "quit");
        assert_eq!(hint.key, "q");
        assert_eq!(hint.action, "quit");
    }

    #[test]
    fn test_default_hints() {
        let hints = FooterHints::default_hints();
        assert_eq!(hints.len(), 4);
        assert!(hints.iter().any(|h| h.key == "?" && h.action == "help"));
        assert!(hints.iter().any(|h| h.key == "q" && h.action == "quit"));
    }

    #[test]
    fn test_hints_right_aligned() {
        let theme = Theme::default();
        let hints = vec![KeyHint::new("q", "quit")];
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        FooterHints::new(&hints, &theme).render(area, &mut buf);

        let text = buffer_to_string(&buf);
        assert!(text.ends_with("[q] quit"));
        assert_eq!(text.len(), 30);
    }

    #[test]
    fn test_zone_shown_on_left() {
        let theme = Theme::default();
        let hints = FooterHints::default_hints();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        FooterHints::new(&hints, &theme)
            .zone("Danger Zone", "8:00-10:00")
            .render(area, &mut buf);

        let text = buffer_to_string(&buf);
        assert!(text.starts_with("Danger Zone │ 8:00-10:00"));
        assert!(text.contains("[?] help"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn test_footer_layout_snapshot() {
        let theme = Theme::default();
        let hints = vec![KeyHint::new("q", "quit")];
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        FooterHints::new(&hints, &theme)
            .zone("Danger Zone", "8:00-10:00")
            .render(area, &mut buf);

        insta::assert_snapshot!(buffer_to_string(&buf), @"Danger Zone │ 8:00-10:00        [q] quit");
    }
}
