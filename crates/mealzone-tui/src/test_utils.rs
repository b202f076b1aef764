//! Test utilities for mealzone-tui rendering tests.
//!
//! Helpers for creating test terminals, rendering the app and converting
//! buffers to strings for assertions and snapshots.

use crate::app::App;
use crate::screens::{chart::ChartScreen, Screen};
use crate::theme::Theme;
use mealzone_engine::ChartConfig;
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create an app laid out for the default test terminal.
///
/// Uses the dark theme regardless of `NO_COLOR` so colour assertions are
/// stable.
pub fn create_test_app() -> App {
    let mut app = App::new(&ChartConfig::default());
    app.theme = Theme::mocha();
    app.area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    app
}

/// Draw the app into a test terminal and return the screen as text.
pub fn render_app_to_string(app: &mut App) -> String {
    let mut terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
    terminal
        .draw(|frame| {
            let area = frame.area();
            app.area = area;
            ChartScreen.render(app, area, frame.buffer_mut());
        })
        .expect("Failed to draw");
    buffer_to_string(terminal.backend().buffer())
}

/// Convert a buffer to a string, one line per row.
///
/// Trailing whitespace is trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        result.push_str(line.trim_end());
        if y < area.bottom() - 1 {
            result.push('\n');
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_to_string_trims_lines() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        buf.set_string(0, 0, "ab", ratatui::style::Style::default());
        buf.set_string(2, 1, "cd", ratatui::style::Style::default());
        assert_eq!(buffer_to_string(&buf), "ab\n  cd");
    }

    #[test]
    fn test_render_app_has_full_height() {
        let mut app = create_test_app();
        let text = render_app_to_string(&mut app);
        assert_eq!(text.lines().count(), usize::from(TEST_HEIGHT));
    }
}
