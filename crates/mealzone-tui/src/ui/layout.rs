//! Layout helpers for the mealzone TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Split the screen into title row, chart area and footer row.
pub fn main_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Place a `width` x `height` box with its top-left at `anchor`, shifted
/// back inside `bounds` where it would overflow.
pub fn clamp_popup(anchor: (u16, u16), width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let max_x = bounds.x + bounds.width - width;
    let max_y = bounds.y + bounds.height - height;
    let x = anchor.0.clamp(bounds.x, max_x);
    let y = anchor.1.clamp(bounds.y, max_y);
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_layout_rows() {
        let (title, chart, footer) = main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(title, Rect::new(0, 0, 80, 1));
        assert_eq!(chart, Rect::new(0, 1, 80, 22));
        assert_eq!(footer, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_centered_fixed() {
        let rect = centered_fixed(20, 10, Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(30, 7, 20, 10));
    }

    #[test]
    fn test_clamp_popup() {
        let bounds = Rect::new(0, 0, 80, 24);
        assert_eq!(clamp_popup((10, 5), 20, 6, bounds), Rect::new(10, 5, 20, 6));
        assert_eq!(clamp_popup((75, 22), 20, 6, bounds), Rect::new(60, 18, 20, 6));
        assert_eq!(clamp_popup((0, 0), 100, 30, bounds), Rect::new(0, 0, 80, 24));
    }
}
