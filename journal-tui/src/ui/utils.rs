use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// First line to show so that `len` lines starting at `start` fit in `height`.
pub fn scroll_offset(start: usize, len: usize, height: usize) -> usize {
    (start + len).saturating_sub(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(40, 4, area);
        assert!(rect.width <= area.width);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 3);
    }

    #[test]
    fn scroll_keeps_focused_block_visible() {
        assert_eq!(scroll_offset(0, 4, 10), 0);
        assert_eq!(scroll_offset(8, 4, 10), 2);
    }
}
