//! Layout builders shared by the screens.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{HELP_BAR_HEIGHT, SCREEN_MARGIN, TITLE_HEIGHT};

/// Standard screen layout with title, content area, and help bar.
///
/// Returns a tuple of (title_area, content_area, help_area)
pub fn screen_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(4),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Home content split into the collapsible header and the posting list.
///
/// `header_rows` is clamped so the list always keeps at least one row.
pub fn home_layout(area: Rect, header_rows: u16) -> (Rect, Rect) {
    let header_rows = header_rows.min(area.height.saturating_sub(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_rows), Constraint::Min(1)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Create a centered popup rectangle.
///
/// # Arguments
/// * `percent_x` - Width as percentage of parent (0-100)
/// * `percent_y` - Height as percentage of parent (0-100)
/// * `area` - The parent area to center within
pub fn centered_popup(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Standard popup sizes
pub mod popup_sizes {
    /// Large popup (70% x 70%) - for the help screen
    pub const LARGE: (u16, u16) = (70, 70);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_layout_keeps_a_list_row() {
        let (header, list) = home_layout(Rect::new(0, 0, 40, 5), 12);
        assert_eq!(header.height, 4);
        assert_eq!(list.height, 1);
    }

    #[test]
    fn popup_is_centered() {
        let popup = centered_popup(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(popup.x, 25);
        assert_eq!(popup.width, 50);
    }
}
