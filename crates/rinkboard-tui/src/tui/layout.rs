// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row): tabs, sync state, staleness   |
// +--------------------------------------------------+
// |                                                  |
// | Main Panel: the current view                     |
// |                                                  |
// +--------------------------------------------------+
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+
//
// Detail views split the main panel further with `split_detail`.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    /// Tab-switched content area.
    pub main_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(5),    // main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        help_bar: vertical[2],
    }
}

/// Areas of a detail view: a header box, a table on the left, and a chart
/// on the right.
#[derive(Debug, Clone)]
pub struct DetailLayout {
    pub header: Rect,
    pub table: Rect,
    pub chart: Rect,
}

pub fn split_detail(area: Rect, header_height: u16) -> DetailLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(3)])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vertical[1]);

    DetailLayout {
        header: vertical[0],
        table: horizontal[0],
        chart: horizontal[1],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn bars_are_one_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
    }

    #[test]
    fn zones_stack_without_gaps() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.y, 0);
        assert_eq!(layout.main_panel.y, 1);
        assert_eq!(layout.main_panel.height, 38);
        assert_eq!(layout.help_bar.y, 39);
    }

    #[test]
    fn full_width() {
        let layout = build_layout(test_area());
        for rect in [layout.status_bar, layout.main_panel, layout.help_bar] {
            assert_eq!(rect.width, 120);
        }
    }

    #[test]
    fn detail_split_halves_the_body() {
        let detail = split_detail(Rect::new(0, 0, 100, 30), 5);
        assert_eq!(detail.header.height, 5);
        assert_eq!(detail.table.width, 50);
        assert_eq!(detail.chart.width, 50);
        assert_eq!(detail.table.height, 25);
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let layout = build_layout(Rect::new(0, 0, 10, 3));
        assert!(layout.main_panel.height <= 3);
        let _ = split_detail(Rect::new(0, 0, 4, 2), 5);
    }
}
