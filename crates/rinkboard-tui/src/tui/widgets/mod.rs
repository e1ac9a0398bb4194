// TUI widget modules, one per view or overlay, plus shared drawing helpers.

pub mod dashboard;
pub mod free_agents;
pub mod notification;
pub mod player_detail;
pub mod prompt;
pub mod quit_confirm;
pub mod salaries;
pub mod settings;
pub mod standings;
pub mod status_bar;
pub mod team_detail;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, TableState};
use ratatui::Frame;

use rinkboard_core::metrics::format_day;
use rinkboard_core::model::HistorySnapshot;

/// Line colors for chart series, reused in order.
const SERIES_COLORS: [Color; 10] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::LightRed,
    Color::LightBlue,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightMagenta,
    Color::White,
];

pub(crate) fn header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub(crate) fn highlight_style() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

/// Table selection for the row cursor. Nothing is selected in an empty table.
pub(crate) fn table_state(cursor: usize, rows: usize) -> TableState {
    TableState::default().with_selected((rows > 0).then(|| cursor.min(rows - 1)))
}

/// Fantasy points and stat totals, one decimal.
pub(crate) fn points(value: f64) -> String {
    format!("{value:.1}")
}

/// Signed change, coloured green for gains and red for drops.
pub(crate) fn gain_span(gain: Option<f64>) -> Span<'static> {
    match gain {
        None => Span::styled("--", Style::default().fg(Color::DarkGray)),
        Some(g) if g < 0.0 => Span::styled(format!("{g:.1}"), Style::default().fg(Color::Red)),
        Some(g) => Span::styled(format!("+{g:.1}"), Style::default().fg(Color::Green)),
    }
}

/// A bordered placeholder message, used for empty or loading states.
pub(crate) fn placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(paragraph, area);
}

/// Compute a centered rectangle of the given size within `area`, clamped to
/// the available space.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// History chart
// ---------------------------------------------------------------------------

/// Chart points for one series: x is the snapshot index. Days missing the
/// series are skipped.
pub(crate) fn series_points(history: &[HistorySnapshot], key: &str) -> Vec<(f64, f64)> {
    history
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.get(key).map(|v| (i as f64, v)))
        .collect()
}

/// `[min, max]` over all points, padded so flat lines stay visible.
pub(crate) fn value_bounds<'a>(series: impl IntoIterator<Item = &'a [(f64, f64)]>) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for points in series {
        for (_, y) in points {
            min = min.min(*y);
            max = max.max(*y);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.05).max(1.0);
    [min - pad, max + pad]
}

/// Line chart of cumulative values over the snapshot days, one line per key.
pub(crate) fn render_history_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    history: &[HistorySnapshot],
    keys: &[String],
) {
    if history.is_empty() || keys.is_empty() {
        placeholder(frame, area, title, "No history yet");
        return;
    }

    let data: Vec<Vec<(f64, f64)>> = keys.iter().map(|k| series_points(history, k)).collect();
    let y_bounds = value_bounds(data.iter().map(Vec::as_slice));

    let datasets: Vec<Dataset> = keys
        .iter()
        .zip(&data)
        .enumerate()
        .map(|(i, (key, points))| {
            Dataset::default()
                .name(key.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(points)
        })
        .collect();

    let first = history.first().map(|s| format_day(&s.day)).unwrap_or_default();
    let last = history.last().map(|s| format_day(&s.day)).unwrap_or_default();
    let x_max = (history.len().saturating_sub(1)).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(vec![first, last])
                .style(Style::default().fg(Color::Gray)),
        )
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(vec![format!("{:.0}", y_bounds[0]), format!("{:.0}", y_bounds[1])])
                .style(Style::default().fg(Color::Gray)),
        );

    frame.render_widget(chart, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
