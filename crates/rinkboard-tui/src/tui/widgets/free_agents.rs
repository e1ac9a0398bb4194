// Free agents widget: sortable table of unrostered players.
//
// The sort key and direction live in the core ViewState; the header marks
// the active column with the direction arrow.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use rinkboard_core::metrics::{sort_by_config, SortConfig};
use rinkboard_core::model::Player;

use super::{header_style, highlight_style, points, table_state};
use crate::tui::input::format_dollars;
use crate::tui::TuiState;

/// Sortable columns as (sort key, header label), in `o` cycling order.
pub const COLUMNS: [(&str, &str); 5] = [
    ("fullName", "Name"),
    ("proTeam", "Team"),
    ("ownership", "Own%"),
    ("salary_value", "Salary"),
    ("total_points", "Pts"),
];

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState) {
    let sort = state.snapshot.view.sort();
    let players = sort_by_config(&state.snapshot.store.free_agents, sort);

    let mut header_cells = header_labels(sort);
    header_cells.insert(1, "Pos".to_string());
    header_cells.push("Status".to_string());
    let header = Row::new(header_cells.into_iter().map(Cell::from)).style(header_style());

    let rows: Vec<Row> = players.iter().map(|p| player_row(p)).collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(13),
        Constraint::Length(8),
        Constraint::Length(12),
    ];

    let mut table_state = table_state(state.cursor, rows.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Free Agents ({})", players.len())),
        )
        .row_highlight_style(highlight_style())
        .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Sortable column headers, the active one suffixed with its arrow.
pub fn header_labels(sort: &SortConfig) -> Vec<String> {
    COLUMNS
        .iter()
        .map(|(key, label)| {
            if *key == sort.key {
                format!("{label} {}", sort.direction.arrow())
            } else {
                label.to_string()
            }
        })
        .collect()
}

fn player_row(p: &Player) -> Row<'static> {
    let status_style = if p.is_healthy() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Red)
    };
    Row::new(vec![
        Cell::from(p.full_name.clone()),
        Cell::from(p.position.clone()),
        Cell::from(p.pro_team.clone()),
        Cell::from(format!("{:.1}", p.ownership)),
        Cell::from(p.salary_value.map(format_dollars).unwrap_or_else(|| "--".into())),
        Cell::from(points(p.total_points)),
        Cell::from(p.status.clone().unwrap_or_default()).style(status_style),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
