// Standings widget: the league table as of one snapshot day, next to the
// season-long points race.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use rinkboard_core::metrics::{day_standings, format_day};

use super::{
    gain_span, header_style, highlight_style, placeholder, points, render_history_chart,
    table_state,
};
use crate::tui::{standings_day, TuiState};

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState) {
    let history = &state.snapshot.store.history;
    let Some(day) = standings_day(&state.snapshot) else {
        placeholder(frame, area, "Standings", "No history snapshots yet");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let standings = day_standings(history, day);
    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Team"),
        Cell::from("Points"),
        Cell::from("Gain"),
    ])
    .style(header_style());

    let rows: Vec<Row> = standings
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.rank.to_string()),
                Cell::from(s.team.clone()),
                Cell::from(points(s.points)),
                Cell::from(Line::from(gain_span(s.gain))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(14),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let mut table_state = table_state(state.cursor, rows.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title(state, day)),
        )
        .row_highlight_style(highlight_style())
        .highlight_symbol(">> ");
    frame.render_stateful_widget(table, chunks[0], &mut table_state);

    let teams: Vec<String> = standings.iter().map(|s| s.team.clone()).collect();
    render_history_chart(frame, chunks[1], "Points race", history, &teams);
}

/// `Standings 11/02 (2 of 5)`.
fn title(state: &TuiState, day: &str) -> String {
    let history = &state.snapshot.store.history;
    match history.iter().position(|s| s.day == day) {
        Some(idx) => format!("Standings {} ({} of {})", format_day(day), idx + 1, history.len()),
        None => format!("Standings {}", format_day(day)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
