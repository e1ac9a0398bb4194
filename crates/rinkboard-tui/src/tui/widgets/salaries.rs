// Salaries widget: per-team cap table above the league salary records.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use rinkboard_core::metrics::{cap_table, format_millions, TeamCap};
use rinkboard_core::store::DataStore;

use super::{header_style, highlight_style, table_state};
use crate::tui::TuiState;

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState) {
    let store = &state.snapshot.store;
    let caps = cap_table(&store.teams, store.settings.salary_cap);

    // Borders + header + one line per team, capped at half the panel.
    let cap_height = (caps.len() as u16 + 3).min(area.height / 2).max(4);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(cap_height), Constraint::Min(3)])
        .split(area);

    render_cap_table(frame, chunks[0], state, &caps);
    render_records(frame, chunks[1], store);
}

fn render_cap_table(frame: &mut Frame, area: Rect, state: &TuiState, caps: &[TeamCap]) {
    let header = Row::new(vec!["Team", "Committed", "Cap space", ""]).style(header_style());

    let rows: Vec<Row> = caps
        .iter()
        .map(|row| {
            let (flag, style) = if row.cap.over_cap {
                (
                    "OVER CAP",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            } else {
                ("", Style::default().fg(Color::Green))
            };
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(format_millions(row.cap.committed)),
                Cell::from(format_millions(row.cap.space)).style(style),
                Cell::from(flag).style(style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(9),
    ];

    let cap = state.snapshot.store.settings.salary_cap;
    let mut table_state = table_state(state.cursor, rows.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Cap table (cap {})", format_millions(cap))),
        )
        .row_highlight_style(highlight_style())
        .highlight_symbol(">> ");
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_records(frame: &mut Frame, area: Rect, store: &DataStore) {
    let header = Row::new(vec!["Player", "Team", "Cap hit", "Through"]).style(header_style());

    let rows: Vec<Row> = store
        .salaries
        .iter()
        .map(|r| {
            let team = r
                .team_id
                .and_then(|id| store.team(id))
                .map_or_else(|| "FA".to_string(), |t| t.name.clone());
            Row::new(vec![
                r.full_name.clone(),
                team,
                r.salary.clone().unwrap_or_else(|| "--".into()),
                r.contract_years.clone().unwrap_or_else(|| "--".into()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Min(14),
        Constraint::Length(12),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Salary records ({})", store.salaries.len())),
    );
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
