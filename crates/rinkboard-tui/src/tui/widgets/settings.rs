// Settings widget: league settings with any unsaved edits, and the scoring
// rules.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Frame;

use rinkboard_core::metrics::format_millions;

use super::header_style;
use crate::tui::TuiState;

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_settings(frame, chunks[0], state);
    render_scoring(frame, chunks[1], state);
}

fn render_settings(frame: &mut Frame, area: Rect, state: &TuiState) {
    let settings = state.settings();
    let saved = &state.snapshot.store.settings;
    let label = Style::default().fg(Color::Gray);
    let changed = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let unchanged = Style::default().fg(Color::White);
    let pick = |dirty: bool| if dirty { changed } else { unchanged };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Sync interval   [i] ", label),
            Span::styled(
                format!("{} min", settings.sync_interval_minutes),
                pick(settings.sync_interval_minutes != saved.sync_interval_minutes),
            ),
        ]),
        Line::from(vec![
            Span::styled("Salary sync     [y] ", label),
            Span::styled(
                settings.salary_sync_frequency.label(),
                pick(settings.salary_sync_frequency != saved.salary_sync_frequency),
            ),
        ]),
        Line::from(vec![
            Span::styled("Salary cap      [c] ", label),
            Span::styled(
                format_millions(settings.salary_cap),
                pick(settings.salary_cap != saved.salary_cap),
            ),
        ]),
        Line::default(),
    ];

    if state.settings_draft.is_some() {
        lines.push(Line::from(Span::styled(
            "Unsaved changes: s to save, Esc to discard",
            changed,
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("League settings"),
    );
    frame.render_widget(paragraph, area);
}

fn render_scoring(frame: &mut Frame, area: Rect, state: &TuiState) {
    let rules = &state.snapshot.store.scoring_rules;
    let rows: Vec<Row> = rules
        .iter()
        .map(|(stat, weight)| Row::new(vec![stat.clone(), format!("{weight:+}")]))
        .collect();

    let table = Table::new(rows, [Constraint::Min(14), Constraint::Length(8)])
        .header(Row::new(vec!["Stat", "Points"]).style(header_style()))
        .block(Block::default().borders(Borders::ALL).title("Scoring rules"));
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
