// Overview widget: league leader, top free agent, scoring rules, and the
// team table in standings order.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use rinkboard_core::metrics::league_summary;
use rinkboard_core::model::ScoringRules;

use super::{header_style, highlight_style, points, table_state};
use crate::tui::TuiState;

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    render_summary(frame, chunks[0], state);
    render_teams(frame, chunks[1], state);
}

fn render_summary(frame: &mut Frame, area: Rect, state: &TuiState) {
    let store = &state.snapshot.store;
    let summary = league_summary(&store.teams, &store.free_agents);
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let leader = match summary.leader {
        Some(team) => format!("{} ({} pts)", team.name, points(team.points)),
        None => "--".to_string(),
    };
    let top_free_agent = match summary.top_free_agent {
        Some(p) => format!("{} {} ({} pts)", p.full_name, p.position, points(p.total_points)),
        None => "--".to_string(),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("League leader:  ", label),
            Span::styled(leader, value),
        ]),
        Line::from(vec![
            Span::styled("Top free agent: ", label),
            Span::styled(top_free_agent, value),
        ]),
        Line::from(vec![
            Span::styled("Scoring:        ", label),
            Span::raw(scoring_line(&store.scoring_rules)),
        ]),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Overview"));
    frame.render_widget(paragraph, area);
}

/// `goals 2, assists 1, ...` in key order.
pub fn scoring_line(rules: &ScoringRules) -> String {
    if rules.is_empty() {
        return "--".to_string();
    }
    rules
        .iter()
        .map(|(stat, weight)| format!("{stat} {weight}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_teams(frame: &mut Frame, area: Rect, state: &TuiState) {
    let teams = &state.snapshot.store.teams;

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Team"),
        Cell::from("Owner"),
        Cell::from("W-L-T"),
        Cell::from("Pts"),
        Cell::from("G"),
        Cell::from("A"),
        Cell::from("PPP"),
        Cell::from("SOG"),
        Cell::from("HIT"),
        Cell::from("BLK"),
    ])
    .style(header_style());

    let rows: Vec<Row> = teams
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.rank.to_string()),
                Cell::from(t.name.clone()),
                Cell::from(t.owner.clone().unwrap_or_default()),
                Cell::from(format!("{}-{}-{}", t.wins, t.losses, t.ties)),
                Cell::from(points(t.points)),
                Cell::from(format!("{:.0}", t.goals)),
                Cell::from(format!("{:.0}", t.assists)),
                Cell::from(format!("{:.0}", t.ppp)),
                Cell::from(format!("{:.0}", t.sog)),
                Cell::from(format!("{:.0}", t.hits)),
                Cell::from(format!("{:.0}", t.blocks)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
    ];

    let mut table_state = table_state(state.cursor, rows.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Teams ({})", teams.len())),
        )
        .row_highlight_style(highlight_style())
        .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, &mut table_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::fixtures::loaded_snapshot;

    #[test]
    fn scoring_line_lists_rules_in_key_order() {
        let mut rules = ScoringRules::new();
        rules.insert("goals".into(), 2.0);
        rules.insert("assists".into(), 1.5);
        assert_eq!(scoring_line(&rules), "assists 1.5, goals 2");
        assert_eq!(scoring_line(&ScoringRules::new()), "--");
    }

    #[test]
    fn render_shows_the_leader() {
        let backend = ratatui::backend::TestBackend::new(100, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = TuiState::default();
        state.apply_snapshot(loaded_snapshot());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Ice Hogs (980.0 pts)"));
        assert!(text.contains("Free Forty C (60.0 pts)"));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(100, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = TuiState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
