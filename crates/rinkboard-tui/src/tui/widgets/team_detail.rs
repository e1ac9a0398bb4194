// Team detail widget: team header, roster by points, and the per-player
// history chart for the selected stat.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use rinkboard_core::metrics::{cap_space, format_millions, roster_by_points};
use rinkboard_core::model::{Player, Stat, Team, TeamId};

use super::{header_style, highlight_style, placeholder, points, render_history_chart, table_state};
use crate::tui::layout::split_detail;
use crate::tui::TuiState;

/// Players charted on the team view.
const CHART_PLAYERS: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState, team_id: TeamId) {
    let store = &state.snapshot.store;
    let Some(team) = store.team(team_id) else {
        placeholder(frame, area, "Team", "This team is not in the latest data");
        return;
    };
    let stat = state.snapshot.view.selected_stat();
    let roster = roster_by_points(team);
    let layout = split_detail(area, 4);

    render_header(frame, layout.header, team, store.settings.salary_cap);
    render_roster(frame, layout.table, state, &roster, stat);

    let title = format!("Top {CHART_PLAYERS}: {} [s]", stat.label());
    match store.team_player_history_for(team_id, stat) {
        Some(history) => {
            render_history_chart(frame, layout.chart, &title, history, &chart_series(&roster))
        }
        None => placeholder(frame, layout.chart, &title, "Loading history..."),
    }
}

/// Names of the best `CHART_PLAYERS` players, best first.
pub fn chart_series(roster: &[&Player]) -> Vec<String> {
    roster
        .iter()
        .take(CHART_PLAYERS)
        .map(|p| p.full_name.clone())
        .collect()
}

fn render_header(frame: &mut Frame, area: Rect, team: &Team, cap: f64) {
    let space = cap_space(cap, &team.players);
    let space_style = if space.over_cap {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let owner = team.owner.as_deref().unwrap_or("--");

    let lines = vec![
        Line::from(vec![
            Span::styled(
                team.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  ({owner})  #{}  {}-{}-{}",
                team.rank, team.wins, team.losses, team.ties
            )),
        ]),
        Line::from(vec![
            Span::raw(format!(
                "{} pts   Committed {}   Space ",
                points(team.points),
                format_millions(space.committed)
            )),
            Span::styled(format_millions(space.space), space_style),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_roster(frame: &mut Frame, area: Rect, state: &TuiState, roster: &[&Player], stat: Stat) {
    let header = Row::new(vec![
        "Player".to_string(),
        "Pos".to_string(),
        "Slot".to_string(),
        "Pts".to_string(),
        stat.label().to_string(),
    ])
    .style(header_style());

    let rows: Vec<Row> = roster
        .iter()
        .map(|p| {
            let style = if !p.is_healthy() {
                Style::default().fg(Color::Red)
            } else if p.is_bench() {
                Style::default().fg(Color::Gray)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(p.full_name.clone()),
                Cell::from(p.position.clone()),
                Cell::from(p.lineup_slot.clone().unwrap_or_default()),
                Cell::from(points(p.total_points)),
                Cell::from(points(p.stat(stat))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(8),
    ];

    let mut table_state = table_state(state.cursor, rows.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Roster ({})", roster.len())),
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
    use crate::tui::fixtures::{player, snapshot_in};
    use rinkboard_core::view::View;

    fn rendered(state: &TuiState, team_id: TeamId) -> String {
        let backend = ratatui::backend::TestBackend::new(120, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state, team_id))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn chart_series_keeps_the_top_ten() {
        let players: Vec<Player> = (0..12)
            .map(|i| player(i, &format!("P{i}"), "C", 100.0 - i as f64))
            .collect();
        let team = Team {
            players,
            ..Team::default()
        };
        let series = chart_series(&roster_by_points(&team));
        assert_eq!(series.len(), 10);
        assert_eq!(series[0], "P0");
        assert_eq!(series[9], "P9");
    }

    #[test]
    fn shows_roster_and_cap_space() {
        let mut state = TuiState::default();
        state.apply_snapshot(snapshot_in(View::TeamDetail(3)));
        let text = rendered(&state, 3);
        assert!(text.contains("Roster (2)"));
        assert!(text.contains("Rostered Nine"));
        assert!(text.contains("$62.50M"));
        assert!(text.contains("Top 10: Points"));
    }

    #[test]
    fn history_for_another_stat_shows_loading() {
        let mut snapshot = snapshot_in(View::TeamDetail(3));
        snapshot.view.select_stat(Stat::Goals);
        let mut state = TuiState::default();
        state.apply_snapshot(snapshot);
        assert!(rendered(&state, 3).contains("Loading history..."));
    }

    #[test]
    fn missing_team_shows_a_placeholder() {
        let mut state = TuiState::default();
        state.apply_snapshot(snapshot_in(View::TeamDetail(3)));
        assert!(rendered(&state, 99).contains("not in the latest data"));
    }
}
