// Player detail widget: bio and contract header, same-position free-agent
// comparison, stat progression chart, and per-day gains.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use rinkboard_core::metrics::{compare_free_agents, daily_deltas, format_day};
use rinkboard_core::model::{HistorySnapshot, Player, PlayerId, Stat, Team};

use super::{
    gain_span, header_style, highlight_style, placeholder, points, render_history_chart,
    table_state,
};
use crate::tui::layout::split_detail;
use crate::tui::TuiState;

/// Most recent daily gains listed under the chart.
const RECENT_GAINS: usize = 7;

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState, player_id: PlayerId) {
    let store = &state.snapshot.store;
    let Some(player) = store.player_for_detail(player_id) else {
        placeholder(frame, area, "Player", "This player is not in the latest data");
        return;
    };
    let team = store.find_player(player_id).and_then(|l| l.team);
    let stat = state.snapshot.view.selected_stat();
    let layout = split_detail(area, 5);

    render_header(frame, layout.header, player, team);
    render_comparison(frame, layout.table, state, player);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout.chart);

    let title = format!("{} progression [s]", stat.label());
    match store.player_history_for(player_id) {
        Some(history) => {
            render_history_chart(frame, right[0], &title, history, &[stat.key().to_string()]);
            render_gains(frame, right[1], history, stat);
        }
        None => {
            placeholder(frame, right[0], &title, "Loading history...");
            placeholder(frame, right[1], "Daily gains", "");
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, player: &Player, team: Option<&Team>) {
    let label = Style::default().fg(Color::Gray);
    let owner = team.map_or_else(|| "Free agent".to_string(), |t| t.name.clone());

    let health = match (&player.status, &player.injury_detail) {
        (_, Some(detail)) if !detail.is_empty() => {
            Span::styled(detail.clone(), Style::default().fg(Color::Red))
        }
        _ if !player.is_healthy() => Span::styled(
            player.status.clone().unwrap_or_default(),
            Style::default().fg(Color::Red),
        ),
        _ => Span::styled("Healthy", Style::default().fg(Color::Green)),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                player.full_name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {} {}  ", player.position, player.pro_team)),
            Span::styled(owner, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Status ", label),
            health,
            Span::styled("   Owned ", label),
            Span::raw(format!("{:.1}%", player.ownership)),
        ]),
        Line::from(vec![
            Span::styled("Cap hit ", label),
            Span::raw(player.salary.clone().unwrap_or_else(|| "--".into())),
            Span::styled("   Through ", label),
            Span::raw(player.contract_years.clone().unwrap_or_else(|| "--".into())),
            Span::styled("   [e] edit", label),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_comparison(frame: &mut Frame, area: Rect, state: &TuiState, player: &Player) {
    let comparisons = compare_free_agents(player, &state.snapshot.store.free_agents);

    let header = Row::new(vec!["Free agent", "Team", "Pts", "Diff"]).style(header_style());
    let rows: Vec<Row> = comparisons
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(c.candidate.full_name.clone()),
                Cell::from(c.candidate.pro_team.clone()),
                Cell::from(points(c.candidate.total_points)),
                Cell::from(Line::from(gain_span(Some(c.diff)))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16),
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
                .title(format!("Free agents at {} ({})", player.position, comparisons.len())),
        )
        .row_highlight_style(highlight_style())
        .highlight_symbol(">> ");
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// The last few per-day changes of `stat`, newest first.
pub fn recent_gains(history: &[HistorySnapshot], stat: Stat) -> Vec<(String, f64)> {
    let key = [stat.key()];
    daily_deltas(history, Some(&key[..]))
        .iter()
        .rev()
        .take(RECENT_GAINS)
        .map(|d| (d.day.clone(), d.get(stat.key()).unwrap_or(0.0)))
        .collect()
}

fn render_gains(frame: &mut Frame, area: Rect, history: &[HistorySnapshot], stat: Stat) {
    let rows: Vec<Row> = recent_gains(history, stat)
        .into_iter()
        .map(|(day, gain)| {
            Row::new(vec![
                Cell::from(format_day(&day)),
                Cell::from(Line::from(gain_span(Some(gain)))),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(7), Constraint::Length(8)])
        .header(Row::new(vec!["Day", "Gain"]).style(header_style()))
        .block(Block::default().borders(Borders::ALL).title("Daily gains"));
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::fixtures::snapshot_in;
    use rinkboard_core::view::View;

    fn rendered(state: &TuiState, player_id: PlayerId) -> String {
        let backend = ratatui::backend::TestBackend::new(120, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state, player_id))
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
    fn recent_gains_are_newest_first() {
        let history = vec![
            HistorySnapshot::new("2025-11-01").with("goals", 1.0),
            HistorySnapshot::new("2025-11-02").with("goals", 3.0),
            HistorySnapshot::new("2025-11-03").with("goals", 2.0),
        ];
        let gains = recent_gains(&history, Stat::Goals);
        assert_eq!(
            gains,
            vec![("2025-11-03".to_string(), -1.0), ("2025-11-02".to_string(), 2.0)]
        );
    }

    #[test]
    fn rostered_player_shows_team_contract_and_comparison() {
        let mut state = TuiState::default();
        state.apply_snapshot(snapshot_in(View::PlayerDetail(9)));
        let text = rendered(&state, 9);
        assert!(text.contains("Ice Hogs"));
        assert!(text.contains("$9,500,000"));
        assert!(text.contains("Free agents at C (1)"));
        assert!(text.contains("-60.0"));
        assert!(text.contains("+10.0"));
    }

    #[test]
    fn free_agent_without_history_shows_loading() {
        let mut state = TuiState::default();
        state.apply_snapshot(snapshot_in(View::PlayerDetail(40)));
        let text = rendered(&state, 40);
        assert!(text.contains("Free agent"));
        assert!(text.contains("Loading history..."));
    }

    #[test]
    fn missing_player_shows_a_placeholder() {
        let state = TuiState::default();
        assert!(rendered(&state, 77).contains("not in the latest data"));
    }
}
