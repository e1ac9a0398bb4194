// Status bar widget: tab bar, navigation availability, sync state, stale
// collections, last action outcome.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use rinkboard_core::store::Collection;
use rinkboard_core::view::{Section, View};

use crate::tui::TuiState;

/// Render the status bar into the given area.
///
/// Layout: [tab bar] [breadcrumb] [back/forward] [sync] [stale] [status] [time]
pub fn render(frame: &mut Frame, area: Rect, state: &TuiState) {
    let snapshot = &state.snapshot;
    let mut spans = tab_spans(snapshot.view.section());

    if let Some(crumb) = breadcrumb(state) {
        spans.push(Span::styled(
            format!("> {crumb} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.push(nav_span("<", snapshot.can_go_back));
    spans.push(nav_span(">", snapshot.can_go_forward));

    if snapshot.syncing {
        spans.push(Span::styled(" Syncing...", Style::default().fg(Color::Yellow)));
    }

    if !snapshot.stale.is_empty() {
        spans.push(Span::styled(
            format!(" Stale: {}", stale_label(&snapshot.stale)),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(status) = &snapshot.status {
        spans.push(Span::styled(
            format!(" | {status}"),
            Style::default().fg(Color::White),
        ));
    }

    if let Some(at) = state.last_update {
        spans.push(Span::styled(
            format!(" | {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Tab indicator spans with the active tab highlighted, e.g.
/// "[1:Overview] [2:Standings] [3:Players] [4:Salaries] [5:Settings]".
pub fn tab_spans(active: Section) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for (i, section) in Section::ALL.iter().enumerate() {
        let style = if *section == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, section.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Name of the open team or player, if a detail view is showing.
fn breadcrumb(state: &TuiState) -> Option<String> {
    let store = &state.snapshot.store;
    match state.view() {
        View::Section(_) => None,
        View::TeamDetail(id) => Some(
            store
                .team(id)
                .map_or_else(|| format!("Team {id}"), |t| t.name.clone()),
        ),
        View::PlayerDetail(id) => Some(
            store
                .player_for_detail(id)
                .map_or_else(|| format!("Player {id}"), |p| p.full_name.clone()),
        ),
    }
}

fn nav_span(arrow: &'static str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(arrow, style)
}

pub fn stale_label(stale: &[Collection]) -> String {
    stale
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::fixtures::snapshot_in;

    fn rendered(state: &TuiState) -> String {
        let backend = ratatui::backend::TestBackend::new(160, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
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
    fn tab_spans_highlight_the_active_tab() {
        let spans = tab_spans(Section::Salaries);
        let active: Vec<_> = spans
            .iter()
            .filter(|s| s.style.bg == Some(Color::White))
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].content, "[4:Salaries]");
    }

    #[test]
    fn shows_the_open_team() {
        let mut state = TuiState::default();
        state.apply_snapshot(snapshot_in(View::TeamDetail(4)));
        assert!(rendered(&state).contains("> Puck Bunnies"));
    }

    #[test]
    fn shows_sync_stale_and_status() {
        let mut state = TuiState::default();
        let mut snapshot = snapshot_in(View::Section(Section::Dashboard));
        snapshot.syncing = true;
        snapshot.stale = vec![Collection::Teams, Collection::History];
        snapshot.status = Some("Sync completed".into());
        state.apply_snapshot(snapshot);

        let text = rendered(&state);
        assert!(text.contains("Syncing..."));
        assert!(text.contains(&format!(
            "Stale: {}, {}",
            Collection::Teams.name(),
            Collection::History.name()
        )));
        assert!(text.contains("Sync completed"));
    }

    #[test]
    fn renders_with_defaults() {
        let text = rendered(&TuiState::default());
        assert!(text.contains("[1:Overview]"));
    }
}
