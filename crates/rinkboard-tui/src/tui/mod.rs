// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI keeps the latest `AppSnapshot` from the app orchestrator plus the
// state that only matters on screen: the row cursor, the open text prompt,
// pending notifications, and unsaved settings edits. Snapshots arrive over
// an mpsc channel; the frame is redrawn at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use rinkboard_core::metrics::{
    cap_table, compare_free_agents, day_standings, default_history_day, roster_by_points,
    sort_by_config,
};
use rinkboard_core::model::{PlayerId, Settings, TeamId};
use rinkboard_core::view::{Section, View};

use crate::protocol::{AppSnapshot, Notification, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// What a text prompt is collecting.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptKind {
    SyncInterval,
    SalaryCap,
    UploadPath,
    /// `Name, POS, TEAM` for a new player record.
    CreatePlayer,
    CapHit {
        player_id: PlayerId,
    },
    /// Second step of a salary edit; the cap hit is already parsed.
    ContractYears {
        player_id: PlayerId,
        salary_value: f64,
    },
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::SyncInterval => "Sync interval (minutes)",
            PromptKind::SalaryCap => "Salary cap (millions)",
            PromptKind::UploadPath => "Salary CSV path",
            PromptKind::CreatePlayer => "New player: Name, POS, TEAM",
            PromptKind::CapHit { .. } => "Cap hit (dollars)",
            PromptKind::ContractYears { .. } => "Contract through (blank for none)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
    /// Validation message from the last submit attempt.
    pub error: Option<String>,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Prompt {
            kind,
            input: String::new(),
            error: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Selectable rows
// ---------------------------------------------------------------------------

/// Where Enter on a table row leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Team(TeamId),
    Player(PlayerId),
}

/// The snapshot day the standings view shows.
pub fn standings_day(snapshot: &AppSnapshot) -> Option<&str> {
    snapshot
        .view
        .selected_day()
        .or_else(|| default_history_day(&snapshot.store.history))
}

/// Row targets for the current view, aligned with the rows its widget
/// draws. A `None` row is displayed but cannot be opened.
pub fn row_targets(snapshot: &AppSnapshot) -> Vec<Option<RowTarget>> {
    let store = &snapshot.store;
    match snapshot.view.view() {
        View::Section(Section::Dashboard) => store
            .teams
            .iter()
            .map(|t| Some(RowTarget::Team(t.id)))
            .collect(),
        View::Section(Section::Standings) => match standings_day(snapshot) {
            Some(day) => day_standings(&store.history, day)
                .iter()
                .map(|row| {
                    store
                        .teams
                        .iter()
                        .find(|t| t.name == row.team)
                        .map(|t| RowTarget::Team(t.id))
                })
                .collect(),
            None => Vec::new(),
        },
        View::Section(Section::FreeAgents) => {
            sort_by_config(&store.free_agents, snapshot.view.sort())
                .iter()
                .map(|p| Some(RowTarget::Player(p.id)))
                .collect()
        }
        View::Section(Section::Salaries) => cap_table(&store.teams, store.settings.salary_cap)
            .iter()
            .map(|row| Some(RowTarget::Team(row.team_id)))
            .collect(),
        View::Section(Section::Settings) => Vec::new(),
        View::TeamDetail(team_id) => store
            .team(team_id)
            .map(|team| {
                roster_by_points(team)
                    .iter()
                    .map(|p| Some(RowTarget::Player(p.id)))
                    .collect()
            })
            .unwrap_or_default(),
        View::PlayerDetail(player_id) => match store.player_for_detail(player_id) {
            Some(player) => compare_free_agents(player, &store.free_agents)
                .iter()
                .map(|c| Some(RowTarget::Player(c.candidate.id)))
                .collect(),
            None => Vec::new(),
        },
    }
}

// ---------------------------------------------------------------------------
// TuiState
// ---------------------------------------------------------------------------

/// Everything the renderer and the key handler read.
#[derive(Debug, Default)]
pub struct TuiState {
    pub snapshot: AppSnapshot,
    /// Highlighted row in the main table.
    pub cursor: usize,
    pub prompt: Option<Prompt>,
    /// Modal messages, oldest first. The front one blocks input.
    pub notifications: VecDeque<Notification>,
    pub confirm_quit: bool,
    /// Unsaved edits on the Settings tab.
    pub settings_draft: Option<Settings>,
    /// When the last snapshot arrived.
    pub last_update: Option<DateTime<Local>>,
}

impl TuiState {
    pub fn view(&self) -> View {
        self.snapshot.view.view()
    }

    /// Settings as shown on screen: the draft if there is one.
    pub fn settings(&self) -> &Settings {
        self.settings_draft
            .as_ref()
            .unwrap_or(&self.snapshot.store.settings)
    }

    pub fn settings_draft_mut(&mut self) -> &mut Settings {
        let saved = &self.snapshot.store.settings;
        self.settings_draft.get_or_insert_with(|| saved.clone())
    }

    pub fn selected_target(&self) -> Option<RowTarget> {
        row_targets(&self.snapshot)
            .get(self.cursor)
            .copied()
            .flatten()
    }

    /// Replace the snapshot, keeping the cursor when the view is unchanged.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        let previous = self.view();
        self.snapshot = snapshot;
        if self.view() != previous {
            self.cursor = 0;
        }
        if self.snapshot.view.section() != Section::Settings
            || self.settings_draft.as_ref() == Some(&self.snapshot.store.settings)
        {
            self.settings_draft = None;
        }

        let rows = row_targets(&self.snapshot).len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
        self.last_update = Some(Local::now());
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the TuiState.
fn apply_ui_update(state: &mut TuiState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::Notify(notification) => state.notifications.push_back(notification),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame, overlays last.
fn render_frame(frame: &mut Frame, state: &TuiState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    render_main_panel(frame, &layout, state);
    render_help_bar(frame, &layout, state);

    if let Some(prompt) = &state.prompt {
        widgets::prompt::render(frame, frame.area(), prompt);
    }
    if let Some(notification) = state.notifications.front() {
        widgets::notification::render(frame, frame.area(), notification);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_main_panel(frame: &mut Frame, layout: &AppLayout, state: &TuiState) {
    let area = layout.main_panel;
    match state.view() {
        View::Section(Section::Dashboard) => widgets::dashboard::render(frame, area, state),
        View::Section(Section::Standings) => widgets::standings::render(frame, area, state),
        View::Section(Section::FreeAgents) => widgets::free_agents::render(frame, area, state),
        View::Section(Section::Salaries) => widgets::salaries::render(frame, area, state),
        View::Section(Section::Settings) => widgets::settings::render(frame, area, state),
        View::TeamDetail(team_id) => widgets::team_detail::render(frame, area, state, team_id),
        View::PlayerDetail(player_id) => {
            widgets::player_detail::render(frame, area, state, player_id)
        }
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &TuiState) {
    let text = help_text(state.view());
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

/// Key hints for the help bar.
pub fn help_text(view: View) -> &'static str {
    match view {
        View::Section(Section::Dashboard) => {
            " q:Quit | 1-5:Tabs | j/k:Move | Enter:Team | b/f:Back/Fwd | r:Refresh | S:Sync"
        }
        View::Section(Section::Standings) => {
            " q:Quit | 1-5:Tabs | [/]:Day | Enter:Team | b/f:Back/Fwd | r:Refresh | S:Sync"
        }
        View::Section(Section::FreeAgents) => {
            " q:Quit | 1-5:Tabs | o:Sort column | O:Reverse | n:New player | Enter:Player"
        }
        View::Section(Section::Salaries) => {
            " q:Quit | 1-5:Tabs | Enter:Team | u:Upload CSV | r:Refresh | S:Sync"
        }
        View::Section(Section::Settings) => {
            " q:Quit | 1-5:Tabs | i:Interval | y:Salary sync | c:Cap | s:Save | Esc:Discard"
        }
        View::TeamDetail(_) => " q:Quit | Esc:Close | s:Next stat | Enter:Player | b/f:Back/Fwd",
        View::PlayerDetail(_) => {
            " q:Quit | Esc:Close | s:Next stat | e:Edit salary | Enter:Compare | b/f:Back/Fwd"
        }
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over UI updates, keyboard input, and the render tick until the
/// user quits or the app goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut state = TuiState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(update) => apply_ui_update(&mut state, update),
                    // App task is gone.
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut state) {
                            let quit = cmd == UserCommand::Quit;
                            if cmd_tx.send(cmd).await.is_err() || quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        break Err(anyhow::Error::new(e).context("terminal input error"));
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Severity;
    use fixtures::{loaded_snapshot, snapshot_in};
    use rinkboard_core::model::SalarySyncFrequency;

    fn draw(state: &TuiState) -> ratatui::buffer::Buffer {
        let backend = ratatui::backend::TestBackend::new(120, 36);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, state)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn default_state_is_empty() {
        let state = TuiState::default();
        assert_eq!(state.view(), View::Section(Section::Dashboard));
        assert_eq!(state.cursor, 0);
        assert!(state.prompt.is_none());
        assert!(state.notifications.is_empty());
        assert!(!state.confirm_quit);
        assert!(state.last_update.is_none());
    }

    #[test]
    fn snapshot_for_the_same_view_keeps_the_cursor() {
        let mut state = TuiState::default();
        state.apply_snapshot(loaded_snapshot());
        state.cursor = 1;
        state.apply_snapshot(loaded_snapshot());
        assert_eq!(state.cursor, 1);
        assert!(state.last_update.is_some());
    }

    #[test]
    fn view_change_resets_the_cursor() {
        let mut state = TuiState::default();
        state.apply_snapshot(loaded_snapshot());
        state.cursor = 1;
        state.apply_snapshot(snapshot_in(View::TeamDetail(3)));
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn cursor_is_clamped_to_the_row_count() {
        let mut state = TuiState::default();
        state.apply_snapshot(loaded_snapshot());
        state.cursor = 7;
        let mut shorter = loaded_snapshot();
        shorter.store.teams.truncate(1);
        state.apply_snapshot(shorter);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn settings_draft_survives_until_the_saved_values_arrive() {
        let mut state = TuiState::default();
        state.apply_snapshot(snapshot_in(View::Section(Section::Settings)));
        state.settings_draft_mut().salary_sync_frequency = SalarySyncFrequency::Weekly;

        state.apply_snapshot(snapshot_in(View::Section(Section::Settings)));
        assert!(state.settings_draft.is_some());

        let mut saved = snapshot_in(View::Section(Section::Settings));
        saved.store.settings.salary_sync_frequency = SalarySyncFrequency::Weekly;
        state.apply_snapshot(saved);
        assert!(state.settings_draft.is_none());
    }

    #[test]
    fn leaving_settings_discards_the_draft() {
        let mut state = TuiState::default();
        state.apply_snapshot(snapshot_in(View::Section(Section::Settings)));
        state.settings_draft_mut().salary_cap = 90.0;
        state.apply_snapshot(loaded_snapshot());
        assert!(state.settings_draft.is_none());
        assert_eq!(state.settings().salary_cap, 72.0);
    }

    #[test]
    fn notifications_queue_in_arrival_order() {
        let mut state = TuiState::default();
        apply_ui_update(&mut state, UiUpdate::Notify(Notification::error("First", "a")));
        apply_ui_update(&mut state, UiUpdate::Notify(Notification::info("Second", "b")));
        assert_eq!(state.notifications.len(), 2);
        assert_eq!(state.notifications[0].severity, Severity::Error);
    }

    #[test]
    fn standings_rows_resolve_team_names() {
        let snapshot = snapshot_in(View::Section(Section::Standings));
        let rows = row_targets(&snapshot);
        assert_eq!(rows, vec![Some(RowTarget::Team(3)), Some(RowTarget::Team(4))]);
    }

    #[test]
    fn standings_rows_for_unknown_teams_are_not_openable() {
        let mut snapshot = snapshot_in(View::Section(Section::Standings));
        snapshot.store.teams.retain(|t| t.id != 4);
        let rows = row_targets(&snapshot);
        assert_eq!(rows, vec![Some(RowTarget::Team(3)), None]);
    }

    #[test]
    fn free_agent_rows_follow_the_sort() {
        let snapshot = snapshot_in(View::Section(Section::FreeAgents));
        assert_eq!(
            row_targets(&snapshot),
            vec![Some(RowTarget::Player(40)), Some(RowTarget::Player(41))]
        );
    }

    #[test]
    fn team_detail_rows_are_the_roster_by_points() {
        let snapshot = snapshot_in(View::TeamDetail(3));
        assert_eq!(
            row_targets(&snapshot),
            vec![Some(RowTarget::Player(9)), Some(RowTarget::Player(10))]
        );
    }

    #[test]
    fn player_detail_rows_are_same_position_free_agents() {
        let snapshot = snapshot_in(View::PlayerDetail(9));
        assert_eq!(row_targets(&snapshot), vec![Some(RowTarget::Player(40))]);
    }

    #[test]
    fn every_view_renders() {
        let views = [
            View::Section(Section::Dashboard),
            View::Section(Section::Standings),
            View::Section(Section::FreeAgents),
            View::Section(Section::Salaries),
            View::Section(Section::Settings),
            View::TeamDetail(3),
            View::PlayerDetail(9),
        ];
        for view in views {
            let mut state = TuiState::default();
            state.apply_snapshot(snapshot_in(view));
            let text = buffer_text(&draw(&state));
            assert!(text.contains("q:Quit"), "help bar missing for {view:?}");
        }
    }

    #[test]
    fn overlays_render_on_top() {
        let mut state = TuiState::default();
        state.apply_snapshot(loaded_snapshot());
        state.notifications.push_back(Notification::error("Save settings failed", "Nope"));
        state.confirm_quit = true;
        let text = buffer_text(&draw(&state));
        assert!(text.contains("Really quit?"));
    }

    #[test]
    fn empty_state_renders() {
        let text = buffer_text(&draw(&TuiState::default()));
        assert!(text.contains("Overview"));
    }
}
