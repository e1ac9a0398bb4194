// ViewState: which view the user is looking at, plus view-local UI state.
//
// Fields are private; the only way to change them is through the named
// transitions below, which keep team and player selection mutually
// exclusive.

use serde::{Deserialize, Serialize};

use crate::metrics::SortConfig;
use crate::model::{PlayerId, Stat, TeamId};

/// Top-level navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Dashboard,
    Standings,
    FreeAgents,
    Salaries,
    Settings,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Standings,
        Section::FreeAgents,
        Section::Salaries,
        Section::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Overview",
            Section::Standings => "Standings",
            Section::FreeAgents => "Players",
            Section::Salaries => "Salaries",
            Section::Settings => "Settings",
        }
    }
}

/// The logical view currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Section(Section),
    TeamDetail(TeamId),
    PlayerDetail(PlayerId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    section: Section,
    selected_team_id: Option<TeamId>,
    selected_player_id: Option<PlayerId>,
    selected_stat: Stat,
    sort: SortConfig,
    selected_day: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            section: Section::Dashboard,
            selected_team_id: None,
            selected_player_id: None,
            selected_stat: Stat::TotalPoints,
            sort: SortConfig::default(),
            selected_day: None,
        }
    }
}

impl ViewState {
    /// Rebuild navigation fields with view-local state at its defaults.
    /// If both ids are given the player wins.
    pub fn restored(section: Section, team: Option<TeamId>, player: Option<PlayerId>) -> Self {
        ViewState {
            section,
            selected_team_id: if player.is_some() { None } else { team },
            selected_player_id: player,
            ..ViewState::default()
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn selected_team_id(&self) -> Option<TeamId> {
        self.selected_team_id
    }

    pub fn selected_player_id(&self) -> Option<PlayerId> {
        self.selected_player_id
    }

    pub fn selected_stat(&self) -> Stat {
        self.selected_stat
    }

    pub fn sort(&self) -> &SortConfig {
        &self.sort
    }

    pub fn selected_day(&self) -> Option<&str> {
        self.selected_day.as_deref()
    }

    pub fn view(&self) -> View {
        match (self.selected_player_id, self.selected_team_id) {
            (Some(player), _) => View::PlayerDetail(player),
            (None, Some(team)) => View::TeamDetail(team),
            (None, None) => View::Section(self.section),
        }
    }

    // --- navigation transitions (recorded in history by the Navigator) ---

    pub fn select_tab(&mut self, tab: Section) {
        self.section = tab;
        self.selected_team_id = None;
        self.selected_player_id = None;
    }

    pub fn select_team(&mut self, team_id: TeamId) {
        self.selected_team_id = Some(team_id);
        self.selected_player_id = None;
    }

    pub fn select_player(&mut self, player_id: PlayerId) {
        self.selected_player_id = Some(player_id);
        self.selected_team_id = None;
    }

    // --- view-local transitions (not recorded) ---

    pub fn select_stat(&mut self, stat: Stat) {
        self.selected_stat = stat;
    }

    pub fn request_sort(&mut self, key: &str) {
        self.sort = self.sort.request(key);
    }

    pub fn select_day(&mut self, day: impl Into<String>) {
        self.selected_day = Some(day.into());
    }
}
