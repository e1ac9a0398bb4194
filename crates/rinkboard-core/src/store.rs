// DataStore: the latest fetched snapshot of every remote collection.
//
// Collections are replaced wholesale, never merged. Lookups resolve ids to
// borrowed entities; nothing here talks to the network.

use tracing::{debug, warn};

use crate::model::{
    HistorySnapshot, Player, PlayerId, SalaryRecord, ScoringRules, Settings, Stat, Team, TeamId,
};

/// The remote collections refreshed by a full load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Teams,
    FreeAgents,
    ScoringRules,
    History,
    Settings,
    Salaries,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Teams,
        Collection::FreeAgents,
        Collection::ScoringRules,
        Collection::History,
        Collection::Settings,
        Collection::Salaries,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Teams => "teams",
            Collection::FreeAgents => "free agents",
            Collection::ScoringRules => "scoring rules",
            Collection::History => "team history",
            Collection::Settings => "settings",
            Collection::Salaries => "salaries",
        }
    }
}

/// Per-player history for one team and one stat, as fetched for the team
/// detail chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamPlayerHistory {
    pub team_id: TeamId,
    pub stat: Stat,
    pub snapshots: Vec<HistorySnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerHistory {
    pub player_id: PlayerId,
    pub snapshots: Vec<HistorySnapshot>,
}

/// A resolved player plus the team whose roster holds it (if any).
#[derive(Debug, Clone, Copy)]
pub struct PlayerLookup<'a> {
    pub player: &'a Player,
    pub team: Option<&'a Team>,
}

#[derive(Debug, Clone, Default)]
pub struct DataStore {
    /// Teams in server order (rank ascending).
    pub teams: Vec<Team>,
    pub free_agents: Vec<Player>,
    pub scoring_rules: ScoringRules,
    /// Team point history, day ascending.
    pub history: Vec<HistorySnapshot>,
    pub settings: Settings,
    pub salaries: Vec<SalaryRecord>,
    pub team_player_history: Option<TeamPlayerHistory>,
    pub player_history: Option<PlayerHistory>,
    /// Freshest full record for the player detail view.
    pub player_detail: Option<Player>,
    teams_loaded: bool,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one team fetch has succeeded.
    pub fn teams_loaded(&self) -> bool {
        self.teams_loaded
    }

    pub fn replace_teams(&mut self, teams: Vec<Team>) {
        debug!("Replacing {} teams", teams.len());
        self.teams = teams;
        self.teams_loaded = true;
    }

    /// Record a failed team fetch. Before the first successful load the
    /// collection falls back to a small placeholder set so views have
    /// something to render; afterwards the last-known teams are kept.
    pub fn teams_fetch_failed(&mut self) {
        if !self.teams_loaded && self.teams.is_empty() {
            warn!("Team fetch failed before first load; using placeholder teams");
            self.teams = placeholder_teams();
        }
    }

    pub fn replace_free_agents(&mut self, players: Vec<Player>) {
        self.free_agents = players;
    }

    pub fn replace_scoring_rules(&mut self, rules: ScoringRules) {
        self.scoring_rules = rules;
    }

    pub fn replace_history(&mut self, history: Vec<HistorySnapshot>) {
        self.history = history;
    }

    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn replace_salaries(&mut self, salaries: Vec<SalaryRecord>) {
        self.salaries = salaries;
    }

    // --- lookups ---

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Resolve a player id: team rosters first (in team order), then free
    /// agents.
    pub fn find_player(&self, id: PlayerId) -> Option<PlayerLookup<'_>> {
        for team in &self.teams {
            if let Some(player) = team.roster_player(id) {
                return Some(PlayerLookup {
                    player,
                    team: Some(team),
                });
            }
        }
        self.free_agents
            .iter()
            .find(|p| p.id == id)
            .map(|player| PlayerLookup { player, team: None })
    }

    /// The full-detail record for `id` if one was fetched, else whatever
    /// the collections hold.
    pub fn player_for_detail(&self, id: PlayerId) -> Option<&Player> {
        match &self.player_detail {
            Some(p) if p.id == id => Some(p),
            _ => self.find_player(id).map(|l| l.player),
        }
    }

    /// Team chart history, only if it matches the requested team and stat.
    pub fn team_player_history_for(
        &self,
        team_id: TeamId,
        stat: Stat,
    ) -> Option<&[HistorySnapshot]> {
        self.team_player_history
            .as_ref()
            .filter(|h| h.team_id == team_id && h.stat == stat)
            .map(|h| h.snapshots.as_slice())
    }

    pub fn player_history_for(&self, player_id: PlayerId) -> Option<&[HistorySnapshot]> {
        self.player_history
            .as_ref()
            .filter(|h| h.player_id == player_id)
            .map(|h| h.snapshots.as_slice())
    }
}

/// Stand-in teams shown when the very first load fails.
pub fn placeholder_teams() -> Vec<Team> {
    vec![
        Team::placeholder(1, "Team A", 1200.0),
        Team::placeholder(2, "Team B", 1150.0),
        Team::placeholder(3, "Team C", 1000.0),
    ]
}
