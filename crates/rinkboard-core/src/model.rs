// League data model: teams, players, history snapshots, settings, and the
// request/response payloads exchanged with the league API.
//
// Field names follow the API's JSON (camelCase `fullName`/`proTeam`, snake
// case elsewhere). The API serializes unset numeric columns as `null`, so
// most scalar fields go through `null_default`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

pub type TeamId = u64;
pub type PlayerId = u64;

/// Scoring weights keyed by statistic abbreviation (e.g. `"G"` -> 3.0).
pub type ScoringRules = BTreeMap<String, f64>;

/// Deserialize `null` as the type's default instead of failing.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Stat
// ---------------------------------------------------------------------------

/// A per-player statistic that can be charted or compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    TotalPoints,
    Goals,
    Assists,
    Ppp,
    Sog,
    Hits,
    Blocks,
    PlusMinus,
}

impl Stat {
    /// Chart cycling order.
    pub const ALL: [Stat; 8] = [
        Stat::TotalPoints,
        Stat::Goals,
        Stat::Assists,
        Stat::Ppp,
        Stat::Sog,
        Stat::Hits,
        Stat::Blocks,
        Stat::PlusMinus,
    ];

    /// The wire key used by the API (`?stat=` query and snapshot fields).
    pub fn key(self) -> &'static str {
        match self {
            Stat::TotalPoints => "total_points",
            Stat::Goals => "goals",
            Stat::Assists => "assists",
            Stat::Ppp => "ppp",
            Stat::Sog => "sog",
            Stat::Hits => "hits",
            Stat::Blocks => "blocks",
            Stat::PlusMinus => "plus_minus",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stat::TotalPoints => "Points",
            Stat::Goals => "Goals",
            Stat::Assists => "Assists",
            Stat::Ppp => "PPP",
            Stat::Sog => "Shots",
            Stat::Hits => "Hits",
            Stat::Blocks => "Blocks",
            Stat::PlusMinus => "+/-",
        }
    }

    pub fn from_key(key: &str) -> Option<Stat> {
        Stat::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Next stat in `ALL`, wrapping around.
    pub fn next(self) -> Stat {
        let idx = Stat::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Stat::ALL[(idx + 1) % Stat::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(rename = "fullName", default, deserialize_with = "null_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub position: String,
    #[serde(rename = "proTeam", default, deserialize_with = "null_default")]
    pub pro_team: String,
    /// Fantasy team owning the player; `None` for free agents.
    #[serde(default)]
    pub team_id: Option<TeamId>,
    /// Lineup slot from the league platform (`"BE"` is the bench).
    #[serde(default)]
    pub lineup_slot: Option<String>,
    /// Health status (`HEALTHY`, `DAY_TO_DAY`, `OUT`, ...).
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub injury_detail: Option<String>,
    /// Percent of leagues rostering the player.
    #[serde(default, deserialize_with = "null_default")]
    pub ownership: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub avg_points: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub total_points: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub goals: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub assists: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub ppp: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub shp: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub sog: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub hits: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub blocks: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub plus_minus: f64,
    /// Cap hit as displayed, e.g. `"$9,500,000"`.
    #[serde(default)]
    pub salary: Option<String>,
    /// Cap hit in dollars.
    #[serde(default)]
    pub salary_value: Option<f64>,
    /// Final contract season, e.g. `"2027"`.
    #[serde(default)]
    pub contract_years: Option<String>,
}

impl Player {
    pub fn stat(&self, stat: Stat) -> f64 {
        match stat {
            Stat::TotalPoints => self.total_points,
            Stat::Goals => self.goals,
            Stat::Assists => self.assists,
            Stat::Ppp => self.ppp,
            Stat::Sog => self.sog,
            Stat::Hits => self.hits,
            Stat::Blocks => self.blocks,
            Stat::PlusMinus => self.plus_minus,
        }
    }

    /// A missing status counts as healthy.
    pub fn is_healthy(&self) -> bool {
        match self.status.as_deref() {
            None | Some("") => true,
            Some(s) => s.eq_ignore_ascii_case("HEALTHY") || s.eq_ignore_ascii_case("ACTIVE"),
        }
    }

    pub fn is_bench(&self) -> bool {
        self.lineup_slot.as_deref() == Some("BE")
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub rank: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub wins: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub ties: u32,
    /// Aggregate fantasy points.
    #[serde(default, deserialize_with = "null_default")]
    pub points: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub goals: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub assists: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub ppp: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub shp: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub sog: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub hits: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub blocks: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub pim: f64,
    /// Roster in server order.
    #[serde(default, deserialize_with = "null_default")]
    pub players: Vec<Player>,
}

impl Team {
    /// Minimal team used when nothing has been fetched yet.
    pub fn placeholder(id: TeamId, name: &str, points: f64) -> Self {
        Team {
            id,
            name: name.to_string(),
            points,
            ..Team::default()
        }
    }

    pub fn roster_player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }
}

// ---------------------------------------------------------------------------
// History snapshots
// ---------------------------------------------------------------------------

/// Keys on raw history rows that identify the row rather than measure it.
const NON_SERIES_KEYS: &[&str] = &["id", "player_id", "team_id"];

/// One day's cumulative values, keyed by series name (team name, player
/// name, or stat key depending on the endpoint).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawSnapshot")]
pub struct HistorySnapshot {
    pub day: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl HistorySnapshot {
    pub fn new(day: impl Into<String>) -> Self {
        HistorySnapshot {
            day: day.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

/// Wire shape of a history row. Player history rows carry strings, nulls,
/// and row ids next to the numeric series; only numeric series survive.
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    day: String,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl From<RawSnapshot> for HistorySnapshot {
    fn from(raw: RawSnapshot) -> Self {
        let values = raw
            .rest
            .into_iter()
            .filter(|(key, _)| !NON_SERIES_KEYS.contains(&key.as_str()))
            .filter_map(|(key, value)| value.as_f64().map(|v| (key, v)))
            .collect();
        HistorySnapshot {
            day: raw.day,
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalarySyncFrequency {
    #[default]
    Daily,
    Weekly,
    Manual,
}

impl SalarySyncFrequency {
    pub fn next(self) -> Self {
        match self {
            SalarySyncFrequency::Daily => SalarySyncFrequency::Weekly,
            SalarySyncFrequency::Weekly => SalarySyncFrequency::Manual,
            SalarySyncFrequency::Manual => SalarySyncFrequency::Daily,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SalarySyncFrequency::Daily => "daily",
            SalarySyncFrequency::Weekly => "weekly",
            SalarySyncFrequency::Manual => "manual",
        }
    }
}

/// League-level settings stored on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Minutes between server-side data syncs.
    pub sync_interval_minutes: u32,
    #[serde(default)]
    pub salary_sync_frequency: SalarySyncFrequency,
    /// Salary cap in millions.
    pub salary_cap: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sync_interval_minutes: 5,
            salary_sync_frequency: SalarySyncFrequency::Daily,
            salary_cap: 88.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Salary records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub player_id: PlayerId,
    #[serde(rename = "fullName", default, deserialize_with = "null_default")]
    pub full_name: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub salary_value: Option<f64>,
    #[serde(default)]
    pub contract_years: Option<String>,
}

// ---------------------------------------------------------------------------
// Write payloads and acknowledgements
// ---------------------------------------------------------------------------

/// Body for creating a player record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPlayer {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub position: String,
    #[serde(rename = "proTeam")]
    pub pro_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_years: Option<String>,
}

/// Body for updating a player's salary and contract fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryUpdate {
    pub salary: Option<String>,
    pub salary_value: Option<f64>,
    pub contract_years: Option<String>,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UploadSummary {
    #[serde(default)]
    pub updated: u32,
    #[serde(default)]
    pub message: String,
}
