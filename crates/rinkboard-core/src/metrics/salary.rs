// Salary-cap math.

use crate::metrics::round2;
use crate::model::{Player, Team, TeamId};

const DOLLARS_PER_MILLION: f64 = 1_000_000.0;

/// A team's cap position, all figures in millions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapSpace {
    /// Sum of roster cap hits.
    pub committed: f64,
    /// `cap - committed`, rounded to two decimals.
    pub space: f64,
    /// The team is over the cap. A display severity, not an error.
    pub over_cap: bool,
}

/// Remaining cap space for a roster. Players without a salary value count
/// as zero.
pub fn cap_space(cap: f64, roster: &[Player]) -> CapSpace {
    let committed_dollars: f64 = roster.iter().filter_map(|p| p.salary_value).sum();
    let committed = committed_dollars / DOLLARS_PER_MILLION;
    let space = round2(cap - committed);
    CapSpace {
        committed: round2(committed),
        space,
        over_cap: space < 0.0,
    }
}

/// One row of the league cap table.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCap {
    pub team_id: TeamId,
    pub name: String,
    pub cap: CapSpace,
}

/// Cap position for every team, in input order.
pub fn cap_table(teams: &[Team], cap: f64) -> Vec<TeamCap> {
    teams
        .iter()
        .map(|t| TeamCap {
            team_id: t.id,
            name: t.name.clone(),
            cap: cap_space(cap, &t.players),
        })
        .collect()
}

/// Parse a displayed cap hit like `"$9,500,000"` into dollars.
pub fn parse_cap_hit(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Format a figure already in millions, e.g. `6.5` -> `"$6.50M"`.
pub fn format_millions(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}M", value.abs())
    } else {
        format!("${value:.2}M")
    }
}
