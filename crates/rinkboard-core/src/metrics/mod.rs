// Derived metrics: pure functions over DataStore contents.
//
// Nothing in here mutates shared state or performs I/O; identical inputs
// always produce identical outputs.

pub mod compare;
pub mod deltas;
pub mod salary;
pub mod sort;
pub mod standings;

pub use compare::{compare_free_agents, FreeAgentComparison};
pub use deltas::{daily_deltas, find_decreases, DeltaAnomaly};
pub use salary::{cap_space, cap_table, format_millions, parse_cap_hit, CapSpace, TeamCap};
pub use sort::{sort_by_config, SortConfig, SortDirection, SortValue, Sortable};
pub use standings::{
    day_standings, default_history_day, format_day, league_summary, roster_by_points, DayStanding,
    LeagueSummary,
};

/// Round to two decimals for display-stable comparisons.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
