// Table sorting: the click-to-sort cycle and a stable multi-type comparator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{Player, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Active sort column and direction for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            key: "total_points".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        SortConfig {
            key: key.into(),
            direction,
        }
    }

    /// The configuration after the user asks to sort by `key`.
    ///
    /// A new key starts descending; repeating the active key flips between
    /// descending and ascending.
    pub fn request(&self, key: &str) -> SortConfig {
        let direction = if self.key == key && self.direction == SortDirection::Desc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        SortConfig::new(key, direction)
    }
}

/// A sortable cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    /// Numbers order numerically and before any text; text orders
    /// lexicographically. NaN compares equal to everything.
    pub fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Row types that expose named columns for sorting.
pub trait Sortable {
    /// The value of column `key`, or `None` when the row has no value for it.
    fn sort_value(&self, key: &str) -> Option<SortValue>;
}

/// Return `items` ordered by `config`, leaving the input untouched.
///
/// Missing values sort as numeric zero. The sort is stable in both
/// directions: rows with equal keys keep their input order.
pub fn sort_by_config<'a, T: Sortable>(items: &'a [T], config: &SortConfig) -> Vec<&'a T> {
    let mut rows: Vec<&T> = items.iter().collect();
    rows.sort_by(|a, b| {
        let a = a.sort_value(&config.key).unwrap_or(SortValue::Number(0.0));
        let b = b.sort_value(&config.key).unwrap_or(SortValue::Number(0.0));
        match config.direction {
            SortDirection::Asc => a.compare(&b),
            SortDirection::Desc => b.compare(&a),
        }
    });
    rows
}

impl Sortable for Player {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        let number = |v: f64| Some(SortValue::Number(v));
        match key {
            "fullName" | "full_name" => Some(SortValue::Text(self.full_name.clone())),
            "proTeam" | "pro_team" => Some(SortValue::Text(self.pro_team.clone())),
            "position" => Some(SortValue::Text(self.position.clone())),
            "contract_years" => self.contract_years.clone().map(SortValue::Text),
            "salary_value" => self.salary_value.map(SortValue::Number),
            "ownership" => number(self.ownership),
            "avg_points" => number(self.avg_points),
            "total_points" => number(self.total_points),
            "goals" => number(self.goals),
            "assists" => number(self.assists),
            "ppp" => number(self.ppp),
            "shp" => number(self.shp),
            "sog" => number(self.sog),
            "hits" => number(self.hits),
            "blocks" => number(self.blocks),
            "plus_minus" => number(self.plus_minus),
            _ => None,
        }
    }
}

impl Sortable for Team {
    fn sort_value(&self, key: &str) -> Option<SortValue> {
        let number = |v: f64| Some(SortValue::Number(v));
        match key {
            "name" => Some(SortValue::Text(self.name.clone())),
            "rank" => number(f64::from(self.rank)),
            "wins" => number(f64::from(self.wins)),
            "points" | "total_points" => number(self.points),
            "goals" => number(self.goals),
            "assists" => number(self.assists),
            "ppp" => number(self.ppp),
            "shp" => number(self.shp),
            "sog" => number(self.sog),
            "hits" => number(self.hits),
            "blocks" => number(self.blocks),
            "pim" => number(self.pim),
            _ => None,
        }
    }
}
