// History bridge: mirrors navigation into a back/forward history stack and
// replays history traversal into ViewState.
//
// The host stack only stores opaque JSON states, the way a browser's history
// API does. `MemoryHistory` is the in-process host used by the TUI and tests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{PlayerId, TeamId};
use crate::store::DataStore;
use crate::view::{Section, ViewState};

// ---------------------------------------------------------------------------
// Persisted entry
// ---------------------------------------------------------------------------

/// The navigation fields persisted per history entry. View-local state
/// (stat, sort, day) is deliberately absent and resets on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavEntry {
    pub section: Section,
    pub selected_team_id: Option<TeamId>,
    pub selected_player_id: Option<PlayerId>,
}

impl NavEntry {
    pub fn from_view(view: &ViewState) -> Self {
        NavEntry {
            section: view.section(),
            selected_team_id: view.selected_team_id(),
            selected_player_id: view.selected_player_id(),
        }
    }

    pub fn encode(&self) -> Value {
        match serde_json::to_value(self) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to encode navigation entry: {}", e);
                Value::Null
            }
        }
    }

    /// `None` for absent, null, or malformed states.
    pub fn decode(state: Option<&Value>) -> Option<NavEntry> {
        let state = state?;
        match serde_json::from_value(state.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                if !state.is_null() {
                    debug!("Ignoring unreadable history state {}: {}", state, e);
                }
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Host abstraction
// ---------------------------------------------------------------------------

/// Notification that traversal landed on an entry, carrying its state.
#[derive(Debug, Clone, PartialEq)]
pub struct PopEvent {
    pub state: Option<Value>,
}

/// A navigable history stack.
pub trait HistoryHost {
    /// Append an entry after the current one, discarding any forward entries.
    fn push(&mut self, state: Value);
    /// Overwrite the current entry's state.
    fn replace(&mut self, state: Value);
    /// State of the current entry.
    fn current(&self) -> Option<&Value>;
    /// Step back one entry; `None` at the oldest entry.
    fn back(&mut self) -> Option<PopEvent>;
    /// Step forward one entry; `None` at the newest entry.
    fn forward(&mut self) -> Option<PopEvent>;
}

/// Entries kept by [`MemoryHistory`]; the oldest are dropped past this.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// In-memory history with browser semantics. Starts with a single entry
/// that has no state, like a freshly opened page.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Option<Value>>,
    cursor: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        MemoryHistory {
            entries: vec![None],
            cursor: 0,
        }
    }
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

impl HistoryHost for MemoryHistory {
    fn push(&mut self, state: Value) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Some(state));
        if self.entries.len() > MAX_HISTORY_ENTRIES {
            let excess = self.entries.len() - MAX_HISTORY_ENTRIES;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    fn replace(&mut self, state: Value) {
        self.entries[self.cursor] = Some(state);
    }

    fn current(&self) -> Option<&Value> {
        self.entries[self.cursor].as_ref()
    }

    fn back(&mut self) -> Option<PopEvent> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(PopEvent {
            state: self.entries[self.cursor].clone(),
        })
    }

    fn forward(&mut self) -> Option<PopEvent> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(PopEvent {
            state: self.entries[self.cursor].clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Bridge
// ---------------------------------------------------------------------------

/// Keeps a [`HistoryHost`] in step with navigation.
#[derive(Debug, Clone, Default)]
pub struct HistoryBridge<H: HistoryHost> {
    host: H,
}

impl<H: HistoryHost> HistoryBridge<H> {
    pub fn new(host: H) -> Self {
        HistoryBridge { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Stamp the current entry with the default state so the first back
    /// navigation has somewhere defined to land. Call once at startup.
    pub fn establish_baseline(&mut self) -> ViewState {
        let baseline = ViewState::default();
        self.host.replace(NavEntry::from_view(&baseline).encode());
        baseline
    }

    /// Record a navigation transition that produced `view`.
    pub fn record(&mut self, view: &ViewState) {
        let entry = NavEntry::from_view(view);
        debug!(
            "History push: section={:?} team={:?} player={:?}",
            entry.section, entry.selected_team_id, entry.selected_player_id
        );
        self.host.push(entry.encode());
    }

    /// Traverse back; `None` when already at the oldest entry.
    pub fn back(&mut self, store: &DataStore) -> Option<ViewState> {
        let event = self.host.back()?;
        Some(self.on_pop(&event, store))
    }

    /// Traverse forward; `None` when already at the newest entry.
    pub fn forward(&mut self, store: &DataStore) -> Option<ViewState> {
        let event = self.host.forward()?;
        Some(self.on_pop(&event, store))
    }

    /// Turn a pop notification into a fresh ViewState.
    pub fn on_pop(&self, event: &PopEvent, store: &DataStore) -> ViewState {
        restore(event.state.as_ref(), store)
    }
}

/// Rebuild a ViewState from a persisted entry.
///
/// Absent or unreadable states fall back to the baseline default. Selected
/// ids are checked against the store; ids that no longer resolve are
/// cleared instead of left dangling.
pub fn restore(state: Option<&Value>, store: &DataStore) -> ViewState {
    let Some(entry) = NavEntry::decode(state) else {
        return ViewState::default();
    };

    let team = entry.selected_team_id.filter(|id| {
        let found = store.team(*id).is_some();
        if !found {
            debug!("Restored team {} not in store, clearing selection", id);
        }
        found
    });
    let player = entry.selected_player_id.filter(|id| {
        let found = store.find_player(*id).is_some();
        if !found {
            debug!("Restored player {} not in store, clearing selection", id);
        }
        found
    });

    ViewState::restored(entry.section, team, player)
}
