// Navigator: the single owner of ViewState.
//
// User intent arrives as `NavAction` messages. Navigation transitions are
// applied to ViewState and then mirrored into history; back/forward replay a
// history entry into a fresh ViewState.

use tracing::debug;

use crate::history::{HistoryBridge, HistoryHost, MemoryHistory};
use crate::model::{PlayerId, Stat, TeamId};
use crate::store::DataStore;
use crate::view::{Section, View, ViewState};

/// Everything a user can do to change what is on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    SelectTab(Section),
    SelectTeam(TeamId),
    SelectPlayer(PlayerId),
    /// Leave the current detail view by stepping back through history.
    CloseDetail,
    Back,
    Forward,
    SelectStat(Stat),
    RequestSort(String),
    SelectDay(String),
}

impl NavAction {
    /// Whether this action pushes a history entry.
    pub fn is_recorded(&self) -> bool {
        matches!(
            self,
            NavAction::SelectTab(_) | NavAction::SelectTeam(_) | NavAction::SelectPlayer(_)
        )
    }
}

#[derive(Debug)]
pub struct Navigator<H: HistoryHost = MemoryHistory> {
    view: ViewState,
    bridge: HistoryBridge<H>,
}

impl Navigator<MemoryHistory> {
    pub fn in_memory() -> Self {
        Navigator::new(MemoryHistory::new())
    }
}

impl<H: HistoryHost> Navigator<H> {
    /// Take ownership of `host` and stamp the baseline entry into it.
    pub fn new(host: H) -> Self {
        let mut bridge = HistoryBridge::new(host);
        let view = bridge.establish_baseline();
        Navigator { view, bridge }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn history(&self) -> &H {
        self.bridge.host()
    }

    /// Apply one action. Returns `false` when the action had nothing to do
    /// (back at the oldest entry, forward at the newest, close with no
    /// detail open).
    pub fn dispatch(&mut self, action: NavAction, store: &DataStore) -> bool {
        debug!("Nav action: {:?}", action);
        let recorded = action.is_recorded();
        let changed = self.apply(action, store);
        if recorded && changed {
            self.bridge.record(&self.view);
        }
        changed
    }

    fn apply(&mut self, action: NavAction, store: &DataStore) -> bool {
        match action {
            NavAction::SelectTab(tab) => {
                self.view.select_tab(tab);
                true
            }
            NavAction::SelectTeam(id) => {
                self.view.select_team(id);
                true
            }
            NavAction::SelectPlayer(id) => {
                self.view.select_player(id);
                true
            }
            NavAction::CloseDetail => {
                if matches!(self.view.view(), View::Section(_)) {
                    return false;
                }
                if self.traverse_back(store) {
                    return true;
                }
                // Detail view with nothing behind it: fall back to its section.
                let section = self.view.section();
                self.view.select_tab(section);
                self.bridge.record(&self.view);
                true
            }
            NavAction::Back => self.traverse_back(store),
            NavAction::Forward => match self.bridge.forward(store) {
                Some(view) => {
                    self.view = view;
                    true
                }
                None => false,
            },
            NavAction::SelectStat(stat) => {
                self.view.select_stat(stat);
                true
            }
            NavAction::RequestSort(key) => {
                self.view.request_sort(&key);
                true
            }
            NavAction::SelectDay(day) => {
                self.view.select_day(day);
                true
            }
        }
    }

    fn traverse_back(&mut self, store: &DataStore) -> bool {
        match self.bridge.back(store) {
            Some(view) => {
                self.view = view;
                true
            }
            None => false,
        }
    }
}
