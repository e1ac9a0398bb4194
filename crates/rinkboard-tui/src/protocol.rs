// Messages exchanged between the app task and the TUI task.
//
// The TUI sends `UserCommand`s; the app answers with `UiUpdate`s carrying a
// full `AppSnapshot` to render from.

use std::path::PathBuf;

use rinkboard_core::model::{NewPlayer, PlayerId, SalaryUpdate, Settings};
use rinkboard_core::navigation::NavAction;
use rinkboard_core::store::{Collection, DataStore};
use rinkboard_core::view::ViewState;

/// Commands from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    Nav(NavAction),
    /// Reload every collection now.
    Refresh,
    /// Ask the server to sync, then reload.
    Sync,
    SaveSettings(Settings),
    UpdateSalary {
        player_id: PlayerId,
        update: SalaryUpdate,
    },
    CreatePlayer(NewPlayer),
    /// Preview a local salary CSV and upload it if it parses.
    UploadSalaryFile(PathBuf),
    Quit,
}

/// Everything the TUI needs to draw a frame.
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    pub store: DataStore,
    pub view: ViewState,
    pub syncing: bool,
    /// Collections whose last fetch failed.
    pub stale: Vec<Collection>,
    /// One-line outcome of the last background action.
    pub status: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A modal message the user has to dismiss.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            severity: Severity::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            severity: Severity::Info,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Updates from the app orchestrator to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Snapshot(Box<AppSnapshot>),
    Notify(Notification),
}
