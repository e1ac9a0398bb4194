// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local TuiState changes (cursor, prompts, settings
// draft, dismissing notifications).

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use rinkboard_core::metrics::parse_cap_hit;
use rinkboard_core::model::{NewPlayer, SalaryUpdate};
use rinkboard_core::navigation::NavAction;
use rinkboard_core::view::{Section, View};

use super::widgets::free_agents::COLUMNS;
use super::{row_targets, standings_day, Prompt, PromptKind, RowTarget, TuiState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, state: &mut TuiState) -> Option<UserCommand> {
    // Crossterm reports Release/Repeat on some platforms; act on Press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // A notification blocks everything until dismissed.
    if !state.notifications.is_empty() {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
            state.notifications.pop_front();
        }
        return None;
    }

    if state.confirm_quit {
        return handle_confirm_quit(key_event, state);
    }

    if state.prompt.is_some() {
        return handle_prompt(key_event, state);
    }

    let view = state.view();
    match key_event.code {
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            nav(NavAction::SelectTab(Section::ALL[idx]))
        }

        KeyCode::Up | KeyCode::Char('k') => {
            state.cursor = state.cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let rows = row_targets(&state.snapshot).len();
            if state.cursor + 1 < rows {
                state.cursor += 1;
            }
            None
        }
        KeyCode::Enter => match state.selected_target()? {
            RowTarget::Team(id) => nav(NavAction::SelectTeam(id)),
            RowTarget::Player(id) => nav(NavAction::SelectPlayer(id)),
        },

        KeyCode::Esc => match view {
            View::TeamDetail(_) | View::PlayerDetail(_) => nav(NavAction::CloseDetail),
            View::Section(Section::Settings) => {
                state.settings_draft = None;
                None
            }
            View::Section(_) => None,
        },
        KeyCode::Left | KeyCode::Char('b') => nav(NavAction::Back),
        KeyCode::Right | KeyCode::Char('f') => nav(NavAction::Forward),

        KeyCode::Char('r') => Some(UserCommand::Refresh),
        KeyCode::Char('S') => Some(UserCommand::Sync),

        KeyCode::Char('q') => {
            state.confirm_quit = true;
            None
        }

        code => handle_view_key(code, view, state),
    }
}

/// Keys whose meaning depends on the current view.
fn handle_view_key(code: KeyCode, view: View, state: &mut TuiState) -> Option<UserCommand> {
    match (view, code) {
        (View::TeamDetail(_) | View::PlayerDetail(_), KeyCode::Char('s')) => {
            let next = state.snapshot.view.selected_stat().next();
            nav(NavAction::SelectStat(next))
        }
        (View::PlayerDetail(player_id), KeyCode::Char('e')) => {
            state.prompt = Some(Prompt::new(PromptKind::CapHit { player_id }));
            None
        }

        (View::Section(Section::Standings), KeyCode::Char('[')) => step_day(state, -1),
        (View::Section(Section::Standings), KeyCode::Char(']')) => step_day(state, 1),

        (View::Section(Section::FreeAgents), KeyCode::Char('o')) => {
            let current = state.snapshot.view.sort().key.as_str();
            let idx = COLUMNS
                .iter()
                .position(|(key, _)| *key == current)
                .map_or(0, |i| (i + 1) % COLUMNS.len());
            nav(NavAction::RequestSort(COLUMNS[idx].0.to_string()))
        }
        (View::Section(Section::FreeAgents), KeyCode::Char('O')) => {
            let current = state.snapshot.view.sort().key.clone();
            nav(NavAction::RequestSort(current))
        }
        (View::Section(Section::FreeAgents), KeyCode::Char('n')) => {
            state.prompt = Some(Prompt::new(PromptKind::CreatePlayer));
            None
        }

        (View::Section(Section::Salaries), KeyCode::Char('u')) => {
            state.prompt = Some(Prompt::new(PromptKind::UploadPath));
            None
        }

        (View::Section(Section::Settings), KeyCode::Char('i')) => {
            state.prompt = Some(Prompt::new(PromptKind::SyncInterval));
            None
        }
        (View::Section(Section::Settings), KeyCode::Char('c')) => {
            state.prompt = Some(Prompt::new(PromptKind::SalaryCap));
            None
        }
        (View::Section(Section::Settings), KeyCode::Char('y')) => {
            let draft = state.settings_draft_mut();
            draft.salary_sync_frequency = draft.salary_sync_frequency.next();
            None
        }
        (View::Section(Section::Settings), KeyCode::Char('s')) => state
            .settings_draft
            .clone()
            .map(UserCommand::SaveSettings),

        _ => None,
    }
}

fn nav(action: NavAction) -> Option<UserCommand> {
    Some(UserCommand::Nav(action))
}

/// Move the standings day one snapshot earlier or later.
fn step_day(state: &TuiState, step: isize) -> Option<UserCommand> {
    let history = &state.snapshot.store.history;
    let current = standings_day(&state.snapshot)?;
    let idx = history.iter().position(|s| s.day == current)?;
    let target = idx.checked_add_signed(step)?;
    let day = history.get(target)?.day.clone();
    nav(NavAction::SelectDay(day))
}

/// Handle key events while the quit confirmation is open.
///
/// `y`/`q` confirm, `n`/Esc cancel, everything else is ignored.
fn handle_confirm_quit(key_event: KeyEvent, state: &mut TuiState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

fn handle_prompt(key_event: KeyEvent, state: &mut TuiState) -> Option<UserCommand> {
    let prompt = state.prompt.as_mut()?;
    match key_event.code {
        KeyCode::Esc => {
            state.prompt = None;
            None
        }
        KeyCode::Backspace => {
            prompt.input.pop();
            None
        }
        KeyCode::Char(c) => {
            prompt.input.push(c);
            None
        }
        KeyCode::Enter => submit_prompt(state),
        _ => None,
    }
}

/// Act on a submitted prompt. Invalid input leaves the prompt open with an
/// error line.
fn submit_prompt(state: &mut TuiState) -> Option<UserCommand> {
    let prompt = state.prompt.take()?;
    let input = prompt.input.trim();

    let outcome: Result<Option<UserCommand>, String> = match prompt.kind {
        PromptKind::SyncInterval => match input.parse::<u32>() {
            Ok(minutes) if minutes > 0 => {
                state.settings_draft_mut().sync_interval_minutes = minutes;
                Ok(None)
            }
            _ => Err("Enter a whole number of minutes above zero".into()),
        },
        PromptKind::SalaryCap => match input.parse::<f64>() {
            Ok(cap) if cap > 0.0 && cap.is_finite() => {
                state.settings_draft_mut().salary_cap = cap;
                Ok(None)
            }
            _ => Err("Enter the cap in millions, e.g. 88.0".into()),
        },
        PromptKind::UploadPath if input.is_empty() => Err("Enter a file path".into()),
        PromptKind::UploadPath => Ok(Some(UserCommand::UploadSalaryFile(PathBuf::from(input)))),
        PromptKind::CreatePlayer => {
            parse_new_player(input).map(|p| Some(UserCommand::CreatePlayer(p)))
        }
        PromptKind::CapHit { player_id } => match parse_cap_hit(input) {
            Some(salary_value) if salary_value >= 0.0 => {
                state.prompt = Some(Prompt::new(PromptKind::ContractYears {
                    player_id,
                    salary_value,
                }));
                return None;
            }
            _ => Err("Enter a cap hit such as 9,500,000".into()),
        },
        PromptKind::ContractYears {
            player_id,
            salary_value,
        } => {
            let contract_years = (!input.is_empty()).then(|| input.to_string());
            Ok(Some(UserCommand::UpdateSalary {
                player_id,
                update: SalaryUpdate {
                    salary: Some(format_dollars(salary_value)),
                    salary_value: Some(salary_value),
                    contract_years,
                },
            }))
        }
    };

    match outcome {
        Ok(cmd) => cmd,
        Err(message) => {
            state.prompt = Some(Prompt {
                error: Some(message),
                ..prompt
            });
            None
        }
    }
}

/// Parse `Name, POS, TEAM`.
fn parse_new_player(input: &str) -> Result<NewPlayer, String> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [name, position, pro_team]
            if !name.is_empty() && !position.is_empty() && !pro_team.is_empty() =>
        {
            Ok(NewPlayer {
                full_name: name.to_string(),
                position: position.to_uppercase(),
                pro_team: pro_team.to_uppercase(),
                team_id: None,
                salary: None,
                salary_value: None,
                contract_years: None,
            })
        }
        _ => Err("Expected: Name, POS, TEAM".into()),
    }
}

/// Whole dollars with thousands separators: `9500000.0` -> `"$9,500,000"`.
pub fn format_dollars(value: f64) -> String {
    let digits = (value.round() as i64).unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
