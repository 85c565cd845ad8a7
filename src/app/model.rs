use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;

use super::{events::custom::LinkrsEvent, worker::WorkerMessage};

pub mod filter;
pub mod integrations;
pub mod maintenance;
pub mod navigation;
pub mod popup;
pub mod query;

pub trait Model {
    fn update(&mut self, event: &LinkrsEvent) -> (Option<LinkrsEvent>, Vec<WorkerMessage>);
}

/// Number of rows to jump when using half-page navigation (Ctrl+D / Ctrl+U)
pub const HALF_PAGE_SIZE: usize = 10;

#[derive(Clone)]
pub struct StatefulTable<T> {
    pub state: TableState,
    pub items: Vec<T>,
}

impl<T> StatefulTable<T> {
    pub fn new(items: Vec<T>) -> StatefulTable<T> {
        StatefulTable {
            state: TableState::default(),
            items,
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        scroll_table_state(&mut self.state, self.items.len(), delta);
    }
}

/// Move the selection of a table with `len` rows by `delta` (positive=down, negative=up).
/// Clamps at boundaries (no wrapping).
pub fn scroll_table_state(state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }

    let current = state.selected().unwrap_or(0).min(len - 1);
    let new_pos = if delta > 0 {
        current.saturating_add(delta.unsigned_abs()).min(len - 1)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    };

    state.select(Some(new_pos));
}

/// Handle standard scrolling keybinds for a StatefulTable
/// Returns true if the key was handled, false otherwise
#[allow(clippy::cast_possible_wrap)]
pub fn handle_table_scroll_keys<T>(table: &mut StatefulTable<T>, key_event: &KeyEvent) -> bool {
    if key_event.modifiers == KeyModifiers::CONTROL {
        match key_event.code {
            KeyCode::Char('d') => {
                table.scroll_by(HALF_PAGE_SIZE as isize);
                return true;
            }
            KeyCode::Char('u') => {
                table.scroll_by(-(HALF_PAGE_SIZE as isize));
                return true;
            }
            _ => {}
        }
    }

    match key_event.code {
        KeyCode::Down | KeyCode::Char('j') => {
            table.scroll_by(1);
            true
        }
        KeyCode::Up | KeyCode::Char('k') => {
            table.scroll_by(-1);
            true
        }
        _ => false,
    }
}

/// Close the command help popup on Esc, q, ? or Enter; swallow everything else
pub fn handle_command_popup_events(
    commands: &mut Option<popup::commands_help::CommandPopUp<'static>>,
    key_event: &KeyEvent,
) -> (Option<LinkrsEvent>, Vec<WorkerMessage>) {
    if commands.is_some() {
        if let KeyCode::Esc | KeyCode::Char('q' | '?') | KeyCode::Enter = key_event.code {
            *commands = None;
        }
    }
    (None, vec![])
}
