use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, BackTab, Char, Down, Enter, Tab, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    match key.code {
        Up | Char('k') => app.move_up(),
        Down | Char('j') => app.move_down(),
        Enter | Char(' ') => app.select_current(),
        Backspace | Char('c') => app.clear_selection(),
        Char('b') => app.book(),
        Tab | BackTab => app.toggle_focus(),
        _ => {}
    }
    Action::None
}
