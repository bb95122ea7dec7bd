pub mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{HabitItem, ListItem, TaskItem};
use crate::ops::{EditOutcome, EditorKey, Interaction, PomodoroKey};

use super::app::{App, Module, Screen};

/// Handle a key event on the current screen. `io` serves the list editors'
/// chord keys and text prompts.
pub fn handle_key<I>(app: &mut App, key: KeyEvent, io: &mut I)
where
    I: Interaction<HabitItem> + Interaction<TaskItem>,
{
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);

    match app.screen {
        Screen::Panel => handle_panel(app, key),
        Screen::Module(module) => handle_module(app, module, key, io),
    }
}

fn handle_panel(app: &mut App, key: KeyEvent) {
    let count = Module::ALL.len();
    match key.code {
        KeyCode::Up => app.panel_cursor = (app.panel_cursor + count - 1) % count,
        KeyCode::Down => app.panel_cursor = (app.panel_cursor + 1) % count,
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('q' | 'Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_module<I>(app: &mut App, module: Module, key: KeyEvent, io: &mut I)
where
    I: Interaction<HabitItem> + Interaction<TaskItem>,
{
    // The duration editor owns every key while it is open
    let capturing = module == Module::Pomodoro && app.pomodoro.is_capturing();
    if !capturing {
        match key.code {
            KeyCode::Char('q' | 'Q') => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('b' | 'B') => {
                app.back_to_panel();
                return;
            }
            _ => {}
        }
    }

    match module {
        Module::Habits => {
            let outcome = app.habits.handle_key(editor_key(key), io);
            if saves_after::<HabitItem>(outcome)
                && let Err(e) = app.save_habits()
            {
                log::error!("{}", e);
            }
        }
        Module::Tasks => {
            let outcome = app.tasks.handle_key(editor_key(key), io);
            if saves_after::<TaskItem>(outcome)
                && let Err(e) = app.save_tasks()
            {
                log::error!("{}", e);
            }
        }
        Module::Pomodoro => {
            if let Some(key) = pomodoro_key(key) {
                app.pomodoro.handle_key(key);
            }
        }
        Module::Settings => {}
    }
}

/// Whether a list of `T` is written to disk right after this outcome
fn saves_after<T: ListItem>(outcome: EditOutcome) -> bool {
    outcome == EditOutcome::Deleted && T::SAVE_ON_DELETE
}

/// Normalize a key event so that shifted letters arrive as uppercase.
///
/// Terminals with the kitty keyboard protocol report Shift+e as
/// `Char('e')` + SHIFT; traditional terminals already send `Char('E')`.
pub fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

/// Translate a terminal key into the list editor's vocabulary
pub fn editor_key(key: KeyEvent) -> EditorKey {
    match key.code {
        KeyCode::Up => EditorKey::Up,
        KeyCode::Down => EditorKey::Down,
        KeyCode::Esc => EditorKey::Esc,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => EditorKey::Char(c),
        _ => EditorKey::Other,
    }
}

/// Translate a terminal key into the timer's vocabulary
pub fn pomodoro_key(key: KeyEvent) -> Option<PomodoroKey> {
    match key.code {
        KeyCode::Enter => Some(PomodoroKey::Enter),
        KeyCode::Backspace => Some(PomodoroKey::Backspace),
        KeyCode::Esc => Some(PomodoroKey::Esc),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(PomodoroKey::Char(c.to_ascii_lowercase()))
        }
        _ => None,
    }
}
