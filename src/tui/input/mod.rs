mod confirm;
mod edit;
mod navigate;
mod prompt;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, PendingAction};
use super::editor::TextInput;

use confirm::handle_confirm;
use edit::handle_edit;
use navigate::handle_navigate;
use prompt::handle_prompt;
use search::handle_search;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);

    // Help overlay swallows everything until dismissed
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)
        ) {
            app.show_help = false;
        }
        return;
    }

    if key.modifiers == KeyModifiers::CONTROL
        && key.code == KeyCode::Char('c')
        && app.mode != Mode::Confirm
    {
        app.cancel_edit();
        app.cancel_prompt();
        app.close_search();
        app.request(PendingAction::Quit);
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Prompt => handle_prompt(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

/// Handle a bracketed paste: inserted at the cursor of whatever input is active
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    match app.mode {
        Mode::Edit => {
            if let Some(edit) = &mut app.edit {
                edit.input.insert_str(text);
            }
        }
        Mode::Search => {
            if let Some(state) = &mut app.search {
                state.input.insert_str(text);
            }
            app.search_input_changed();
        }
        Mode::Prompt => {
            if let Some(prompt) = &mut app.prompt {
                prompt.input.insert_str(text);
                prompt.recent_cursor = None;
            }
        }
        Mode::Navigate | Mode::Confirm => {}
    }
}

/// Shifted letters already carry their case; drop SHIFT so bindings can
/// match on the character alone.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if matches!(key.code, KeyCode::Char(_)) {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}

/// What a key did to a text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TextKey {
    Changed,
    Moved,
    Ignored,
}

/// Line-editing keys shared by every input. Enter, Esc, Up and Down are left
/// to the caller.
pub(super) fn handle_text_key(input: &mut TextInput, key: KeyEvent) -> TextKey {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('w')) | (KeyModifiers::ALT, KeyCode::Backspace) => {
            input.delete_word_back();
            TextKey::Changed
        }
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => {
            input.home();
            TextKey::Moved
        }
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => {
            input.end();
            TextKey::Moved
        }
        (KeyModifiers::NONE, KeyCode::Char(c)) => {
            input.insert_char(c);
            TextKey::Changed
        }
        (_, KeyCode::Backspace) => {
            input.backspace();
            TextKey::Changed
        }
        (_, KeyCode::Delete) => {
            input.delete();
            TextKey::Changed
        }
        (_, KeyCode::Left) => {
            input.left();
            TextKey::Moved
        }
        (_, KeyCode::Right) => {
            input.right();
            TextKey::Moved
        }
        _ => TextKey::Ignored,
    }
}
