use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

use super::handle_text_key;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(edit) = &mut app.edit else {
        app.cancel_edit();
        return;
    };
    let multiline = edit.input.multiline;

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.cancel_edit(),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => app.commit_edit(),
        (_, KeyCode::Enter) if !multiline => app.commit_edit(),
        (_, KeyCode::Enter) => edit.input.insert_char('\n'),
        (_, KeyCode::Up) if multiline => {
            edit.input.up();
        }
        (_, KeyCode::Down) if multiline => {
            edit.input.down();
        }
        _ => {
            handle_text_key(&mut edit.input, key);
        }
    }
}
