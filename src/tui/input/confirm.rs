use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, ConfirmAnswer};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let answer = match app.confirm {
        Some(ConfirmAction::UnsavedChanges(_)) => unsaved_answer(key),
        Some(_) => delete_answer(key),
        None => Some(ConfirmAnswer::Cancel),
    };
    if let Some(answer) = answer {
        app.answer_confirm(answer);
    }
}

/// Save / Don't save / Cancel
fn unsaved_answer(key: KeyEvent) -> Option<ConfirmAnswer> {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('s') | KeyCode::Char('y')) | (_, KeyCode::Enter) => {
            Some(ConfirmAnswer::Yes)
        }
        (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::Char('n')) => Some(ConfirmAnswer::No),
        (KeyModifiers::NONE, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
            Some(ConfirmAnswer::Cancel)
        }
        _ => None,
    }
}

fn delete_answer(key: KeyEvent) -> Option<ConfirmAnswer> {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) | (_, KeyCode::Enter) => Some(ConfirmAnswer::Yes),
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            Some(ConfirmAnswer::Cancel)
        }
        _ => None,
    }
}
