use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

use super::{TextKey, handle_text_key};

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.close_search(),
        (_, KeyCode::Enter) => app.choose_hit(),
        (_, KeyCode::Down) | (KeyModifiers::CONTROL, KeyCode::Char('n')) => app.move_hit(1),
        (_, KeyCode::Up) | (KeyModifiers::CONTROL, KeyCode::Char('p')) => app.move_hit(-1),
        // Check off the highlighted hit without leaving the panel
        (KeyModifiers::CONTROL, KeyCode::Char('x')) => app.toggle_current_hit(),
        _ => {
            let Some(state) = &mut app.search else {
                return;
            };
            if handle_text_key(&mut state.input, key) == TextKey::Changed {
                app.search_input_changed();
            }
        }
    }
}
