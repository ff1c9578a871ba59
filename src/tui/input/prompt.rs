use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::{TextKey, handle_text_key};

pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Down => app.move_recent(1),
        KeyCode::Up => app.move_recent(-1),
        _ => {
            let Some(prompt) = &mut app.prompt else {
                return;
            };
            if handle_text_key(&mut prompt.input, key) == TextKey::Changed {
                prompt.recent_cursor = None;
            }
        }
    }
}
