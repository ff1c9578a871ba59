use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, EditTarget, Focus, PendingAction, PromptKind};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Files
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => app.request(PendingAction::NewFile),
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => app.request(PendingAction::OpenFile),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => app.save(),
        (KeyModifiers::NONE, KeyCode::Char('S')) => app.open_prompt(PromptKind::SaveAs, None),
        (KeyModifiers::CONTROL, KeyCode::Char('q')) | (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.request(PendingAction::Quit)
        }

        // Creating
        (KeyModifiers::CONTROL, KeyCode::Char('l')) | (KeyModifiers::NONE, KeyCode::Char('L')) => {
            app.add_list()
        }
        (KeyModifiers::CONTROL, KeyCode::Char('t')) | (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.begin_edit(EditTarget::NewTask)
        }

        // Search
        (KeyModifiers::CONTROL, KeyCode::Char('f')) | (KeyModifiers::NONE, KeyCode::Char('/')) => {
            app.open_search()
        }

        // Movement
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => app.toggle_focus(),
        (_, KeyCode::Left) => app.focus = Focus::Lists,
        (_, KeyCode::Right) => {
            if app.store.current_list().is_some() {
                app.focus = Focus::Tasks;
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('j')) | (_, KeyCode::Down) => move_cursor(app, 1),
        (KeyModifiers::NONE, KeyCode::Char('k')) | (_, KeyCode::Up) => move_cursor(app, -1),
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => jump(app, false),
        (KeyModifiers::NONE, KeyCode::Char('G')) | (_, KeyCode::End) => jump(app, true),
        (_, KeyCode::Enter) => app.open_selected(),

        // Editing
        (KeyModifiers::NONE, KeyCode::Char(' ')) | (KeyModifiers::NONE, KeyCode::Char('x')) => {
            if app.focus == Focus::Tasks {
                app.toggle_selected_task();
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('r')) => app.begin_edit(EditTarget::ListName),
        (KeyModifiers::NONE, KeyCode::Char('e')) => app.begin_edit(EditTarget::TaskTitle),
        (KeyModifiers::NONE, KeyCode::Char('c')) => app.begin_edit(EditTarget::TaskContent),
        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => app.request_delete(),

        // View
        (KeyModifiers::NONE, KeyCode::Char('h')) => app.toggle_show_done(),
        (KeyModifiers::NONE, KeyCode::Char('t')) => app.cycle_theme(),
        (KeyModifiers::NONE, KeyCode::Char('?')) | (_, KeyCode::F(1)) => app.show_help = true,
        (_, KeyCode::Esc) => back(app),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    match app.focus {
        Focus::Lists => app.move_list(delta),
        Focus::Tasks => app.move_task(delta),
    }
}

fn jump(app: &mut App, last: bool) {
    match app.focus {
        Focus::Lists => app.move_list(if last { isize::MAX / 2 } else { isize::MIN / 2 }),
        Focus::Tasks => app.jump_task(last),
    }
}

/// Esc: close the detail pane, then step back to the lists
fn back(app: &mut App) {
    if app.notice.is_some() {
        app.notice = None;
    } else if app.show_detail {
        app.show_detail = false;
    } else {
        app.focus = Focus::Lists;
    }
}
