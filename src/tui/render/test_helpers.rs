use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::session::Session;
use crate::model::{AppConfig, Document, Task, TaskStatus, TodoList};
use crate::ops::store::Store;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

fn task(title: &str, content: &str, status: TaskStatus) -> Task {
    let mut t = Task::new(title);
    t.content = content.to_string();
    t.status = status;
    t
}

/// Two lists; "Groceries" has a checked task in the middle.
pub fn sample_doc() -> Document {
    Document {
        lists: vec![
            TodoList {
                name: "Groceries".into(),
                tasks: vec![
                    task("Buy milk", "2 litres", TaskStatus::Unchecked),
                    task("Bread", "", TaskStatus::Checked),
                    task("Eggs", "a dozen<div>free range</div>", TaskStatus::Unchecked),
                ],
            },
            TodoList {
                name: "Work".into(),
                tasks: vec![
                    task("Write report", "due <i>Friday</i>", TaskStatus::Unchecked),
                    task("Email Bob", "", TaskStatus::Unchecked),
                ],
            },
        ],
    }
}

/// An app over `doc` with the first list selected and nothing unsaved.
/// No recent-files registry and no config file are touched.
pub fn app_with_doc(doc: Document) -> App {
    let store = Store::from_document(doc);
    let mut session = Session::new(None, std::env::temp_dir().join("dudu-test-recovery.log"));
    session.mark_clean(&store);
    App::new(store, session, AppConfig::default(), None)
}
