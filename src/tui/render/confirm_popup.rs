use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, ConfirmAction, PendingAction};

use super::helpers::{centered_rect_fixed, wrap_text};

const POPUP_WIDTH: u16 = 50;

/// Render the confirm popup for unsaved changes or a deletion
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(action) = app.confirm else {
        return;
    };
    let bg = app.theme.background;
    let doc = app.store.document();

    let (title, message, choices): (&str, String, &[(&str, &str)]) = match action {
        ConfirmAction::UnsavedChanges(pending) => {
            let file = app
                .session
                .file_name()
                .unwrap_or_else(|| "the new document".to_string());
            let before = match pending {
                PendingAction::NewFile => "starting a new file",
                PendingAction::OpenFile => "opening another file",
                PendingAction::Quit => "quitting",
            };
            (
                " Unsaved changes",
                format!("Save changes to {} before {}?", file, before),
                &[("s", "Save"), ("d", "Don't save"), ("c", "Cancel")],
            )
        }
        ConfirmAction::DeleteList(index) => {
            let (name, count) = doc
                .list(index)
                .map(|l| (l.name.as_str(), l.tasks.len()))
                .unwrap_or(("", 0));
            let tasks = if count == 1 { "task" } else { "tasks" };
            (
                " Delete list",
                format!("Delete \"{}\" and its {} {}?", name, count, tasks),
                &[("y", "Delete"), ("n", "Cancel")],
            )
        }
        ConfirmAction::DeleteTask { list, task } => {
            let title = doc
                .list(list)
                .and_then(|l| l.tasks.get(task))
                .map(|t| t.title.as_str())
                .unwrap_or("");
            (
                " Delete task",
                format!("Delete \"{}\"?", title),
                &[("y", "Delete"), ("n", "Cancel")],
            )
        }
    };

    let width = POPUP_WIDTH.min(area.width);
    let text_width = width.saturating_sub(2) as usize;

    let title_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let key_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines = vec![Line::from(Span::styled(title, title_style)), Line::from("")];
    for line in wrap_text(" ", &message, text_width) {
        lines.push(Line::from(Span::styled(line, text_style)));
    }
    lines.push(Line::from(""));

    let mut spans = vec![Span::styled(" ", dim)];
    for (i, (key, label)) in choices.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", dim));
        }
        spans.push(Span::styled(format!("[{}]", key), key_style));
        spans.push(Span::styled(format!(" {}", label), dim));
    }
    lines.push(Line::from(spans));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn draw(app: &App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, app, area);
        })
    }

    #[test]
    fn unsaved_changes_choices() {
        let mut app = app_with_doc(sample_doc());
        app.confirm = Some(ConfirmAction::UnsavedChanges(PendingAction::NewFile));
        let output = draw(&app);
        assert!(output.contains("Unsaved changes"));
        assert!(output.contains("the new document"));
        assert!(output.contains("[s] Save  [d] Don't save  [c] Cancel"));
    }

    #[test]
    fn delete_list_names_it() {
        let mut app = app_with_doc(sample_doc());
        app.confirm = Some(ConfirmAction::DeleteList(1));
        let output = draw(&app);
        assert!(output.contains("Delete list"));
        assert!(output.contains("\"Work\""));
        assert!(output.contains("2 tasks"));
        assert!(output.contains("[y] Delete  [n] Cancel"));
    }

    #[test]
    fn delete_task_names_it() {
        let mut app = app_with_doc(sample_doc());
        app.confirm = Some(ConfirmAction::DeleteTask { list: 0, task: 2 });
        assert!(draw(&app).contains("\"Eggs\""));
    }
}
