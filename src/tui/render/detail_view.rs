use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, EditState, EditTarget};
use crate::util::html::html_to_text;

use super::helpers::{cursor_style, format_timestamp, input_spans, scroll_for, wrap_text};
use super::push_highlighted_spans;

/// Render the selected task: title, status, created time and content
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let Some(task) = app.store.current_task() else {
        return;
    };
    let editing_content = app
        .edit
        .as_ref()
        .filter(|e| e.target == EditTarget::TaskContent);
    let border = if editing_content.is_some() {
        app.theme.accent
    } else {
        app.theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Detail ",
            Style::default().fg(border).bg(bg).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let highlight = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let search_re = app.search_regex();
    let width = inner.width as usize;

    let mut lines: Vec<Line> = Vec::new();

    let mut title = vec![Span::styled(" ", bright)];
    push_highlighted_spans(&mut title, &task.title, bright, highlight, search_re.as_ref());
    lines.push(Line::from(title));

    let (status, status_color) = if task.is_checked() {
        ("done", app.theme.green)
    } else {
        ("open", app.theme.accent)
    };
    lines.push(Line::from(vec![
        Span::styled(" status: ", dim),
        Span::styled(status, Style::default().fg(status_color).bg(bg)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" created: ", dim),
        Span::styled(format_timestamp(&task.timestamp), text_style),
    ]));
    lines.push(Line::from(""));

    let header = lines.len();
    let mut cursor_line = 0;
    if let Some(edit) = editing_content {
        cursor_line = edit.input.cursor_position().0;
        lines.extend(editor_lines(edit, bright.remove_modifier(Modifier::BOLD)));
    } else if task.content.is_empty() {
        let hint = " No notes. Press c to write some";
        lines.push(Line::from(Span::styled(hint, dim)));
    } else {
        let text = html_to_text(&task.content);
        for paragraph in text.lines() {
            for wrapped in wrap_text(" ", paragraph, width) {
                let mut spans = Vec::new();
                push_highlighted_spans(
                    &mut spans,
                    &wrapped,
                    text_style,
                    highlight,
                    search_re.as_ref(),
                );
                lines.push(Line::from(spans));
            }
        }
    }

    // Keep the editing cursor in view
    let height = inner.height as usize;
    let scroll = if editing_content.is_some() {
        scroll_for(header + cursor_line, height)
    } else {
        0
    };
    let lines: Vec<Line> = lines.into_iter().skip(scroll).take(height).collect();
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

/// One row per line of the edit buffer, the cursor drawn on its line
fn editor_lines(edit: &EditState, style: Style) -> Vec<Line<'static>> {
    let text = &edit.input.text;
    let mut lines = Vec::new();
    let mut start = 0;
    for line in text.split('\n') {
        let end = start + line.len();
        let mut spans = vec![Span::styled(" ", style)];
        if (start..=end).contains(&edit.input.cursor) {
            spans.extend(input_spans(
                line,
                edit.input.cursor - start,
                style,
                cursor_style(style),
            ));
        } else if !line.is_empty() {
            spans.push(Span::styled(line.to_string(), style));
        }
        lines.push(Line::from(spans));
        start = end + 1;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::editor::TextInput;
    use crate::tui::render::test_helpers::*;

    fn draw(app: &App) -> String {
        render_to_string(40, 12, |frame, area| render_detail_view(frame, app, area))
    }

    #[test]
    fn shows_title_status_and_plain_content() {
        let mut app = app_with_doc(sample_doc());
        app.store.select_task(Some(2)).unwrap();
        let output = draw(&app);
        assert!(output.contains("Eggs"));
        assert!(output.contains("status: open"));
        assert!(output.contains("created:"));
        assert!(output.contains("a dozen"));
        assert!(output.contains("free range"));
        assert!(!output.contains("<div>"));
    }

    #[test]
    fn checked_task_reads_done() {
        let mut app = app_with_doc(sample_doc());
        app.store.select_task(Some(1)).unwrap();
        assert!(draw(&app).contains("status: done"));
    }

    #[test]
    fn empty_content_hint() {
        let mut app = app_with_doc(sample_doc());
        app.store.select_task(Some(1)).unwrap();
        assert!(draw(&app).contains("No notes"));
    }

    #[test]
    fn editor_shows_every_line() {
        let mut app = app_with_doc(sample_doc());
        app.store.select_task(Some(0)).unwrap();
        app.edit = Some(EditState {
            target: EditTarget::TaskContent,
            input: TextInput::multiline("first\nsecond"),
            original: "2 litres".into(),
        });
        let output = draw(&app);
        assert!(output.contains("first"));
        assert!(output.contains("second"));
        assert!(!output.contains("2 litres"));
    }

    #[test]
    fn nothing_selected_draws_nothing() {
        let app = app_with_doc(sample_doc());
        assert_eq!(draw(&app), "");
    }
}
