use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, EditTarget, Focus, Mode};
use crate::util::unicode;

use super::helpers::{cursor_style, input_spans, scroll_for};
use super::push_highlighted_spans;

/// Render the selected list's tasks: open ones first, checked ones after
pub fn render_task_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Tasks && app.mode != Mode::Search;
    let border = if focused { app.theme.accent } else { app.theme.dim };

    let title = match app.store.current_name() {
        Some(name) => {
            let room = area.width.saturating_sub(4) as usize;
            format!(" {} ", unicode::truncate_to_width(name, room))
        }
        None => " Tasks ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default().fg(border).bg(bg).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let dim = Style::default().fg(app.theme.dim).bg(bg);
    if app.store.current_list().is_none() {
        let hint = if app.store.list_count() == 0 {
            " No lists. Press L to add one, or a to add a task"
        } else {
            " No list selected"
        };
        frame.render_widget(Paragraph::new(Span::styled(hint, dim)), inner);
        return;
    }

    let tasks = app.store.task_list();
    let visible = app.visible_tasks();
    let hidden = tasks.len() - visible.len();
    let adding = app
        .edit
        .as_ref()
        .filter(|e| e.target == EditTarget::NewTask);
    let renaming = app
        .edit
        .as_ref()
        .filter(|e| e.target == EditTarget::TaskTitle);
    let search_re = app.search_regex();
    let highlight = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    // Rows: visible tasks, then the new-task input, then the hidden-done footer
    let mut rows: Vec<Line> = Vec::new();
    let selected = app.store.task_index();
    let mut cursor_row = 0;

    for &index in &visible {
        let task = &tasks[index];
        let is_selected = selected == Some(index);
        if is_selected {
            cursor_row = rows.len();
        }
        let row_bg = if is_selected && focused {
            app.theme.selection_bg
        } else {
            bg
        };

        let mut style = if task.is_checked() {
            Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if is_selected {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };
        if is_selected && !focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let box_style = if task.is_checked() {
            Style::default().fg(app.theme.green).bg(row_bg)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        let mut spans = vec![
            Span::styled(" [", box_style),
            Span::styled(task.status.checkbox_char().to_string(), box_style),
            Span::styled("] ", box_style),
        ];
        if is_selected && let Some(edit) = renaming {
            let plain = Style::default().fg(app.theme.text_bright).bg(row_bg);
            spans.extend(input_spans(
                &edit.input.text,
                edit.input.cursor,
                plain,
                cursor_style(plain),
            ));
        } else {
            push_highlighted_spans(
                &mut spans,
                &task.title,
                style,
                highlight,
                search_re.as_ref(),
            );
            if !task.content.is_empty() {
                let marker = Style::default().fg(app.theme.dim).bg(row_bg);
                spans.push(Span::styled(" \u{00B6}", marker));
            }
        }
        rows.push(Line::from(spans));
    }

    if let Some(edit) = adding {
        cursor_row = rows.len();
        let plain = Style::default().fg(app.theme.text_bright).bg(bg);
        let accent = Style::default().fg(app.theme.accent).bg(bg);
        let mut spans = vec![Span::styled(" [ ] ", accent)];
        spans.extend(input_spans(
            &edit.input.text,
            edit.input.cursor,
            plain,
            cursor_style(plain),
        ));
        rows.push(Line::from(spans));
    }

    if rows.is_empty() {
        let hint = if hidden > 0 {
            " All done"
        } else {
            " No tasks. Press a to add one"
        };
        rows.push(Line::from(Span::styled(hint, dim)));
    }

    if hidden > 0 && !app.show_done {
        rows.push(Line::from(Span::styled(
            format!(" {} done hidden (h to show)", hidden),
            dim,
        )));
    }

    let height = inner.height as usize;
    let scroll = scroll_for(cursor_row, height);
    let lines: Vec<Line> = rows.into_iter().skip(scroll).take(height).collect();
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}
