use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, EditTarget, Focus, Mode};
use crate::util::unicode;

use super::helpers::{cursor_style, input_spans, scroll_for};

/// Render the list of lists, with done/total counts
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Lists && app.mode != Mode::Search;
    let border = if focused { app.theme.accent } else { app.theme.dim };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Lists ",
            Style::default().fg(border).bg(bg).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let doc = app.store.document();
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    if doc.is_empty() {
        let lines = vec![
            Line::from(Span::styled(" No lists yet", dim)),
            Line::from(Span::styled(" L adds one", dim)),
        ];
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
        return;
    }

    let width = inner.width as usize;
    let height = inner.height as usize;
    let selected = app.store.list_index();
    let scroll = scroll_for(selected.unwrap_or(0), height);
    let editing = app
        .edit
        .as_ref()
        .filter(|e| e.target == EditTarget::ListName);

    let mut lines = Vec::with_capacity(height);
    for (i, list) in doc.lists.iter().enumerate().skip(scroll).take(height) {
        let is_selected = selected == Some(i);
        let row_bg = if is_selected { app.theme.selection_bg } else { bg };
        let name_style = if is_selected {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        if is_selected && let Some(edit) = editing {
            let mut spans = vec![Span::styled(" ", name_style)];
            spans.extend(input_spans(
                &edit.input.text,
                edit.input.cursor,
                name_style,
                cursor_style(name_style),
            ));
            lines.push(Line::from(spans));
            continue;
        }

        let count = format!("{}/{} ", list.checked_count(), list.tasks.len());
        let count_width = unicode::display_width(&count);
        let name_room = width.saturating_sub(count_width + 2);
        let name = unicode::truncate_to_width(&list.name, name_room);
        let pad = width.saturating_sub(unicode::display_width(&name) + 1 + count_width);

        lines.push(Line::from(vec![
            Span::styled(" ", name_style),
            Span::styled(name, name_style),
            Span::styled(" ".repeat(pad), Style::default().bg(row_bg)),
            Span::styled(count, Style::default().fg(app.theme.dim).bg(row_bg)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}
