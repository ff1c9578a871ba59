use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::search::MatchField;
use crate::tui::app::{App, Mode};
use crate::util::html;
use crate::util::unicode;

use super::helpers::{cursor_style, input_spans, scroll_for};
use super::push_highlighted_spans;

/// Rows per hit: "list › title" and a content preview
const HIT_ROWS: usize = 2;

/// Render the search panel: query input, match count and hits
pub fn render_search_panel(frame: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.search else {
        return;
    };
    let bg = app.theme.background;
    let border = if app.mode == Mode::Search {
        app.theme.accent
    } else {
        app.theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Search ",
            Style::default().fg(border).bg(bg).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let highlight = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    let mut lines: Vec<Line> = Vec::new();
    let prompt = Style::default().fg(app.theme.accent).bg(bg);
    let mut query = vec![Span::styled(" /", prompt)];
    query.extend(input_spans(
        &state.input.text,
        state.input.cursor,
        bright,
        cursor_style(bright),
    ));
    lines.push(Line::from(query));

    let count = match state.hits.len() {
        0 if state.input.text.trim().is_empty() => " Type to search".to_string(),
        0 => " No matches".to_string(),
        1 => " 1 match".to_string(),
        n => format!(" {} matches", n),
    };
    lines.push(Line::from(Span::styled(count, dim)));
    lines.push(Line::from(""));

    let re = app.search_regex();
    let doc = app.store.document();
    let list_height = (inner.height as usize).saturating_sub(lines.len()) / HIT_ROWS;
    let scroll = scroll_for(state.cursor, list_height);

    for (i, hit) in state.hits.iter().enumerate().skip(scroll).take(list_height) {
        let Some(task) = doc
            .list(hit.list_index)
            .and_then(|l| l.tasks.get(hit.task_index))
        else {
            continue;
        };
        let row_bg = if i == state.cursor {
            app.theme.selection_bg
        } else {
            bg
        };
        let name_style = Style::default().fg(app.theme.dim).bg(row_bg);
        let title_style = if task.is_checked() {
            Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        };

        let mut spans = vec![Span::styled(" ", name_style)];
        let name = unicode::truncate_to_width(&hit.list_name, width / 3);
        let name_re = re.as_ref().filter(|_| hit.matched(MatchField::Name));
        push_highlighted_spans(&mut spans, &name, name_style, highlight, name_re);
        spans.push(Span::styled(" \u{203A} ", name_style));
        let title_re = re.as_ref().filter(|_| hit.matched(MatchField::Title));
        push_highlighted_spans(&mut spans, &task.title, title_style, highlight, title_re);
        lines.push(Line::from(spans));

        let preview = html::preview(&task.content);
        let mut spans = vec![Span::styled("   ", Style::default().bg(row_bg))];
        if !preview.is_empty() {
            let preview = unicode::truncate_to_width(&preview, width.saturating_sub(3));
            let preview_style = Style::default().fg(app.theme.text).bg(row_bg);
            let preview_re = re.as_ref().filter(|_| hit.matched(MatchField::Content));
            push_highlighted_spans(
                &mut spans,
                &preview,
                preview_style,
                highlight,
                preview_re,
            );
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn searching(query: &str) -> App {
        let mut app = app_with_doc(sample_doc());
        app.open_search();
        if let Some(state) = &mut app.search {
            state.input.insert_str(query);
        }
        app.search_input_changed();
        app
    }

    fn draw(app: &App) -> String {
        render_to_string(40, 16, |frame, area| render_search_panel(frame, app, area))
    }

    #[test]
    fn blank_query_prompts() {
        let app = searching("");
        let output = draw(&app);
        assert!(output.contains("Type to search"));
    }

    #[test]
    fn hits_show_list_and_title() {
        let app = searching("e");
        let output = draw(&app);
        assert!(output.contains("matches"));
        assert!(output.contains("Groceries \u{203A} Eggs"));
        assert!(output.contains("Work \u{203A} Write report"));
    }

    #[test]
    fn content_preview_is_plain_text() {
        let app = searching("friday");
        let output = draw(&app);
        assert!(output.contains("1 match"));
        assert!(output.contains("Write report"));
        assert!(output.contains("due Friday"));
    }

    #[test]
    fn no_matches() {
        let app = searching("zzz");
        assert!(draw(&app).contains("No matches"));
    }
}
