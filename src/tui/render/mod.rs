pub mod confirm_popup;
pub mod detail_view;
pub mod file_prompt;
pub mod help_overlay;
pub mod helpers;
pub mod notice;
pub mod search_panel;
pub mod sidebar;
pub mod status_row;
pub mod task_view;
pub mod title_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::App;

/// Sidebar width when the search panel is closed
const SIDEBAR_WIDTH: u16 = 28;
/// Below this width the detail pane replaces the task list instead of sitting beside it
const SPLIT_MIN_WIDTH: u16 = 50;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar | body | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Digest of the whole document; computed once per frame
    let dirty = app.is_dirty();
    title_bar::render_title_bar(frame, app, dirty, chunks[0]);

    let body = chunks[1];
    let side_width = if app.search.is_some() {
        (body.width * 2 / 5).max(SIDEBAR_WIDTH).min(body.width)
    } else {
        SIDEBAR_WIDTH.min(body.width / 3)
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(side_width), Constraint::Min(1)])
        .split(body);

    if app.search.is_some() {
        search_panel::render_search_panel(frame, app, columns[0]);
    } else {
        sidebar::render_sidebar(frame, app, columns[0]);
    }

    let main = columns[1];
    if app.show_detail && app.store.current_task().is_some() {
        if main.width >= SPLIT_MIN_WIDTH {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(main);
            task_view::render_task_view(frame, app, halves[0]);
            detail_view::render_detail_view(frame, app, halves[1]);
        } else {
            detail_view::render_detail_view(frame, app, main);
        }
    } else {
        task_view::render_task_view(frame, app, main);
    }

    status_row::render_status_row(frame, app, dirty, chunks[2]);

    // Overlays, topmost last
    if app.prompt.is_some() {
        file_prompt::render_file_prompt(frame, app, area);
    }
    if app.confirm.is_some() {
        confirm_popup::render_confirm_popup(frame, app, area);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
    if app.notice.is_some() {
        notice::render_notice(frame, app, area);
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.is_empty() {
            continue;
        }
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::model::Document;
    use crate::tui::app::{ConfirmAction, PendingAction};

    #[test]
    fn full_screen_shows_lists_and_tasks() {
        let app = app_with_doc(sample_doc());
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("Groceries"));
        assert!(output.contains("Work"));
        assert!(output.contains("Buy milk"));
        assert!(output.lines().next().unwrap().contains("dudu"));
    }

    #[test]
    fn empty_document_hints() {
        let app = app_with_doc(Document::new());
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("No lists"));
    }

    #[test]
    fn unsaved_prompt_is_drawn_on_top() {
        let mut app = app_with_doc(sample_doc());
        app.confirm = Some(ConfirmAction::UnsavedChanges(PendingAction::Quit));
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("Unsaved changes"));
        assert!(output.contains("Don't save"));
    }

    #[test]
    fn detail_pane_beside_tasks() {
        let mut app = app_with_doc(sample_doc());
        app.store.select_task(Some(0)).unwrap();
        app.show_detail = true;
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("2 litres"));
        assert!(output.contains("Eggs"));
    }

    #[test]
    fn highlighted_spans_split_at_matches() {
        let re = Regex::new("(?i)milk").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Milk and milk",
            Style::default(),
            Style::default(),
            Some(&re),
        );
        let parts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Milk", " and ", "milk"]);
    }
}
