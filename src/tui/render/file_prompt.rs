use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::io::recent;
use crate::tui::app::{App, PromptKind};
use crate::util::unicode;

use super::helpers::{centered_rect_fixed, cursor_style, input_spans, spans_width};

const PROMPT_WIDTH: u16 = 64;
/// Recent files shown below the input
const MAX_SHOWN: usize = 8;

/// Render the file path prompt used for opening and saving as
pub fn render_file_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let Some(prompt) = &app.prompt else {
        return;
    };
    let bg = app.theme.background;
    let title = match prompt.kind {
        PromptKind::OpenFile => " Open file ",
        PromptKind::SaveAs => " Save as ",
    };

    let width = PROMPT_WIDTH.min(area.width);
    let inner_width = width.saturating_sub(2) as usize;
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    let accent = Style::default().fg(app.theme.accent).bg(bg);
    let mut input = vec![Span::styled(" > ", accent)];
    input.extend(input_spans(
        &prompt.input.text,
        prompt.input.cursor,
        bright,
        cursor_style(bright),
    ));
    lines.push(Line::from(input));
    lines.push(Line::from(""));

    if !prompt.recent.is_empty() {
        let heading = dim.add_modifier(Modifier::BOLD);
        lines.push(Line::from(Span::styled(" Recent", heading)));
        for (i, file) in prompt.recent.iter().take(MAX_SHOWN).enumerate() {
            let selected = prompt.recent_cursor == Some(i);
            let row_bg = if selected { app.theme.selection_bg } else { bg };
            let when = format!(" {} ", recent::relative_time(&file.last_opened));
            let room = inner_width.saturating_sub(unicode::display_width(&when) + 2);
            let path = unicode::truncate_to_width(&recent::abbreviate_path(&file.path), room);

            let mut spans = vec![
                Span::styled("  ", Style::default().bg(row_bg)),
                Span::styled(path, if selected { bright.bg(row_bg) } else { text }),
            ];
            let used = spans_width(&spans) + unicode::display_width(&when);
            let pad = inner_width.saturating_sub(used);
            spans.push(Span::styled(" ".repeat(pad), Style::default().bg(row_bg)));
            spans.push(Span::styled(when, dim.bg(row_bg)));
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    let hint = match prompt.kind {
        PromptKind::OpenFile if !prompt.recent.is_empty() => {
            " Enter open  \u{2191}\u{2193} recent  Esc cancel"
        }
        PromptKind::OpenFile => " Enter open  Esc cancel",
        PromptKind::SaveAs => " Enter save (.todo added if no extension)  Esc cancel",
    };
    lines.push(Line::from(Span::styled(hint, dim)));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.accent).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::recent::RecentFile;
    use crate::tui::app::PromptState;
    use crate::tui::editor::TextInput;
    use crate::tui::render::test_helpers::*;
    use chrono::Utc;

    fn draw(app: &App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_file_prompt(frame, app, area);
        })
    }

    #[test]
    fn save_as_prompt() {
        let mut app = app_with_doc(sample_doc());
        app.open_prompt(PromptKind::SaveAs, None);
        let output = draw(&app);
        assert!(output.contains("Save as"));
        assert!(output.contains(".todo added"));
        assert!(!output.contains("Recent"));
    }

    #[test]
    fn open_prompt_lists_recent_files() {
        let mut app = app_with_doc(sample_doc());
        app.prompt = Some(PromptState {
            kind: PromptKind::OpenFile,
            input: TextInput::new("/tmp/shop"),
            recent: vec![RecentFile {
                path: "/tmp/shopping.todo".into(),
                last_opened: Utc::now(),
            }],
            recent_cursor: None,
            after_save: None,
        });
        let output = draw(&app);
        assert!(output.contains("Open file"));
        assert!(output.contains("> /tmp/shop"));
        assert!(output.contains("Recent"));
        assert!(output.contains("/tmp/shopping.todo"));
        assert!(output.contains("just now"));
    }
}
