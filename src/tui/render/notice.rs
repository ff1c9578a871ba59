use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::NoticeKind;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::wrap_text;

const MAX_WIDTH: u16 = 44;

/// Render the current notice as a toast in the top-right corner
pub fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    let Some((notice, _)) = &app.notice else {
        return;
    };
    let bg = app.theme.background;
    let color = match notice.kind {
        NoticeKind::Success => app.theme.green,
        NoticeKind::Error => app.theme.red,
        NoticeKind::Info => app.theme.accent,
    };

    let width = MAX_WIDTH.min(area.width.saturating_sub(2));
    let text_width = width.saturating_sub(2) as usize;
    let title = unicode::truncate_to_width(&notice.title, text_width.saturating_sub(1));
    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", title),
        Style::default().fg(color).bg(bg).add_modifier(Modifier::BOLD),
    ))];
    if !notice.desc.is_empty() {
        let desc = Style::default().fg(app.theme.text).bg(bg);
        for line in wrap_text(" ", &notice.desc, text_width).into_iter().take(4) {
            lines.push(Line::from(Span::styled(line, desc)));
        }
    }

    // Below the title bar, one cell in from the right edge
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(1));
    let x = area.x + area.width.saturating_sub(width + 1);
    let toast = Rect::new(x, area.y + 1, width, height);

    frame.render_widget(Clear, toast);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), toast);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Notice;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn toast_shows_title_and_description() {
        let mut app = app_with_doc(sample_doc());
        app.notify(Notice::error("Failed to load file", "Not a todo file: notes.txt"));
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_notice(frame, &app, area);
        });
        assert!(output.contains("Failed to load file"));
        assert!(output.contains("Not a todo file: notes.txt"));
    }

    #[test]
    fn no_notice_draws_nothing() {
        let app = app_with_doc(sample_doc());
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_notice(frame, &app, area);
        });
        assert_eq!(output, "");
    }
}
