use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, EditTarget, Focus, Mode};
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the status row (bottom of screen): key hints on the left, the
/// file and its state on the right
pub fn render_status_row(frame: &mut Frame, app: &App, dirty: bool, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let hint = match app.mode {
        Mode::Navigate => match app.focus {
            Focus::Lists => " L new list  r rename  d delete  Enter tasks  ? help",
            Focus::Tasks => " a add  Space done  e edit  c notes  d delete  ? help",
        },
        Mode::Edit => match app.edit.as_ref().map(|e| e.target) {
            Some(EditTarget::TaskContent) => {
                " Ctrl+S done (notes are saved as plain text)  Esc cancel"
            }
            _ => " Enter done  Esc cancel",
        },
        Mode::Search => " Enter go to  \u{2191}\u{2193} move  Ctrl+X toggle  Esc close",
        Mode::Prompt => " Enter confirm  Esc cancel",
        Mode::Confirm => "",
    };

    let mut spans = vec![Span::styled(hint, dim)];

    let file = app
        .session
        .current_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "new file".to_string());
    let state = if dirty { "modified" } else { "saved" };
    let right = format!("{}  {} ", file, state);
    let right_width = unicode::display_width(&right);
    let used = spans_width(&spans);
    if used + right_width < width {
        let pad = " ".repeat(width - used - right_width);
        spans.push(Span::styled(pad, Style::default().bg(bg)));
        let color = if dirty {
            app.theme.accent
        } else {
            app.theme.dim
        };
        spans.push(Span::styled(right, Style::default().fg(color).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
