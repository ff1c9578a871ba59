use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the head bar: "<file> - dudu", a modified marker, and counts on the right
pub fn render_title_bar(frame: &mut Frame, app: &App, dirty: bool, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" \u{25CF} ", Style::default().fg(app.theme.accent).bg(bg)),
        Span::styled(
            app.head_title(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if dirty {
        spans.push(Span::styled(
            " [modified]",
            Style::default().fg(app.theme.accent).bg(bg),
        ));
    }

    let doc = app.store.document();
    let counts = format!(
        "{} {}  {} {} ",
        doc.lists.len(),
        plural(doc.lists.len(), "list", "lists"),
        doc.task_count(),
        plural(doc.task_count(), "task", "tasks"),
    );
    let used = spans_width(&spans);
    let counts_width = unicode::display_width(&counts);
    if used + counts_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - counts_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(counts, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
