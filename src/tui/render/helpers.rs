use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode;

/// Local date and time, minute precision
pub(super) fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Spans for one line of an input with the cursor drawn at byte `cursor`.
/// At the end of the text the cursor is a highlighted blank cell.
pub(super) fn input_spans(
    text: &str,
    cursor: usize,
    style: Style,
    cursor_style: Style,
) -> Vec<Span<'static>> {
    let cursor = cursor.min(text.len());
    let (before, rest) = text.split_at(cursor);
    let mut spans = vec![Span::styled(before.to_string(), style)];
    match rest.graphemes(true).next() {
        Some(g) => {
            spans.push(Span::styled(g.to_string(), cursor_style));
            spans.push(Span::styled(rest[g.len()..].to_string(), style));
        }
        None => spans.push(Span::styled(" ", cursor_style)),
    }
    spans
}

/// Cursor cell style for an input drawn in `style`
pub(super) fn cursor_style(style: Style) -> Style {
    style.add_modifier(Modifier::REVERSED)
}

/// Word-wrap `text` into lines of at most `max_width` cells.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_len = unicode::display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut current_len = indent_len;

    for word in text.split_whitespace() {
        let word_len = unicode::display_width(word);
        let space = if current_len == indent_len { 0 } else { 1 };
        if current_len + space + word_len > max_width && current_len > indent_len {
            lines.push(current);
            current = indent.to_string();
            current_len = indent_len;
        }
        if current_len > indent_len {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if current_len > indent_len || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// First row to draw so that `cursor` stays inside a window of `height` rows
pub(super) fn scroll_for(cursor: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    cursor.saturating_sub(height - 1)
}
