use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(70, 90, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    let sections: [(&str, &[(&str, &str)]); 4] = [
        (
            " Navigation",
            &[
                (" \u{2191}\u{2193}/jk", "Move up/down"),
                (" Tab \u{2190}\u{2192}", "Switch between lists and tasks"),
                (" g/G", "Jump to first/last"),
                (" Enter", "Open list or task detail"),
                (" Esc", "Back / close"),
            ],
        ),
        (
            " Lists and tasks",
            &[
                (" L  Ctrl+L", "New list"),
                (" a  Ctrl+T", "New task"),
                (" Space/x", "Toggle done"),
                (" r", "Rename list"),
                (" e", "Edit task title"),
                (" c", "Edit notes, drops formatting"),
                (" d/Del", "Delete list or task"),
            ],
        ),
        (
            " Files",
            &[
                (" Ctrl+N", "New file"),
                (" Ctrl+O", "Open file"),
                (" Ctrl+S", "Save"),
                (" S", "Save as"),
            ],
        ),
        (
            " View",
            &[
                (" / Ctrl+F", "Search (regex, Ctrl+X toggles a hit)"),
                (" h", "Show/hide done tasks"),
                (" t", "Next theme"),
                (" ?", "Toggle this help"),
                (" q  Ctrl+Q", "Quit"),
            ],
        ),
    ];

    for (header, bindings) in sections {
        lines.push(Line::from(Span::styled(header, header_style)));
        for &(key, desc) in bindings {
            add_binding(&mut lines, key, desc, key_style, desc_style);
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 14;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
