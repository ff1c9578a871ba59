use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::config::THEMES;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Accent from the selected theme: borders, cursor, headings
    pub accent: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

const BACKGROUND: (u8, u8, u8) = (0x14, 0x16, 0x1C);

impl Default for Theme {
    fn default() -> Self {
        Theme::with_accent(THEMES[0])
    }
}

/// Parse a hex color like "#687ccc" or "687ccc" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let (r, g, b) = parse_rgb(hex)?;
    Some(Color::Rgb(r, g, b))
}

fn parse_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Mix `t` parts of `a` into `b`
fn blend(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> Color {
    let mix = |x: u8, y: u8| (x as f32 * t + y as f32 * (1.0 - t)).round() as u8;
    Color::Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

impl Theme {
    /// Base palette around an accent hex. Invalid hex falls back to the first theme.
    pub fn with_accent(accent_hex: &str) -> Self {
        let accent = parse_rgb(accent_hex)
            .or_else(|| parse_rgb(THEMES[0]))
            .unwrap_or((0x68, 0x7C, 0xCC));
        let (r, g, b) = BACKGROUND;

        Theme {
            background: Color::Rgb(r, g, b),
            text: Color::Rgb(0xC8, 0xCC, 0xD4),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            accent: Color::Rgb(accent.0, accent.1, accent.2),
            dim: Color::Rgb(0x6B, 0x70, 0x7C),
            red: Color::Rgb(0xE0, 0x5A, 0x56),
            green: Color::Rgb(0x5F, 0xC0, 0x7E),
            selection_bg: blend(accent, BACKGROUND, 0.3),
            search_match_bg: Color::Rgb(accent.0, accent.1, accent.2),
            search_match_fg: Color::Rgb(r, g, b),
        }
    }

    /// Create a theme from the `[ui]` config, applying `[ui.colors]` overrides
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::with_accent(&ui.theme);

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key, value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "accent" => theme.accent = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "selection_bg" => theme.selection_bg = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                _ => {}
            }
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("687ccc"), Some(Color::Rgb(0x68, 0x7C, 0xCC)));
        assert_eq!(parse_hex_color("#FF44"), None);
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn accent_follows_theme() {
        let mut ui = UiConfig::default();
        ui.theme = "cc5676".into();
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.accent, Color::Rgb(0xCC, 0x56, 0x76));
    }

    #[test]
    fn unknown_theme_uses_default_accent() {
        let theme = Theme::with_accent("not a color");
        assert_eq!(theme.accent, Color::Rgb(0x68, 0x7C, 0xCC));
    }

    #[test]
    fn color_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("text".into(), "bogus".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.text, Theme::default().text);
    }

    #[test]
    fn selection_is_between_accent_and_background() {
        let theme = Theme::with_accent("ffffff");
        let Color::Rgb(r, _, _) = theme.selection_bg else {
            panic!("expected rgb");
        };
        assert!(r > BACKGROUND.0 && r < 0xFF);
    }
}
