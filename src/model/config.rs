use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accent themes offered by the theme switcher, in cycle order
pub const THEMES: [&str; 9] = [
    "687ccc", "ac6bad", "cc5676", "d05a56", "389069", "358f89", "73818c", "dfedf9", "f2e7f9",
];

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Accent theme, one of [`THEMES`]
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Show checked tasks below the open ones
    #[serde(default = "default_true")]
    pub show_done: bool,
    /// Seconds before a notice disappears on its own
    #[serde(default = "default_notice_seconds")]
    pub notice_seconds: u64,
    /// Hex color overrides keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: default_theme(),
            show_done: true,
            notice_seconds: default_notice_seconds(),
            colors: HashMap::new(),
        }
    }
}

fn default_theme() -> String {
    THEMES[0].to_string()
}

fn default_true() -> bool {
    true
}

fn default_notice_seconds() -> u64 {
    5
}

/// The theme after `current` in [`THEMES`], wrapping around.
/// Unknown names restart from the first theme.
pub fn next_theme(current: &str) -> &'static str {
    match THEMES.iter().position(|t| *t == current) {
        Some(i) => THEMES[(i + 1) % THEMES.len()],
        None => THEMES[0],
    }
}
