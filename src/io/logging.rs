use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::io::paths;

const LOG_LEVEL_ENV: &str = "DUDU_LOG_LEVEL";

/// Install the file logger. The terminal belongs to the UI, so nothing is
/// written to stdout or stderr. Keep the returned guard alive until exit so
/// buffered lines get flushed.
pub fn init_logging() -> Result<(PathBuf, WorkerGuard), Box<dyn std::error::Error>> {
    let log_dir = log_directory();
    fs::create_dir_all(&log_dir)?;

    let log_file_path = log_file_path(&log_dir);
    let file = fs::File::create(&log_file_path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(build_log_filter())
        .with(file_layer)
        .try_init()?;

    tracing::info!(path = %log_file_path.display(), "logging initialized");
    Ok((log_file_path, guard))
}

fn build_log_filter() -> EnvFilter {
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|raw| normalize_log_level(&raw))
        .unwrap_or("warn");
    EnvFilter::new(format!("{level},dudu={level}"))
}

fn normalize_log_level(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

pub fn log_directory() -> PathBuf {
    paths::data_dir().join("logs")
}

pub fn log_file_path(log_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    log_dir.join(format!("dudu-{}.log", timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_name() {
        let path = log_file_path(Path::new("/tmp/test-logs"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("dudu-"));
        assert!(name.ends_with(".log"));
        assert!(path.starts_with("/tmp/test-logs"));
    }

    #[test]
    fn log_levels() {
        assert_eq!(normalize_log_level("TRACE"), Some("trace"));
        assert_eq!(normalize_log_level(" warning "), Some("warn"));
        assert_eq!(normalize_log_level("loud"), None);
    }
}
