use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::io::paths;

/// How many files the registry remembers
pub const MAX_RECENT: usize = 10;

/// A file that was recently loaded or saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFile {
    pub path: String,
    pub last_opened: DateTime<Utc>,
}

/// Recently used files, most recent first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentFiles {
    #[serde(default)]
    pub files: Vec<RecentFile>,
}

/// `$XDG_CONFIG_HOME/dudu/recent.toml`
pub fn recent_path() -> PathBuf {
    paths::config_dir().join("recent.toml")
}

/// Read the registry from a specific path.
/// A missing file is an empty registry; a corrupted one is backed up as
/// `.bak` and treated as empty.
pub fn read_recent_from(path: &Path) -> RecentFiles {
    if !path.exists() {
        return RecentFiles::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<RecentFiles>(&content) {
            Ok(recent) => recent,
            Err(e) => {
                let bak = path.with_extension("toml.bak");
                let _ = fs::copy(path, &bak);
                tracing::warn!(
                    path = %path.display(),
                    backup = %bak.display(),
                    error = %e,
                    "could not parse recent files, starting fresh"
                );
                RecentFiles::default()
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read recent files");
            RecentFiles::default()
        }
    }
}

/// Write the registry to a specific path.
pub fn write_recent_to(path: &Path, recent: &RecentFiles) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content =
        toml::to_string_pretty(recent).map_err(|e| std::io::Error::other(e.to_string()))?;
    fs::write(path, content)
}

/// Move `file` to the front of the registry at `registry`, stamped now.
pub fn touch_recent_in(registry: &Path, file: &Path) {
    let abs = fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
    let path_str = abs.to_string_lossy().to_string();

    let mut recent = read_recent_from(registry);
    recent.files.retain(|f| f.path != path_str);
    recent.files.insert(
        0,
        RecentFile {
            path: path_str,
            last_opened: Utc::now(),
        },
    );
    recent.files.truncate(MAX_RECENT);

    if let Err(e) = write_recent_to(registry, &recent) {
        tracing::warn!(path = %registry.display(), error = %e, "could not update recent files");
    }
}

/// Abbreviate a path by replacing $HOME with ~
pub fn abbreviate_path(path: &str) -> String {
    if let Ok(home) = std::env::var("HOME")
        && !home.is_empty()
        && let Some(rest) = path.strip_prefix(&home)
        && (rest.is_empty() || rest.starts_with('/'))
    {
        return format!("~{}", rest);
    }
    path.to_string()
}

/// Format a relative time string like "2 min ago", "yesterday", "3 days ago"
pub fn relative_time(dt: &DateTime<Utc>) -> String {
    relative_time_from(dt, Utc::now())
}

fn relative_time_from(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*dt);

    if duration.num_seconds() < 60 {
        return "just now".to_string();
    }
    let mins = duration.num_minutes();
    if mins < 60 {
        return format!("{} min ago", mins);
    }
    let hours = duration.num_hours();
    if hours < 24 {
        return format!("{} hr ago", hours);
    }
    let days = duration.num_days();
    if days == 1 {
        return "yesterday".to_string();
    }
    if days < 7 {
        return format!("{} days ago", days);
    }
    let weeks = days / 7;
    if weeks < 5 {
        return format!("{} weeks ago", weeks);
    }
    format!("{} months ago", days / 30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn temp_registry() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dudu").join("recent.toml");
        (tmp, path)
    }

    #[test]
    fn missing_registry_is_empty() {
        let (_tmp, path) = temp_registry();
        assert!(read_recent_from(&path).files.is_empty());
    }

    #[test]
    fn touch_moves_file_to_front() {
        let (_tmp, path) = temp_registry();
        touch_recent_in(&path, Path::new("/tmp/a.todo"));
        touch_recent_in(&path, Path::new("/tmp/b.todo"));
        touch_recent_in(&path, Path::new("/tmp/a.todo"));

        let recent = read_recent_from(&path);
        let paths: Vec<&str> = recent.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a.todo"));
        assert!(paths[1].ends_with("b.todo"));
    }

    #[test]
    fn registry_is_capped() {
        let (_tmp, path) = temp_registry();
        for i in 0..(MAX_RECENT + 3) {
            touch_recent_in(&path, Path::new(&format!("/nowhere/{i}.todo")));
        }
        let recent = read_recent_from(&path);
        assert_eq!(recent.files.len(), MAX_RECENT);
        assert_eq!(recent.files[0].path, format!("/nowhere/{}.todo", MAX_RECENT + 2));
    }

    #[test]
    fn corrupt_registry_is_backed_up() {
        let (_tmp, path) = temp_registry();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "files = 12 [[[").unwrap();

        assert!(read_recent_from(&path).files.is_empty());
        assert!(path.with_extension("toml.bak").exists());
    }

    #[test]
    fn relative_times() {
        let now = Utc::now();
        assert_eq!(relative_time_from(&now, now), "just now");
        assert_eq!(relative_time_from(&(now - Duration::minutes(5)), now), "5 min ago");
        assert_eq!(relative_time_from(&(now - Duration::hours(3)), now), "3 hr ago");
        assert_eq!(relative_time_from(&(now - Duration::days(1)), now), "yesterday");
        assert_eq!(relative_time_from(&(now - Duration::days(4)), now), "4 days ago");
        assert_eq!(relative_time_from(&(now - Duration::days(15)), now), "2 weeks ago");
        assert_eq!(relative_time_from(&(now - Duration::days(90)), now), "3 months ago");
    }
}
