use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::io::paths;

/// Size past which the oldest entries are dropped (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

const ENTRY_SEPARATOR: &str = "\n---\n";

/// Header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- dudu recovery log
     Documents that could not be saved are kept here as JSON.
     Copy a block into a .todo file to get it back.
     Safe to delete once you have what you need. -->

---
";

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// `$XDG_DATA_HOME/dudu/recovery.log`
pub fn recovery_log_path() -> PathBuf {
    paths::data_dir().join("recovery.log")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = format!(
            "## {}: {}\n\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.description,
        );

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push_str("\n```json\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push_str(ENTRY_SEPARATOR);
        out
    }
}

/// Append an entry to the log at `log_path`. Failures are logged, not returned.
pub fn log_recovery(log_path: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(log_path, &entry) {
        tracing::error!(
            path = %log_path.display(),
            error = %e,
            "could not write to recovery log"
        );
    }
}

fn log_recovery_inner(path: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    if let Ok(meta) = fs::metadata(path)
        && meta.len() > MAX_LOG_SIZE
    {
        let content = fs::read_to_string(path)?;
        atomic_write(path, trim_oldest(&content, MAX_LOG_SIZE as usize / 2).as_bytes())?;
    }

    let needs_header = fs::metadata(path).map_or(true, |m| m.len() == 0);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Record the JSON of a document whose save to `target` failed.
pub fn log_failed_save(log_path: &Path, target: &Path, error: &str, json: &str) {
    tracing::warn!(target_file = %target.display(), "save failed, keeping a copy in the recovery log");
    log_recovery(
        log_path,
        RecoveryEntry {
            timestamp: Utc::now(),
            description: "save failed".to_string(),
            fields: vec![
                ("File".to_string(), target.display().to_string()),
                ("Error".to_string(), error.to_string()),
            ],
            body: json.to_string(),
        },
    );
}

/// Drop whole entries from the front of the log until it fits in `max_len`
/// bytes. The header is always kept.
fn trim_oldest(content: &str, max_len: usize) -> String {
    let (header, entries) = match content.find(ENTRY_SEPARATOR) {
        Some(i) => content.split_at(i + ENTRY_SEPARATOR.len()),
        None => return content.to_string(),
    };

    let mut rest = entries;
    while header.len() + rest.len() > max_len {
        match rest.find(ENTRY_SEPARATOR) {
            Some(i) => rest = &rest[i + ENTRY_SEPARATOR.len()..],
            None => {
                rest = "";
                break;
            }
        }
    }
    format!("{header}{rest}")
}
