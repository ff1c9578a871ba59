use std::path::{Path, PathBuf};

use crate::io::document_io::{self, DocumentError};
use crate::io::{recent, recovery};
use crate::model::{Document, Notice};
use crate::ops::store::Store;

/// Application title shown in the head bar
pub const APP_TITLE: &str = "dudu";

/// Extension added to save-as names that have none
pub const DEFAULT_EXTENSION: &str = "todo";

/// Result of a save attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Notice),
    /// No current file; the caller has to ask for a path and use [`Session::save_as`]
    NeedsPath,
    Failed(Notice),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

/// Tracks which file the document belongs to and whether it has unsaved
/// changes.
///
/// Dirtiness is a digest comparison: the serialized document is hashed at
/// every load and save, and compared against the current serialization on
/// demand. Selection is not part of the file, so moving around never makes
/// the document dirty.
#[derive(Debug)]
pub struct Session {
    current_file: Option<PathBuf>,
    baseline: Option<blake3::Hash>,
    recent_path: Option<PathBuf>,
    recovery_path: PathBuf,
}

impl Session {
    /// A session for an empty document. `recent_path` is the recent-files
    /// registry to update (none to skip), `recovery_path` the log that
    /// receives documents whose save failed.
    pub fn new(recent_path: Option<PathBuf>, recovery_path: PathBuf) -> Self {
        Session {
            current_file: None,
            baseline: document_io::digest(&Document::new()).ok(),
            recent_path,
            recovery_path,
        }
    }

    /// A session using the per-user registry and recovery log locations
    pub fn with_default_paths() -> Self {
        Session::new(Some(recent::recent_path()), recovery::recovery_log_path())
    }

    /// Registry of recently used files, if this session keeps one
    pub fn recent_path(&self) -> Option<&Path> {
        self.recent_path.as_deref()
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// File name of the current file, if any
    pub fn file_name(&self) -> Option<String> {
        self.current_file
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
    }

    /// `"<file> - dudu"`, or just the app title for an unsaved document
    pub fn head_title(&self) -> String {
        match self.file_name() {
            Some(name) => format!("{} - {}", name, APP_TITLE),
            None => APP_TITLE.to_string(),
        }
    }

    /// Whether the document differs from what was last loaded or saved
    pub fn is_dirty(&self, store: &Store) -> bool {
        match (document_io::digest(store.document()).ok(), self.baseline) {
            (Some(now), Some(baseline)) => now != baseline,
            _ => true,
        }
    }

    /// Treat the store's current document as the saved state
    #[cfg(test)]
    pub(crate) fn mark_clean(&mut self, store: &Store) {
        self.baseline = document_io::digest(store.document()).ok();
    }

    /// Start over with an empty, unsaved document.
    pub fn new_file(&mut self, store: &mut Store) -> Notice {
        store.replace(Document::new());
        self.current_file = None;
        self.baseline = document_io::digest(store.document()).ok();
        tracing::info!("new document");
        Notice::info("New file", "Started an empty document")
    }

    /// Load `path`, replacing the document. On failure nothing changes and
    /// the error notice is returned.
    pub fn open(&mut self, store: &mut Store, path: &Path) -> Result<Notice, Notice> {
        let doc = match document_io::read_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "load failed");
                return Err(Notice::error("Failed to load file", load_error_desc(&e)));
            }
        };

        self.baseline = document_io::digest(&doc).ok();
        store.replace(doc);
        self.current_file = Some(path.to_path_buf());
        self.touch_recent(path);
        tracing::info!(path = %path.display(), lists = store.list_count(), "loaded");
        Ok(Notice::success("File loaded", path.display().to_string()))
    }

    /// Save to the current file, or report that a path is needed.
    pub fn save(&mut self, store: &Store) -> SaveOutcome {
        match self.current_file.clone() {
            Some(path) => self.save_to(store, &path),
            None => SaveOutcome::NeedsPath,
        }
    }

    /// Save to `path` (with `.todo` added when it has no extension) and make
    /// it the current file.
    pub fn save_as(&mut self, store: &Store, path: &Path) -> SaveOutcome {
        let path = with_default_extension(path);
        self.save_to(store, &path)
    }

    fn save_to(&mut self, store: &Store, path: &Path) -> SaveOutcome {
        let json = match document_io::to_json(store.document()) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "could not serialize document");
                return SaveOutcome::Failed(Notice::error("Failed to save file", e.to_string()));
            }
        };

        if let Err(e) = document_io::write_json(path, &json) {
            recovery::log_failed_save(&self.recovery_path, path, &e.to_string(), &json);
            return SaveOutcome::Failed(Notice::error("Failed to save file", e.to_string()));
        }

        self.baseline = Some(blake3::hash(json.as_bytes()));
        self.current_file = Some(path.to_path_buf());
        self.touch_recent(path);
        tracing::info!(path = %path.display(), "saved");
        SaveOutcome::Saved(Notice::success("File saved", path.display().to_string()))
    }

    fn touch_recent(&self, path: &Path) {
        if let Some(registry) = &self.recent_path {
            recent::touch_recent_in(registry, path);
        }
    }
}

/// `name` → `name.todo`; names that already have an extension are kept.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

fn load_error_desc(err: &DocumentError) -> String {
    match err {
        DocumentError::ParseError { source, .. } => format!("Not a todo file: {}", source),
        other => other.to_string(),
    }
}
