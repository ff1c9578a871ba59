use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::atomic_write;
use crate::model::Document;

/// Error type for document file operations
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize document: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Serialize a document to its on-disk JSON form
pub fn to_json(doc: &Document) -> Result<String, DocumentError> {
    Ok(serde_json::to_string(doc)?)
}

/// Content digest of the serialized document, used for dirty tracking
pub fn digest(doc: &Document) -> Result<blake3::Hash, DocumentError> {
    Ok(blake3::hash(to_json(doc)?.as_bytes()))
}

/// Read and parse a document file.
pub fn read_document(path: &Path) -> Result<Document, DocumentError> {
    let text = fs::read_to_string(path).map_err(|e| DocumentError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let doc = serde_json::from_str(&text).map_err(|e| DocumentError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "read document");
    Ok(doc)
}

/// Write already-serialized document JSON to `path` atomically.
pub fn write_json(path: &Path, json: &str) -> Result<(), DocumentError> {
    atomic_write(path, json.as_bytes()).map_err(|e| DocumentError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "wrote document");
    Ok(())
}

/// Serialize and write a document to `path` atomically.
pub fn write_document(path: &Path, doc: &Document) -> Result<(), DocumentError> {
    let json = to_json(doc)?;
    write_json(path, &json)
}
