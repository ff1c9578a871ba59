use std::fs;
use std::path::{Path, PathBuf};

use crate::io::paths;
use crate::model::AppConfig;

/// Error type for config file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// `$XDG_CONFIG_HOME/dudu/config.toml`
pub fn config_path() -> PathBuf {
    paths::config_dir().join("config.toml")
}

/// Read the config at `path`. A missing file yields the defaults.
pub fn read_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Like [`read_config_from`], but any error is logged and replaced by the defaults.
pub fn load_config_from(path: &Path) -> AppConfig {
    match read_config_from(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using default config");
            AppConfig::default()
        }
    }
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

/// Set `ui.theme` in the config file at `path`, keeping the rest of the
/// file (comments, ordering, other keys) as written.
pub fn set_theme_in(path: &Path, theme: &str) -> Result<(), ConfigError> {
    let text = if path.exists() {
        fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        String::new()
    };

    let mut doc: toml_edit::DocumentMut = text.parse()?;
    set_theme(&mut doc, theme);

    let write_err = |e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, doc.to_string()).map_err(write_err)?;
    tracing::debug!(path = %path.display(), theme, "saved theme");
    Ok(())
}

pub fn set_theme(doc: &mut toml_edit::DocumentMut, theme: &str) {
    if !doc.contains_key("ui") {
        doc["ui"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["ui"]["theme"] = toml_edit::value(theme);
}
