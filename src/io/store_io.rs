use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::{Collection, Limits, ListItem};
use crate::parse::{parse_list, serialize_list};

pub const HABITS_FILE: &str = "habits.csv";
pub const TASKS_FILE: &str = "tasks.csv";

/// Error type for data directory I/O
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize state: {0}")]
    StateSerializeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

/// Write `content` to `path` through a temp file in the same directory
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Load a list file. A missing file is an empty collection, not an error.
pub fn load_list<T: ListItem>(path: &Path, limits: Limits) -> Result<Collection<T>, StorageError> {
    if !path.exists() {
        log::info!("{} not found, starting empty", path.display());
        return Ok(Collection::new(limits));
    }
    let bytes = fs::read(path).map_err(|e| StorageError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let source = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = source {
        log::warn!("{}: invalid UTF-8 replaced with U+FFFD", path.display());
    }
    let (collection, dropped) = parse_list(&source, limits);
    if dropped > 0 {
        log::warn!("{}: {} rows skipped", path.display(), dropped);
    }
    log::debug!(
        "loaded {} items in {} heads from {}",
        collection.total_items(),
        collection.head_count(),
        path.display()
    );
    Ok(collection)
}

/// Load a list file, falling back to an empty collection on any failure
pub fn load_list_or_empty<T: ListItem>(path: &Path, limits: Limits) -> Collection<T> {
    load_list(path, limits).unwrap_or_else(|e| {
        log::warn!("{}; starting empty", e);
        Collection::new(limits)
    })
}

/// Rewrite the whole list file
pub fn save_list<T: ListItem>(path: &Path, collection: &Collection<T>) -> Result<(), StorageError> {
    let content = serialize_list(collection);
    atomic_write(path, content.as_bytes()).map_err(|e| StorageError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::debug!("saved {}", path.display());
    Ok(())
}
