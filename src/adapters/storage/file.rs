//! File-system storage backend
//!
//! Each key is stored as `<root>/<key>.json`. Writes land in a temporary
//! sibling file first and are renamed over the target, so readers never
//! observe a partially written value.

use super::traits::{StorageBackend, StorageResult};
use crate::domain::StorageError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory-backed storage
///
/// # Example
///
/// ```no_run
/// use caredesk::adapters::storage::{FileBackend, StorageBackend};
///
/// let backend = FileBackend::new("./caredesk-data");
/// backend.set_item("localPatients", "[]").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root`
    ///
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored values
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    fn io_error(key: &str, err: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

/// Keys become file names, so only a conservative character set is allowed
fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;

        let tmp_path = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp_path, value).map_err(|e| Self::io_error(key, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            Self::io_error(key, e)
        })?;

        tracing::trace!(key = %key, bytes = value.len(), path = %path.display(), "Wrote storage file");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
