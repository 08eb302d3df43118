//! Upload directory store
//!
//! A flat directory of client-named files. Writes overwrite (last write wins);
//! no locking is performed between concurrent requests.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, StoreResult};

/// A regular file found in the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub name: String,
    pub path: PathBuf,
}

/// Handle to the upload directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `root` (the directory need not exist yet)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the upload directory path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if absent
    pub async fn ensure_dir(&self) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Write `data` to `<root>/<filename>`, replacing any existing file
    ///
    /// Returns the number of bytes written.
    pub async fn save(&self, filename: &str, data: &[u8]) -> StoreResult<u64> {
        validate_filename(filename)?;
        self.ensure_dir().await?;

        let path = self.root.join(filename);
        tokio::fs::write(&path, data).await?;

        let size = data.len() as u64;
        tracing::debug!(filename = %filename, size, path = %path.display(), "Saved upload");
        Ok(size)
    }

    /// List regular files in the upload directory, sorted by name
    ///
    /// A missing directory lists as empty. Names that are not valid UTF-8 are
    /// skipped.
    pub fn list(&self) -> StoreResult<Vec<StoredFile>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(path = %entry.path().display(), "Skipping non-UTF-8 filename");
                continue;
            };
            files.push(StoredFile {
                name,
                path: entry.path(),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Delete every file directly inside the upload directory
    ///
    /// Subdirectories are left in place. Returns the number of files removed.
    pub async fn clear(&self) -> StoreResult<usize> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                tracing::warn!(path = %path.display(), "Not removing subdirectory");
                continue;
            }
            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                // Removed by a concurrent clear
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        tracing::debug!(removed, dir = %self.root.display(), "Cleared uploads");
        Ok(removed)
    }
}

/// Check that a client-supplied filename names a file directly inside the
/// upload directory
pub fn validate_filename(filename: &str) -> Result<(), IngestError> {
    if filename.is_empty() {
        return Err(IngestError::EmptyFilename);
    }
    let escapes = filename.contains(['/', '\\', '\0']) || filename == "." || filename == "..";
    if escapes {
        return Err(IngestError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}
