//! Application state for the sheetmerge API

use std::sync::Arc;

use sheetmerge_core::UploadStore;

/// Default request body limit for uploads (64 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Upload directory every handler reads from or writes to
    store: Arc<UploadStore>,
    /// Maximum accepted request body on the upload route
    max_upload_bytes: usize,
}

impl AppState {
    /// Create a new AppState with the given upload store
    pub fn new(store: UploadStore) -> Self {
        Self {
            store: Arc::new(store),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Override the upload body limit
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Get the upload store
    pub fn store(&self) -> &UploadStore {
        &self.store
    }

    /// Get the upload store Arc (for moving into blocking tasks)
    pub fn store_arc(&self) -> Arc<UploadStore> {
        self.store.clone()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
