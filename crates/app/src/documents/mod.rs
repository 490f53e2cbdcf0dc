//! Supporting document storage

mod errors;
mod local;

use std::path::PathBuf;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

pub use errors::DocumentStoreError;
pub use local::LocalDocumentStore;

/// A document received from a client and not yet stored.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    /// Client supplied file name, used for display only.
    pub file_name: String,

    /// Declared media type.
    pub media_type: String,

    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }
}

impl std::fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// Reference to a stored document, kept on the out-pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Display name.
    pub name: String,

    /// Storage path relative to the store root.
    pub path: String,

    pub media_type: String,
    pub size_bytes: u64,
}

#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist an upload and return its reference.
    async fn store(&self, upload: DocumentUpload) -> Result<StoredDocument, DocumentStoreError>;

    /// Filesystem location of a stored document.
    fn resolve(&self, path: &str) -> Result<PathBuf, DocumentStoreError>;

    /// Delete a stored document. Removing a missing document is not an error.
    async fn remove(&self, path: &str) -> Result<(), DocumentStoreError>;
}
