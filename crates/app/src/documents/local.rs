//! Filesystem backed document store.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::documents::{DocumentStore, DocumentStoreError, DocumentUpload, StoredDocument};

/// Stores documents as flat files named by a fresh UUID under one directory.
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn extension_for(upload: &DocumentUpload) -> &'static str {
    match upload.media_type.trim().to_ascii_lowercase().as_str() {
        "application/pdf" => "pdf",
        "image/jpeg" => "jpg",
        "image/png" => "png",
        _ => "bin",
    }
}

/// Stored names are generated here, so anything that is not a single plain
/// file name component did not come from this store.
fn is_stored_name(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        && !path.starts_with('.')
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn store(&self, upload: DocumentUpload) -> Result<StoredDocument, DocumentStoreError> {
        fs::create_dir_all(&self.root).await?;

        let path = format!("{}.{}", Uuid::now_v7(), extension_for(&upload));
        let size_bytes = upload.size_bytes();

        fs::write(self.root.join(&path), &upload.bytes).await?;

        debug!(path, size_bytes, "document stored");

        Ok(StoredDocument {
            name: upload.file_name,
            path,
            media_type: upload.media_type,
            size_bytes,
        })
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, DocumentStoreError> {
        if !is_stored_name(path) {
            return Err(DocumentStoreError::InvalidPath(path.to_string()));
        }

        Ok(self.root.join(path))
    }

    async fn remove(&self, path: &str) -> Result<(), DocumentStoreError> {
        let location = self.resolve(path)?;

        match fs::remove_file(location).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
