//! Documents Config

use std::path::PathBuf;

use clap::Args;

use outpass_app::domain::outpasses::policy::{
    AttachmentPolicy, DEFAULT_MAX_DOCUMENT_BYTES, DEFAULT_MAX_DOCUMENTS,
};

/// Attachment storage settings.
#[derive(Debug, Args)]
pub struct DocumentsConfig {
    /// Directory uploaded documents are written to
    #[arg(long, env = "UPLOAD_DIR", default_value = "./uploads")]
    pub upload_dir: PathBuf,

    /// Largest accepted document in bytes
    #[arg(long, env = "MAX_DOCUMENT_BYTES", default_value_t = DEFAULT_MAX_DOCUMENT_BYTES)]
    pub max_document_bytes: u64,

    /// Most documents accepted with one application
    #[arg(long, env = "MAX_DOCUMENTS", default_value_t = DEFAULT_MAX_DOCUMENTS)]
    pub max_documents: usize,
}

impl DocumentsConfig {
    pub(crate) fn policy(&self) -> AttachmentPolicy {
        AttachmentPolicy {
            max_document_bytes: self.max_document_bytes,
            max_documents: self.max_documents,
        }
    }
}
