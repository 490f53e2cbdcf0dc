//! Attachment policy applied to out-pass documents before anything is stored.

use thiserror::Error;

use crate::documents::DocumentUpload;

/// Media types accepted as supporting documents.
pub const ALLOWED_MEDIA_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

pub const DEFAULT_MAX_DOCUMENTS: usize = 5;

/// Room left in a multipart body for the text fields and part headers.
pub const FORM_OVERHEAD_BYTES: u64 = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentRejection {
    #[error("at most {limit} documents may be attached")]
    TooMany { limit: usize },

    #[error("{name}: media type {media_type} is not accepted")]
    MediaType { name: String, media_type: String },

    #[error("{name}: {size_bytes} bytes exceeds the {limit} byte limit")]
    TooLarge {
        name: String,
        size_bytes: u64,
        limit: u64,
    },

    #[error("{name}: document is empty")]
    Empty { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentPolicy {
    pub max_document_bytes: u64,
    pub max_documents: usize,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            max_documents: DEFAULT_MAX_DOCUMENTS,
        }
    }
}

impl AttachmentPolicy {
    /// Check every upload. A single rejected document rejects the whole batch.
    ///
    /// # Errors
    ///
    /// Returns the first [`AttachmentRejection`] encountered.
    pub fn check(&self, uploads: &[DocumentUpload]) -> Result<(), AttachmentRejection> {
        if uploads.len() > self.max_documents {
            return Err(AttachmentRejection::TooMany {
                limit: self.max_documents,
            });
        }

        uploads.iter().try_for_each(|upload| self.check_one(upload))
    }

    /// Largest multipart body an application may send: every allowed
    /// document at its ceiling plus [`FORM_OVERHEAD_BYTES`].
    pub fn max_request_bytes(&self) -> usize {
        let documents = u64::try_from(self.max_documents).unwrap_or(u64::MAX);
        let total = self
            .max_document_bytes
            .saturating_mul(documents)
            .saturating_add(FORM_OVERHEAD_BYTES);

        usize::try_from(total).unwrap_or(usize::MAX)
    }

    fn check_one(&self, upload: &DocumentUpload) -> Result<(), AttachmentRejection> {
        let media_type = upload.media_type.trim().to_ascii_lowercase();

        if !ALLOWED_MEDIA_TYPES.contains(&media_type.as_str()) {
            return Err(AttachmentRejection::MediaType {
                name: upload.file_name.clone(),
                media_type: upload.media_type.clone(),
            });
        }

        let size_bytes = upload.size_bytes();

        if size_bytes == 0 {
            return Err(AttachmentRejection::Empty {
                name: upload.file_name.clone(),
            });
        }

        if size_bytes > self.max_document_bytes {
            return Err(AttachmentRejection::TooLarge {
                name: upload.file_name.clone(),
                size_bytes,
                limit: self.max_document_bytes,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, media_type: &str, size: usize) -> DocumentUpload {
        DocumentUpload {
            file_name: name.to_string(),
            media_type: media_type.to_string(),
            bytes: vec![7; size],
        }
    }

    #[test]
    fn no_documents_is_accepted() {
        assert_eq!(AttachmentPolicy::default().check(&[]), Ok(()));
    }

    #[test]
    fn allowed_types_within_limit_are_accepted() {
        let uploads = [
            upload("note.pdf", "application/pdf", 10),
            upload("scan.jpg", "IMAGE/JPEG", 10),
            upload("scan.png", "image/png", 10),
        ];

        assert_eq!(AttachmentPolicy::default().check(&uploads), Ok(()));
    }

    #[test]
    fn disallowed_type_rejects_batch() {
        let uploads = [
            upload("note.pdf", "application/pdf", 10),
            upload("run.sh", "text/x-shellscript", 10),
        ];

        assert!(matches!(
            AttachmentPolicy::default().check(&uploads),
            Err(AttachmentRejection::MediaType { name, .. }) if name == "run.sh"
        ));
    }

    #[test]
    fn oversize_document_is_rejected() {
        let policy = AttachmentPolicy {
            max_document_bytes: 4,
            max_documents: 5,
        };

        assert_eq!(
            policy.check(&[upload("big.pdf", "application/pdf", 5)]),
            Err(AttachmentRejection::TooLarge {
                name: "big.pdf".to_string(),
                size_bytes: 5,
                limit: 4,
            })
        );
    }

    #[test]
    fn too_many_documents_is_rejected() {
        let policy = AttachmentPolicy {
            max_document_bytes: 100,
            max_documents: 1,
        };

        let uploads = [
            upload("a.pdf", "application/pdf", 1),
            upload("b.pdf", "application/pdf", 1),
        ];

        assert_eq!(
            policy.check(&uploads),
            Err(AttachmentRejection::TooMany { limit: 1 })
        );
    }

    #[test]
    fn empty_document_is_rejected() {
        assert!(matches!(
            AttachmentPolicy::default().check(&[upload("blank.png", "image/png", 0)]),
            Err(AttachmentRejection::Empty { .. })
        ));
    }

    #[test]
    fn request_ceiling_covers_every_document_at_its_limit() {
        let policy = AttachmentPolicy::default();

        assert_eq!(
            policy.max_request_bytes(),
            5 * 5 * 1024 * 1024 + 64 * 1024
        );
        assert!(policy.max_request_bytes() > 64 * 1024);
    }

    #[test]
    fn request_ceiling_saturates() {
        let policy = AttachmentPolicy {
            max_document_bytes: u64::MAX,
            max_documents: 2,
        };

        assert_eq!(policy.max_request_bytes(), usize::MAX);
    }
}
