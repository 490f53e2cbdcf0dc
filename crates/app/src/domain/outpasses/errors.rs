//! Out-passes service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{
    documents::DocumentStoreError,
    domain::outpasses::{
        policy::AttachmentRejection, scope::ScopeError, transitions::TransitionError,
    },
};

#[derive(Debug, Error)]
pub enum OutPassesServiceError {
    #[error("out-pass not found")]
    NotFound,

    #[error("out-pass is outside the caller's scope")]
    Forbidden,

    /// Admin claims lack a scoping field; nothing is listed or changed.
    #[error("admin scope is incomplete: missing {0}")]
    ScopeIncomplete(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid reference")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("calendar error: {0}")]
    Calendar(String),

    #[error("document storage error")]
    Documents(#[from] DocumentStoreError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OutPassesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<ScopeError> for OutPassesServiceError {
    fn from(error: ScopeError) -> Self {
        match error {
            ScopeError::Incomplete(field) => Self::ScopeIncomplete(field),
            ScopeError::Calendar(message) => Self::Calendar(message),
        }
    }
}

impl From<TransitionError> for OutPassesServiceError {
    fn from(error: TransitionError) -> Self {
        match error {
            TransitionError::OutOfScope | TransitionError::NotApprovedToday => Self::Forbidden,
            TransitionError::NotApproved | TransitionError::AlreadyCheckedOut => {
                Self::InvalidState(error.to_string())
            }
        }
    }
}

impl From<AttachmentRejection> for OutPassesServiceError {
    fn from(error: AttachmentRejection) -> Self {
        Self::InvalidArgument(error.to_string())
    }
}
