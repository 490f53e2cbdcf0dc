//! Document store errors.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("document path {0:?} is not a stored document")]
    InvalidPath(String),

    #[error("document storage i/o error")]
    Io(#[from] io::Error),
}
