//! Auth Errors

use salvo::http::StatusError;
use tracing::{debug, error};

use outpass_app::auth::{AuthServiceError, TokenError};

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::Token(source @ (TokenError::Signing(_) | TokenError::Lifetime(_))) => {
            error!("failed to issue session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            debug!("bearer token rejected: {source}");

            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::Password(source) => {
            error!("failed to verify password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to load credentials: {source}");

            StatusError::internal_server_error()
        }
    }
}
