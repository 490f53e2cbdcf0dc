//! Out-pass Errors

use salvo::http::StatusError;
use tracing::error;

use outpass_app::domain::outpasses::OutPassesServiceError;

pub(crate) fn into_status_error(error: OutPassesServiceError) -> StatusError {
    match error {
        OutPassesServiceError::NotFound => StatusError::not_found().brief("Out-pass not found"),
        OutPassesServiceError::Forbidden => {
            StatusError::forbidden().brief("Out-pass is outside your scope")
        }
        OutPassesServiceError::ScopeIncomplete(field) => StatusError::forbidden().brief(format!(
            "Admin scope is incomplete: {field} is missing from the session"
        )),
        OutPassesServiceError::InvalidArgument(message) => {
            StatusError::bad_request().brief(message)
        }
        OutPassesServiceError::InvalidReference
        | OutPassesServiceError::MissingRequiredData
        | OutPassesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid out-pass payload")
        }
        OutPassesServiceError::InvalidState(message) => StatusError::conflict().brief(message),
        OutPassesServiceError::Calendar(message) => {
            error!("failed to compute campus day: {message}");

            StatusError::internal_server_error()
        }
        OutPassesServiceError::Documents(source) => {
            error!("document storage failed: {source}");

            StatusError::internal_server_error()
        }
        OutPassesServiceError::Sql(source) => {
            error!("out-pass storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        let cases = [
            (OutPassesServiceError::NotFound, StatusCode::NOT_FOUND),
            (OutPassesServiceError::Forbidden, StatusCode::FORBIDDEN),
            (
                OutPassesServiceError::ScopeIncomplete("section"),
                StatusCode::FORBIDDEN,
            ),
            (
                OutPassesServiceError::InvalidArgument("reason is required".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (OutPassesServiceError::InvalidReference, StatusCode::BAD_REQUEST),
            (
                OutPassesServiceError::InvalidState("not approved".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                OutPassesServiceError::Calendar("overflow".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }

    #[test]
    fn scope_incomplete_is_distinguishable_from_forbidden() {
        let incomplete = into_status_error(OutPassesServiceError::ScopeIncomplete("year"));
        let forbidden = into_status_error(OutPassesServiceError::Forbidden);

        assert_ne!(incomplete.brief, forbidden.brief);
        assert!(incomplete.brief.contains("year"), "brief names the field");
    }
}
