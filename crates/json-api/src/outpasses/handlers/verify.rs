//! Verify Out-pass Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    outpasses::{errors::into_status_error, models::OutPassResponse},
    state::State,
};

/// Verify Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyResponse {
    /// Whether an out-pass ready for check-out matched
    pub found: bool,

    /// The most recently approved match
    pub outpass: Option<OutPassResponse>,
}

/// Verify Out-pass Handler
///
/// Looks up an out-pass by id or roll number among those approved today
/// that have not been checked out yet.
#[endpoint(
    tags("outpasses"),
    summary = "Verify Out-pass",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Search result"),
        (status_code = StatusCode::BAD_REQUEST, description = "Blank query"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not security"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<VerifyResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let guard = depot.guard_or_403()?;

    let found = state
        .app
        .outpasses
        .verify(q.into_inner().unwrap_or_default())
        .await
        .map_err(into_status_error)?;

    tracing::info!(guard = %guard, found = found.is_some(), "out-pass verification");

    Ok(Json(VerifyResponse {
        found: found.is_some(),
        outpass: found.map(Into::into),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use outpass_app::{
        auth::Principal,
        domain::outpasses::{MockOutPassesService, OutPassesServiceError, records::OutPassUuid},
    };

    use crate::test_helpers::{
        admin_principal, guard_principal, make_outpass, outpasses_service,
    };

    use super::*;

    fn make_service(principal: Principal, outpasses: MockOutPassesService) -> Service {
        outpasses_service(
            principal,
            outpasses,
            Router::with_path("outpasses/verify").get(handler),
        )
    }

    #[tokio::test]
    async fn test_roll_number_match_is_returned() -> TestResult {
        let outpass = make_outpass(OutPassUuid::new());

        let mut outpasses = MockOutPassesService::new();

        outpasses
            .expect_verify()
            .once()
            .withf(|query| query == "21CS001")
            .return_once(move |_| Ok(Some(outpass)));

        let response: VerifyResponse =
            TestClient::get("http://example.com/outpasses/verify?q=21CS001")
                .send(&make_service(guard_principal(), outpasses))
                .await
                .take_json()
                .await?;

        assert!(response.found, "expected a match");
        assert_eq!(
            response.outpass.map(|outpass| outpass.roll_number),
            Some("21CS001".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_no_match_reports_not_found() -> TestResult {
        let mut outpasses = MockOutPassesService::new();

        outpasses
            .expect_verify()
            .once()
            .return_once(|_| Ok(None));

        let response: VerifyResponse =
            TestClient::get("http://example.com/outpasses/verify?q=99XX999")
                .send(&make_service(guard_principal(), outpasses))
                .await
                .take_json()
                .await?;

        assert!(!response.found, "expected no match");
        assert!(response.outpass.is_none(), "no record without a match");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_query_returns_400() -> TestResult {
        let mut outpasses = MockOutPassesService::new();

        outpasses
            .expect_verify()
            .once()
            .withf(String::is_empty)
            .return_once(|_| {
                Err(OutPassesServiceError::InvalidArgument(
                    "search query is required".to_string(),
                ))
            });

        let res = TestClient::get("http://example.com/outpasses/verify")
            .send(&make_service(guard_principal(), outpasses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_cannot_verify() -> TestResult {
        let mut outpasses = MockOutPassesService::new();

        outpasses.expect_verify().never();

        let res = TestClient::get("http://example.com/outpasses/verify?q=21CS001")
            .send(&make_service(admin_principal("CSE", "3", "A"), outpasses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
