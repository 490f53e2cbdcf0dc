//! Decide Out-pass Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outpass_app::domain::outpasses::records::ApprovalStatus;

use crate::{
    extensions::*,
    observability::record_transition,
    outpasses::{errors::into_status_error, models::OutPassResponse},
    state::State,
};

/// Decision Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DecisionRequest {
    /// `Pending`, `Approved` or `Rejected`
    pub status: String,
}

/// Decide Out-pass Handler
///
/// Sets the approval status of an out-pass in the admin's scope. Setting
/// `Pending` withdraws an earlier decision.
#[endpoint(
    tags("outpasses"),
    summary = "Decide Out-pass",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Decision recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an admin, scope incomplete, or outside scope"),
        (status_code = StatusCode::NOT_FOUND, description = "Out-pass not found"),
        (status_code = StatusCode::CONFLICT, description = "Student has already checked out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "outpasses.decide",
    skip(outpass, json, depot),
    fields(
        admin_uuid = tracing::field::Empty,
        outpass_uuid = tracing::field::Empty,
        target = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    outpass: PathParam<Uuid>,
    json: JsonBody<DecisionRequest>,
    depot: &mut Depot,
) -> Result<Json<OutPassResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_403()?.clone();
    let outpass = outpass.into_inner();

    let target = json
        .into_inner()
        .status
        .trim()
        .parse::<ApprovalStatus>()
        .or_400("could not parse \"status\"")?;

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin.uuid));
    span.record("outpass_uuid", tracing::field::display(outpass));
    span.record("target", target.as_str());

    let updated = state
        .app
        .outpasses
        .decide(admin, outpass.into(), target)
        .await
        .map_err(into_status_error)?;

    record_transition("approval", target.as_str());

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use outpass_app::{
        auth::Principal,
        domain::outpasses::{
            MockOutPassesService, OutPassesServiceError,
            records::{Decision, DecisionStamp, OutPassUuid},
        },
    };

    use crate::test_helpers::{
        admin_principal, guard_principal, make_outpass, outpasses_service,
    };

    use super::*;

    fn make_service(principal: Principal, outpasses: MockOutPassesService) -> Service {
        outpasses_service(
            principal,
            outpasses,
            Router::with_path("outpasses/{outpass}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_approve_returns_stamped_record() -> TestResult {
        let uuid = OutPassUuid::new();
        let mut approved = make_outpass(uuid);
        approved.decision = Decision::Approved(DecisionStamp {
            by: "Dr. Menon".to_string(),
            at: Timestamp::UNIX_EPOCH,
        });

        let mut outpasses = MockOutPassesService::new();

        outpasses
            .expect_decide()
            .once()
            .withf(move |admin, outpass, target| {
                admin.department == "CSE" && *outpass == uuid && *target == ApprovalStatus::Approved
            })
            .return_once(move |_, _, _| Ok(approved));

        let mut res = TestClient::put(format!("http://example.com/outpasses/{uuid}/status"))
            .json(&json!({ "status": "Approved" }))
            .send(&make_service(admin_principal("CSE", "3", "A"), outpasses))
            .await;

        let body: OutPassResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.approval_status, "Approved");
        assert_eq!(body.approved_by.as_deref(), Some("Dr. Menon"));
        assert_eq!(body.decision_by.as_deref(), Some("Dr. Menon"));
        assert_eq!(body.rejected_by, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400_without_mutation() -> TestResult {
        let uuid = OutPassUuid::new();

        let mut outpasses = MockOutPassesService::new();

        outpasses.expect_decide().never();

        let res = TestClient::put(format!("http://example.com/outpasses/{uuid}/status"))
            .json(&json!({ "status": "Maybe" }))
            .send(&make_service(admin_principal("CSE", "3", "A"), outpasses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_scope_returns_403() -> TestResult {
        let uuid = OutPassUuid::new();

        let mut outpasses = MockOutPassesService::new();

        outpasses
            .expect_decide()
            .once()
            .return_once(|_, _, _| Err(OutPassesServiceError::Forbidden));

        let res = TestClient::put(format!("http://example.com/outpasses/{uuid}/status"))
            .json(&json!({ "status": "Rejected" }))
            .send(&make_service(admin_principal("MECH", "1", "B"), outpasses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_security_cannot_decide() -> TestResult {
        let uuid = OutPassUuid::new();

        let mut outpasses = MockOutPassesService::new();

        outpasses.expect_decide().never();

        let res = TestClient::put(format!("http://example.com/outpasses/{uuid}/status"))
            .json(&json!({ "status": "Approved" }))
            .send(&make_service(guard_principal(), outpasses))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
