//! Set Out-status Handler

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

use outpass_app::domain::outpasses::records::OutStatus;

use crate::{
    extensions::*,
    observability::record_transition,
    outpasses::{errors::into_status_error, models::OutPassResponse},
    state::State,
};

/// Out-status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OutStatusRequest {
    /// `Approved` once the student has left campus
    pub out_status: String,
}

/// Set Out-status Handler
///
/// Records at the gate that the student has left. Only out-passes approved
/// today qualify; repeating the check-out is a no-op.
#[endpoint(
    tags("outpasses"),
    summary = "Set Out-status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Out-status recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown out-status"),
        (status_code = StatusCode::FORBIDDEN, description = "Not security, or not approved today"),
        (status_code = StatusCode::NOT_FOUND, description = "Out-pass not found"),
        (status_code = StatusCode::CONFLICT, description = "Out-pass is not approved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "outpasses.out_status",
    skip(outpass, json, depot),
    fields(
        guard_uuid = tracing::field::Empty,
        outpass_uuid = tracing::field::Empty,
        target = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    outpass: PathParam<Uuid>,
    json: JsonBody<OutStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OutPassResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let guard = depot.guard_or_403()?;
    let outpass = outpass.into_inner();

    let target = json
        .into_inner()
        .out_status
        .trim()
        .parse::<OutStatus>()
        .or_400("could not parse \"out_status\"")?;

    let span = tracing::Span::current();

    span.record("guard_uuid", tracing::field::display(guard));
    span.record("outpass_uuid", tracing::field::display(outpass));
    span.record("target", target.as_str());

    let updated = state
        .app
        .outpasses
        .set_out_status(guard, outpass.into(), target)
        .await
        .map_err(into_status_error)?;

    record_transition("out_status", target.as_str());

    Ok(Json(updated.into()))
}
