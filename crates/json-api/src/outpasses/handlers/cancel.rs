//! Cancel Out-pass Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, outpasses::errors::into_status_error, state::State};

/// Cancel Out-pass Handler
///
/// Deletes one of the calling student's pending out-passes.
#[endpoint(
    tags("outpasses"),
    summary = "Cancel Out-pass",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Out-pass cancelled"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the caller's out-pass"),
        (status_code = StatusCode::NOT_FOUND, description = "Out-pass not found"),
        (status_code = StatusCode::CONFLICT, description = "Out-pass is no longer pending"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "outpasses.cancel",
    skip(outpass, depot),
    fields(
        student_uuid = tracing::field::Empty,
        outpass_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    outpass: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let student = depot.student_or_403()?;
    let outpass = outpass.into_inner();

    let span = tracing::Span::current();

    span.record("student_uuid", tracing::field::display(student));
    span.record("outpass_uuid", tracing::field::display(outpass));

    state
        .app
        .outpasses
        .cancel(student, outpass.into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
