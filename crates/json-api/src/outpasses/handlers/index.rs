//! Out-pass Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use outpass_app::domain::outpasses::records::ApprovalStatus;

use crate::{
    extensions::*,
    outpasses::{errors::into_status_error, models::OutPassesResponse},
    state::State,
};

/// Out-pass Index Handler
///
/// Returns the out-passes visible to the caller, optionally narrowed by
/// approval `status`. Students see their own, admins their department,
/// year and section, security the out-passes approved today.
#[endpoint(
    tags("outpasses"),
    summary = "List Out-passes",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Scoped out-passes"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin scope is incomplete"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OutPassesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?.clone();

    let status = status
        .into_inner()
        .map(|status| status.trim().parse::<ApprovalStatus>())
        .transpose()
        .or_400("could not parse \"status\" query parameter")?;

    let outpasses = state
        .app
        .outpasses
        .list_outpasses(principal, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(outpasses.into()))
}
