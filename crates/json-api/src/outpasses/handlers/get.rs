//! Get Out-pass Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    outpasses::{errors::into_status_error, models::OutPassResponse},
    state::State,
};

/// Get Out-pass Handler
///
/// Returns an out-pass visible to the caller.
#[endpoint(
    tags("outpasses"),
    summary = "Get Out-pass",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The out-pass"),
        (status_code = StatusCode::FORBIDDEN, description = "Outside the admin's scope"),
        (status_code = StatusCode::NOT_FOUND, description = "Out-pass not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    outpass: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OutPassResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?.clone();

    let outpass = state
        .app
        .outpasses
        .get_outpass(principal, outpass.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(outpass.into()))
}
