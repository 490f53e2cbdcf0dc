//! Out-pass History Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    outpasses::{errors::into_status_error, models::OutPassesResponse},
    state::State,
};

/// Out-pass History Handler
///
/// Returns the calling student's out-passes, newest first.
#[endpoint(
    tags("outpasses"),
    summary = "Out-pass History",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The student's out-passes"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not a student"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OutPassesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let student = depot.student_or_403()?;

    let outpasses = state
        .app
        .outpasses
        .history(student)
        .await
        .map_err(into_status_error)?;

    Ok(Json(outpasses.into()))
}
