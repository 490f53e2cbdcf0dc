//! Dashboard Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    outpasses::{errors::into_status_error, models::DashboardResponse},
    state::State,
};

/// Dashboard Handler
///
/// Returns the caller's scoped listing together with counters computed
/// from that same listing.
#[endpoint(
    tags("outpasses"),
    summary = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Scoped listing and counters"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is a student, or admin scope is incomplete"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DashboardResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.staff_or_403()?.clone();

    let dashboard = state
        .app
        .outpasses
        .dashboard(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(dashboard.into()))
}
