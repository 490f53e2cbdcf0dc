//! Current Principal Handler

use salvo::prelude::*;

use crate::{auth::PrincipalResponse, extensions::*};

/// Current Principal Handler
///
/// Returns the caller's verified identity.
#[endpoint(tags("auth"), summary = "Current Principal", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PrincipalResponse>, StatusError> {
    let principal = depot.principal_or_401()?;

    Ok(Json(principal.into()))
}
