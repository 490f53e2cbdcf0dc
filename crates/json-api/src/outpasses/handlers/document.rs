//! Download Document Handler

use std::sync::Arc;

use salvo::{
    fs::NamedFile,
    http::mime::{self, Mime},
    oapi::extract::PathParam,
    prelude::*,
};
use uuid::Uuid;

use crate::{extensions::*, outpasses::errors::into_status_error, state::State};

/// Download Document Handler
///
/// Streams a document attached to an out-pass visible to the caller.
#[endpoint(
    tags("outpasses"),
    summary = "Download Document",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Document contents"),
        (status_code = StatusCode::FORBIDDEN, description = "Outside the admin's scope"),
        (status_code = StatusCode::NOT_FOUND, description = "Out-pass or document not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    outpass: PathParam<Uuid>,
    index: PathParam<usize>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?.clone();

    let found = state
        .app
        .outpasses
        .document(principal, outpass.into_inner().into(), index.into_inner())
        .await
        .map_err(into_status_error)?;

    let content_type = found
        .document
        .media_type
        .parse::<Mime>()
        .unwrap_or(mime::APPLICATION_OCTET_STREAM);

    NamedFile::builder(found.location)
        .attached_name(found.document.name)
        .content_type(content_type)
        .send(req.headers(), res)
        .await;

    Ok(())
}
