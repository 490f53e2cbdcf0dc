//! Apply For Out-pass Handler

use std::sync::Arc;

use salvo::{
    http::{ParseError, header::LOCATION},
    prelude::*,
};

use outpass_app::{documents::DocumentUpload, domain::outpasses::data::NewOutPass};

use crate::{
    extensions::*,
    outpasses::{errors::into_status_error, models::OutPassResponse},
    state::State,
};

const DOCUMENTS_FIELD: &str = "documents";
const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Apply For Out-pass Handler
///
/// Accepts `multipart/form-data` with `reason_type`, `reason`, an optional
/// `contact_number` and any number of `documents` files.
#[endpoint(
    tags("outpasses"),
    summary = "Apply For Out-pass",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Out-pass created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing field or rejected document"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not a student"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "outpasses.apply",
    skip(req, depot, res),
    fields(student_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OutPassResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let student = depot.student_or_403()?;

    tracing::Span::current().record("student_uuid", tracing::field::display(student));

    let limit = state.attachments.max_request_bytes();

    let form = match req.form_data_max_size(limit).await {
        Ok(form) => form,
        Err(ParseError::PayloadTooLarge) => {
            return Err(StatusError::bad_request()
                .brief(format!("Upload exceeds the {limit} byte request limit")));
        }
        Err(error) => return Err(error).or_400("Expected a multipart form"),
    };

    let field = |name: &str| form.fields.get(name).cloned();

    let application = NewOutPass {
        reason_type: field("reason_type").unwrap_or_default(),
        reason: field("reason").unwrap_or_default(),
        contact_number: field("contact_number"),
    };

    let parts = form
        .files
        .get_vec(DOCUMENTS_FIELD)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut uploads = Vec::with_capacity(parts.len());

    for part in parts {
        uploads.push(DocumentUpload {
            file_name: part.name().unwrap_or(DOCUMENTS_FIELD).to_string(),
            media_type: part.content_type().map_or_else(
                || UNKNOWN_MEDIA_TYPE.to_string(),
                |mime| mime.essence_str().to_string(),
            ),
            bytes: tokio::fs::read(part.path())
                .await
                .or_500("failed to read uploaded document")?,
        });
    }

    let outpass = state
        .app
        .outpasses
        .apply(student, application, uploads)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/outpasses/{}", outpass.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(outpass.into()))
}
