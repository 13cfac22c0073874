use super::common::{json_body, run_blocking, HttpError};
use super::identity::AuthUser;
use crate::api::document_api::{GenerateDocumentRequest, GeneratedDocument};
use crate::app::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

// ==========================================
// Document generation handler
// ==========================================

/// POST /api/generate-document
///
/// Body `{ data, format }`; responds with the file as an attachment.
/// Requires an identified user like every other data route.
pub async fn generate_document(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<GenerateDocumentRequest>, JsonRejection>,
) -> Result<Response, HttpError> {
    let request = json_body(payload)?;
    tracing::debug!(user_id = %user.user_id, format = %request.format, "document requested");
    let api = state.document_api.clone();
    let document = run_blocking(move || api.generate(&request)).await?;
    Ok(attachment_response(document))
}

pub fn attachment_response(document: GeneratedDocument) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    let disposition = HeaderValue::from_bytes(disposition.as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(document.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, HeaderValue::from(document.bytes.len())),
        ],
        document.bytes,
    )
        .into_response()
}
