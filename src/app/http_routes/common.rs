use crate::api::error::{ApiError, ApiResult};
use crate::i18n::{t, t_with_args};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

// ==========================================
// Shared helpers: error mapping, blocking calls, body parsing
// ==========================================

/// Error body returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,

    /// Stable error code, see `ApiError::code`
    pub code: String,

    pub message: String,

    /// Extra data (validation violations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// ApiError on its way out as an HTTP response
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status = match &err {
            ApiError::InvalidInput(_)
            | ApiError::ValidationError { .. }
            | ApiError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(code = err.code(), error = %err, "request failed");
        }

        let body = ErrorResponse {
            success: false,
            code: err.code().to_string(),
            message: user_message(&err),
            details: match &err {
                ApiError::ValidationError { violations, .. } => {
                    Some(serde_json::json!({ "violations": violations }))
                }
                _ => None,
            },
        };

        Self { status, body }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Text shown to the caller; internals stay in the logs
fn user_message(err: &ApiError) -> String {
    match err {
        ApiError::InvalidInput(msg)
        | ApiError::UnsupportedFormat(msg)
        | ApiError::NotFound(msg)
        | ApiError::Forbidden(msg)
        | ApiError::RenderFailed(msg)
        | ApiError::BusinessRuleViolation(msg) => msg.clone(),
        ApiError::ValidationError { reason, .. } => reason.clone(),
        ApiError::Unauthenticated => t("auth.missing_user"),
        _ => t("common.internal_error"),
    }
}

/// Run a synchronous api call on the blocking pool
pub(super) async fn run_blocking<T, F>(f: F) -> Result<T, HttpError>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(HttpError::from),
        Err(e) => Err(ApiError::InternalError(format!("blocking task failed: {}", e)).into()),
    }
}

/// Unwrap a JSON body, reporting malformed input as a 400 in our error shape
pub(super) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        ApiError::InvalidInput(t_with_args(
            "request.invalid_body",
            &[("detail", &rejection.body_text())],
        ))
        .into()
    })
}

// ==========================================
// Health
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}
