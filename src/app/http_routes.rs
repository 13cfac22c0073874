// ==========================================
// BQC Generator - HTTP routes (split by domain)
// ==========================================
// Responsibility: axum router and handlers; handlers are thin
// and delegate to the api layer on the blocking pool
// ==========================================

mod common;
mod dashboard;
mod document;
mod identity;
mod procurement;

pub use common::{health_check, ErrorResponse, HealthResponse, HttpError};
pub use dashboard::*;
pub use document::*;
pub use identity::{AuthUser, USER_ID_HEADER, USER_ROLE_HEADER};
pub use procurement::*;

use crate::app::state::AppState;
use crate::config::AppConfig;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Build the API router with all endpoints
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // Submissions
        .route(
            "/api/procurements",
            post(save_procurement).get(list_procurements),
        )
        .route(
            "/api/procurements/{id}",
            get(get_procurement).delete(delete_procurement),
        )
        // Document generation
        .route("/api/generate-document", post(generate_document))
        // Admin
        .route("/api/admin/stats", get(admin_stats))
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::CONTENT_DISPOSITION])
}
