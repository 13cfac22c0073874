use super::common::{run_blocking, HttpError};
use super::identity::AuthUser;
use crate::app::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

// ==========================================
// Admin dashboard handler
// ==========================================

/// GET /api/admin/stats
pub async fn admin_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpError> {
    let api = state.dashboard_api.clone();
    let stats = run_blocking(move || api.get_stats(user.role)).await?;
    Ok(Json(stats))
}
