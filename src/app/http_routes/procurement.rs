use super::common::{json_body, run_blocking, HttpError};
use super::identity::AuthUser;
use crate::app::state::AppState;
use crate::domain::procurement::ProcurementRecord;
use crate::i18n::t;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

// ==========================================
// Submission handlers
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/procurements
pub async fn save_procurement(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ProcurementRecord>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let record = json_body(payload)?;
    let api = state.procurement_api.clone();
    let id = run_blocking(move || api.save(&user.user_id, &record)).await?;

    Ok(Json(SaveResponse {
        success: true,
        id,
        message: t("procurement.saved"),
    }))
}

/// GET /api/procurements
pub async fn list_procurements(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpError> {
    let api = state.procurement_api.clone();
    let summaries = run_blocking(move || api.list(&user.user_id)).await?;
    Ok(Json(summaries))
}

/// GET /api/procurements/{id}
pub async fn get_procurement(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let api = state.procurement_api.clone();
    let record = run_blocking(move || api.get(&user.user_id, &id)).await?;
    Ok(Json(record))
}

/// DELETE /api/procurements/{id}
pub async fn delete_procurement(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let api = state.procurement_api.clone();
    run_blocking(move || api.delete(&user.user_id, &id)).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: t("procurement.deleted"),
    }))
}
