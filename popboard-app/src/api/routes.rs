use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use popboard_core::{parse_id_lenient, Popup, PopupRepository};
use std::sync::Arc;

use crate::api::dto::{DeleteOut, SaveOut};
use crate::api::error::{ApiError, ACTIVE_FAILED, DELETE_FAILED, LIST_FAILED, SAVE_FAILED};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn PopupRepository>,
}

pub async fn list_popups(State(st): State<Arc<AppState>>) -> Result<Json<Vec<Popup>>, ApiError> {
    let popups = st.repo.list().await.map_err(ApiError::with(LIST_FAILED))?;
    Ok(Json(popups))
}

pub async fn save_popup(
    State(st): State<Arc<AppState>>,
    Json(body): Json<Popup>,
) -> Result<Json<SaveOut>, ApiError> {
    let popup = st.repo.save(body).await.map_err(ApiError::with(SAVE_FAILED))?;
    tracing::info!(id = ?popup.id, "popup saved");
    Ok(Json(SaveOut {
        success: true,
        popup,
    }))
}

pub async fn delete_popup(
    State(st): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> Result<Json<DeleteOut>, ApiError> {
    delete_segment(&st, &raw).await
}

/// `DELETE /api/popups/active` shares its path with the active listing but
/// is still a delete by (non-numeric) id.
pub async fn delete_active_segment(State(st): State<Arc<AppState>>) -> Result<Json<DeleteOut>, ApiError> {
    delete_segment(&st, "active").await
}

/// Succeeds whenever the store is readable, matched or not. A segment that
/// holds no number removes nothing.
async fn delete_segment(st: &AppState, raw: &str) -> Result<Json<DeleteOut>, ApiError> {
    let id = parse_id_lenient(raw);
    let removed = st.repo.delete(id).await.map_err(ApiError::with(DELETE_FAILED))?;
    tracing::info!(id = ?id, removed, "popup delete");
    Ok(Json(DeleteOut { success: true }))
}

pub async fn active_popups(State(st): State<Arc<AppState>>) -> Result<Json<Vec<Popup>>, ApiError> {
    let today = Utc::now().date_naive();
    let popups = st
        .repo
        .list_active(today)
        .await
        .map_err(ApiError::with(ACTIVE_FAILED))?;
    Ok(Json(popups))
}
