//! Admin directory endpoints. All of these sit behind the admin guard.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use crate::services::DirectoryQuery;

use super::{ApiError, ApiResponse, AppState, DirectoryDto, ProfileDto, TimerRequest};

/// GET /admin/profiles?search=&status=
/// One explicit directory fetch. A failed read is logged and degrades to an
/// empty listing instead of erroring the console.
pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DirectoryQuery>,
) -> Json<ApiResponse<DirectoryDto>> {
    match state.directory().snapshot(&query).await {
        Ok(snapshot) => Json(ApiResponse::success(snapshot.into())),
        Err(e) => {
            tracing::error!("Error fetching directory: {e}");
            Json(ApiResponse::success(DirectoryDto::empty()))
        }
    }
}

/// POST /admin/profiles/{id}/toggle-status
/// Flip active <-> suspended. Mutation errors surface as the response error;
/// nothing changes on failure.
pub async fn toggle_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProfileDto>>, ApiError> {
    let profile = state.directory().toggle_status(&id).await?;
    Ok(Json(ApiResponse::success(profile.into())))
}

/// PUT /admin/profiles/{id}/session-timer
/// Set or clear the session timer. Setting stamps the session start; clearing
/// removes both fields together.
pub async fn set_session_timer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<TimerRequest>,
) -> Result<Json<ApiResponse<ProfileDto>>, ApiError> {
    let profile = state
        .directory()
        .set_session_timer(&id, payload.minutes)
        .await?;
    Ok(Json(ApiResponse::success(profile.into())))
}
