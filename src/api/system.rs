use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiResponse, AppState, SystemStatus};

/// GET /system/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SystemStatus>> {
    let total_profiles = match state.store().list_profiles().await {
        Ok(profiles) => profiles.len(),
        Err(e) => {
            tracing::error!("Error counting profiles: {e}");
            0
        }
    };

    let database_ok = state.store().ping().await.is_ok();

    Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        total_profiles,
        database_ok,
    }))
}
