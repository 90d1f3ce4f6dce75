//! Tenant workspace surface: what the sub-admin shell renders.

use axum::{Json, extract::State};
use std::sync::Arc;
use tower_sessions::Session;

use crate::models::Role;

use super::auth::session_profile;
use super::{ApiError, ApiResponse, AppState, WorkspaceDto};

/// Sections available in the tenant shell.
const SECTIONS: [&str; 3] = ["dashboard", "leads", "campaigns"];

/// GET /tenant/workspace
/// Profile summary plus available sections for the signed-in tenant. Admins
/// have their own console and are not served here.
pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<WorkspaceDto>>, ApiError> {
    let profile = session_profile(&state, &session).await?;

    if profile.role == Role::Admin {
        return Err(ApiError::Forbidden(
            "Admins use the admin console".to_string(),
        ));
    }

    let upgrade_required = profile.trial_exhausted();

    Ok(Json(ApiResponse::success(WorkspaceDto {
        company: profile.company,
        email: profile.email,
        plan: profile.plan.as_str().to_string(),
        credits: profile.credits,
        sections: if upgrade_required {
            Vec::new()
        } else {
            SECTIONS.to_vec()
        },
        upgrade_required,
    })))
}
