//! Session-facing endpoints: the routing verdict, the countdown display, and
//! the explicit profile refresh that re-arms the watcher.

use axum::{Json, extract::State};
use std::sync::Arc;
use tower_sessions::Session;

use crate::routing::resolve_view;
use crate::session::{CountdownStatus, SessionPolicy};

use super::auth::{SESSION_EMAIL_KEY, SESSION_PROFILE_KEY, session_profile, session_token};
use super::{ApiError, ApiResponse, AppState, SessionResponse, ViewResponse};

/// GET /session/view
/// Routing verdict for whoever is asking. Deliberately outside the auth
/// middleware: an anonymous caller gets `unauthenticated`, and a profile
/// fetch failure degrades through the cascade rather than erroring.
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Json<ApiResponse<ViewResponse>> {
    // A force-terminated session routes as signed-out.
    let revoked = match session_token(&session).await {
        Some(token) => state.sessions().is_revoked(&token),
        None => false,
    };

    let email = if revoked {
        None
    } else {
        session.get::<String>(SESSION_EMAIL_KEY).await.unwrap_or(None)
    };

    let profile_id = session
        .get::<String>(SESSION_PROFILE_KEY)
        .await
        .unwrap_or(None);

    let profile = match (&profile_id, revoked) {
        (Some(id), false) => match state.auth().profile(id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("Error fetching profile for view: {e}");
                None
            }
        },
        _ => None,
    };

    let view = resolve_view(email.as_deref(), profile.as_ref(), &state.config().security);

    Json(ApiResponse::success(ViewResponse { view }))
}

/// GET /session/countdown
/// Countdown snapshot for the current session. Also outside the auth
/// middleware so an expired session can still read its final 0:00.
pub async fn get_countdown(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Json<ApiResponse<CountdownStatus>> {
    let status = match session_token(&session).await {
        Some(token) => state.sessions().countdown(&token),
        None => CountdownStatus::inactive(),
    };

    Json(ApiResponse::success(status))
}

/// POST /session/refresh
/// Re-read the profile and restart the watcher from the fresh snapshot. This
/// is the only way an admin's mid-session timer change reaches an open
/// session; there is no live subscription.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let profile = session_profile(&state, &session).await?;

    if let Some(token) = session_token(&session).await {
        state
            .sessions()
            .register(&token, SessionPolicy::from_profile(&profile));
    }

    let view = resolve_view(
        Some(profile.email.as_str()),
        Some(&profile),
        &state.config().security,
    );

    Ok(Json(ApiResponse::success(SessionResponse {
        profile: profile.into(),
        view,
    })))
}
