use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tower_sessions::Session;
use uuid::Uuid;

use crate::models::Profile;
use crate::routing::resolve_view;
use crate::session::SessionPolicy;

use super::{
    ApiError, ApiResponse, AppState, LoginRequest, ProfileDto, SessionResponse, SignupRequest,
};

/// Session key holding the signed-in profile id.
pub const SESSION_PROFILE_KEY: &str = "profile_id";
/// Session key holding the identity email. Kept separately from the profile
/// so routing still has an identity when a profile fetch fails.
pub const SESSION_EMAIL_KEY: &str = "email";
/// Session key holding the token the watcher registry tracks.
pub const SESSION_TOKEN_KEY: &str = "token";

// ============================================================================
// Middleware
// ============================================================================

/// Requires a signed-in session whose token has not been force-terminated by
/// the session watcher.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let profile_id = session
        .get::<String>(SESSION_PROFILE_KEY)
        .await
        .unwrap_or(None);

    let Some(profile_id) = profile_id else {
        return Ok((StatusCode::UNAUTHORIZED, "Unauthorized").into_response());
    };

    if let Ok(Some(token)) = session.get::<String>(SESSION_TOKEN_KEY).await
        && state.sessions().is_revoked(&token)
    {
        // The watcher already ended this session; finish the sign-out on the
        // cookie side. Failures are logged, never retried.
        state.sessions().deregister(&token);
        if let Err(e) = session.flush().await {
            tracing::warn!("failed to flush expired session: {e}");
        }
        return Ok((StatusCode::UNAUTHORIZED, "Session expired").into_response());
    }

    tracing::Span::current().record("user_id", &profile_id);
    Ok(next.run(request).await)
}

/// Requires the session profile to be an admin (by role or allow-listed
/// email). Layered on top of `auth_middleware`.
pub async fn admin_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let profile = session_profile(&state, &session).await?;

    let allow_listed = state.config().security.is_admin_email(&profile.email);
    if profile.role != crate::models::Role::Admin && !allow_listed {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/signup
/// Create an account. Role, plan and credits are assigned from the admin
/// allow-list; the caller still has to log in afterwards.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<ApiResponse<ProfileDto>>, ApiError> {
    let profile = state
        .auth()
        .sign_up(&payload.email, &payload.password, payload.company)
        .await?;

    Ok(Json(ApiResponse::success(profile.into())))
}

/// POST /auth/login
/// Verify credentials, open a session, and start the expiry watcher when the
/// profile carries a timer. Suspended accounts are bounced before any session
/// exists.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let profile = state.auth().sign_in(&payload.email, &payload.password).await?;

    let token = Uuid::new_v4().to_string();
    session
        .insert(SESSION_PROFILE_KEY, &profile.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_EMAIL_KEY, &profile.email)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_TOKEN_KEY, &token)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    state
        .sessions()
        .register(&token, SessionPolicy::from_profile(&profile));

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

/// POST /auth/logout
/// End the session and stop its watcher. Errors are logged only.
pub async fn logout(State(state): State<Arc<AppState>>, session: Session) -> impl IntoResponse {
    if let Ok(Some(token)) = session.get::<String>(SESSION_TOKEN_KEY).await {
        state.sessions().deregister(&token);
    }
    if let Err(e) = session.flush().await {
        tracing::warn!("failed to flush session on logout: {e}");
    }
    (StatusCode::OK, "Logged out")
}

/// GET /auth/me
/// Current profile (requires authentication).
pub async fn get_current_profile(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<ProfileDto>>, ApiError> {
    let profile = session_profile(&state, &session).await?;
    Ok(Json(ApiResponse::success(profile.into())))
}

// ============================================================================
// Helpers
// ============================================================================

/// Load the profile bound to the session, or fail with 401.
pub async fn session_profile(
    state: &Arc<AppState>,
    session: &Session,
) -> Result<Profile, ApiError> {
    let profile_id = session
        .get::<String>(SESSION_PROFILE_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    state
        .auth()
        .profile(&profile_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Profile not found".to_string()))
}

/// Read the watcher token for the current session, if any.
pub async fn session_token(session: &Session) -> Option<String> {
    session.get::<String>(SESSION_TOKEN_KEY).await.unwrap_or(None)
}
