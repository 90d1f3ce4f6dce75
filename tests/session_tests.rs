//! End-to-end session-expiry behavior: watcher-driven forced sign-out, the
//! countdown display surface, and the refresh-to-apply timer semantics.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use leadgrid::config::Config;
use leadgrid::db::Store;
use leadgrid::entities::profiles;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use std::time::Duration;
use tower::ServiceExt;

async fn spawn_app() -> (Router, Store) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.server.secure_cookies = false;

    let shared = std::sync::Arc::new(
        leadgrid::state::SharedState::new(config)
            .await
            .expect("Failed to create shared state"),
    );
    let store = shared.store.clone();
    let state = leadgrid::api::create_app_state(shared, None);
    (leadgrid::api::router(state), store)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> axum::http::Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn session_cookie(response: &axum::http::Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string()
}

async fn signup_tenant(app: &Router, email: &str) -> String {
    let response = send(
        app,
        "POST",
        "/api/auth/signup",
        None,
        Some(serde_json::json!({
            "email": email,
            "password": "hunter22",
            "company": "Acme",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn login(app: &Router, email: &str) -> String {
    let response = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": "hunter22" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

/// Write timer fields directly, placing the session start in the past. This
/// is how the tests reach the "deadline already passed" state without
/// sleeping through a real timer.
async fn backdate_timer(store: &Store, id: &str, minutes: u32, started_ago_secs: i64) {
    let model = profiles::Entity::find_by_id(id)
        .one(&store.conn)
        .await
        .unwrap()
        .expect("profile");
    let started = chrono::Utc::now() - chrono::Duration::seconds(started_ago_secs);

    let mut active: profiles::ActiveModel = model.into();
    active.session_timeout = Set(Some(i32::try_from(minutes).unwrap()));
    active.session_started_at = Set(Some(started.to_rfc3339()));
    active.update(&store.conn).await.unwrap();
}

#[tokio::test]
async fn expired_timer_forces_exactly_one_sign_out() {
    let (app, store) = spawn_app().await;
    let tenant_id = signup_tenant(&app, "acme@example.com").await;

    // One-minute timer that already ran out two minutes ago.
    backdate_timer(&store, &tenant_id, 1, 120).await;

    let cookie = login(&app, "acme@example.com").await;

    // The watcher's first tick fires immediately.
    tokio::time::sleep(Duration::from_millis(1500)).await;

    // The countdown surface still answers, pinned at zero.
    let response = send(&app, "GET", "/api/session/countdown", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["expired"], true);
    assert_eq!(body["data"]["remaining_ms"], 0);
    assert_eq!(body["data"]["display"], "0:00");

    // Routing treats the terminated session as signed out.
    let response = send(&app, "GET", "/api/session/view", Some(&cookie), None).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["view"], "unauthenticated");

    // Authenticated surfaces reject the dead session.
    let response = send(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn live_timer_counts_down_without_signing_out() {
    let (app, store) = spawn_app().await;
    let tenant_id = signup_tenant(&app, "acme@example.com").await;

    // 30-minute timer started 10 seconds ago: plenty of runway.
    backdate_timer(&store, &tenant_id, 30, 10).await;

    let cookie = login(&app, "acme@example.com").await;
    tokio::time::sleep(Duration::from_millis(1200)).await;

    let response = send(&app, "GET", "/api/session/countdown", Some(&cookie), None).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["active"], true);
    assert_eq!(body["data"]["expired"], false);
    assert_eq!(body["data"]["critical"], false);
    let remaining = body["data"]["remaining_ms"].as_u64().unwrap();
    assert!(remaining > 0 && remaining <= 30 * 60 * 1000);

    // Session stays usable.
    let response = send(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn countdown_is_inactive_without_a_timer() {
    let (app, _store) = spawn_app().await;
    signup_tenant(&app, "acme@example.com").await;

    let cookie = login(&app, "acme@example.com").await;
    let response = send(&app, "GET", "/api/session/countdown", Some(&cookie), None).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["active"], false);
    assert_eq!(body["data"]["expired"], false);
}

#[tokio::test]
async fn admin_sessions_are_never_monitored() {
    let (app, store) = spawn_app().await;

    let response = send(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(serde_json::json!({
            "email": "admin@gmail.com",
            "password": "hunter22",
        })),
    )
    .await;
    let admin_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Timer fields present on an admin record are ignored by the monitor.
    backdate_timer(&store, &admin_id, 1, 120).await;

    let cookie = login(&app, "admin@gmail.com").await;
    tokio::time::sleep(Duration::from_millis(1200)).await;

    let response = send(&app, "GET", "/api/session/countdown", Some(&cookie), None).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["active"], false);

    let response = send(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn timer_changes_apply_on_refresh_not_instantly() {
    let (app, store) = spawn_app().await;
    let tenant_id = signup_tenant(&app, "acme@example.com").await;

    let cookie = login(&app, "acme@example.com").await;

    let response = send(&app, "GET", "/api/session/countdown", Some(&cookie), None).await;
    assert_eq!(body_json(response).await["data"]["active"], false);

    // Admin assigns a timer while the tenant session is open: no effect until
    // the session re-reads its profile.
    store
        .set_profile_session_timer(&tenant_id, Some(30))
        .await
        .unwrap();

    let response = send(&app, "GET", "/api/session/countdown", Some(&cookie), None).await;
    assert_eq!(body_json(response).await["data"]["active"], false);

    let response = send(&app, "POST", "/api/session/refresh", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["profile"]["session_timeout"], 30);

    let response = send(&app, "GET", "/api/session/countdown", Some(&cookie), None).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["active"], true);
    assert_eq!(body["data"]["expired"], false);
}

#[tokio::test]
async fn exhausted_trial_routes_to_the_upgrade_view() {
    let (app, store) = spawn_app().await;
    let tenant_id = signup_tenant(&app, "acme@example.com").await;

    // Burn through the trial credits.
    let model = profiles::Entity::find_by_id(&tenant_id)
        .one(&store.conn)
        .await
        .unwrap()
        .expect("profile");
    let mut active: profiles::ActiveModel = model.into();
    active.credits = Set(0);
    active.update(&store.conn).await.unwrap();

    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "email": "acme@example.com", "password": "hunter22" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let body = body_json(response).await;
    assert_eq!(body["data"]["view"], "upgrade_required");

    let response = send(&app, "GET", "/api/tenant/workspace", Some(&cookie), None).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["upgrade_required"], true);
    assert_eq!(body["data"]["sections"], serde_json::json!([]));
}
