use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use session_server::{build_router, config::Settings, state::AppState};
use tower::ServiceExt;

fn test_app() -> (AppState, Router) {
    let mut settings = Settings::default();
    settings.cookie.secure = false;

    let state = AppState::new(&settings).unwrap();
    let app = build_router(state.clone());
    (state, app)
}

async fn body_json(resp: Response<Body>) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

/// `name=value` part of a Set-Cookie header, ready to send back.
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

fn login_request(username: &str) -> Request<Body> {
    Request::post("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "username": username }).to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_login_inspect_logout() {
    let (state, app) = test_app();

    let resp = app.clone().oneshot(login_request("john")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let issued = set_cookie(&resp);
    assert!(issued.contains("HttpOnly"));
    assert!(issued.contains("Max-Age=3600"));
    let cookie = cookie_pair(&issued);
    assert!(cookie.starts_with("session_id="));

    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "john");
    assert_eq!(state.store.len(), 1);

    for expected_visits in 1..=2 {
        let resp = app
            .clone()
            .oneshot(get_with_cookie("/api/v1/session", &cookie))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["visits"], expected_visits);
        assert_eq!(body["data"]["username"], "john");
    }

    let resp = app
        .clone()
        .oneshot(
            Request::post("/api/v1/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = set_cookie(&resp);
    assert!(cleared.starts_with("session_id=;"));
    assert!(cleared.contains("Max-Age=-1"));
    assert!(state.store.is_empty());

    let resp = app
        .oneshot(get_with_cookie("/api/v1/session", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_attributes_round_trip() {
    let (_state, app) = test_app();

    let resp = app.clone().oneshot(login_request("jane")).await.unwrap();
    let cookie = cookie_pair(&set_cookie(&resp));

    let resp = app
        .clone()
        .oneshot(
            Request::put("/api/v1/session/attributes/theme")
                .header(header::COOKIE, &cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"mode":"dark"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(get_with_cookie("/api/v1/session/attributes/theme", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["name"], "theme");
    assert_eq!(body["data"]["value"]["mode"], "dark");

    let resp = app
        .oneshot(get_with_cookie("/api/v1/session/attributes/missing", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_requests_without_session_are_rejected() {
    let (_state, app) = test_app();

    let resp = app
        .clone()
        .oneshot(Request::get("/api/v1/session").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["message"], "Session cookie missing");

    let resp = app
        .oneshot(get_with_cookie("/api/v1/session", "session_id=forged"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reserved_attributes_are_read_only() {
    let (_state, app) = test_app();

    let resp = app.clone().oneshot(login_request("john")).await.unwrap();
    let cookie = cookie_pair(&set_cookie(&resp));

    for name in ["visits", "username"] {
        let resp = app
            .clone()
            .oneshot(
                Request::put(format!("/api/v1/session/attributes/{}", name))
                    .header(header::COOKIE, &cookie)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#""lots""#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    // the visit counter still works after the rejected writes
    let resp = app
        .oneshot(get_with_cookie("/api/v1/session", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["visits"], 1);
    assert_eq!(body["data"]["username"], "john");
}

#[tokio::test]
async fn test_login_requires_username() {
    let (state, app) = test_app();

    let resp = app.oneshot(login_request("   ")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn test_health_reports_store_stats() {
    let (_state, app) = test_app();

    let resp = app.clone().oneshot(login_request("john")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["sessions"]["active_sessions"], 1);
}
