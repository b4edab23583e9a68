use std::env;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use worklink_backend::storage::Storage;
use worklink_backend::{routes, storage::memory::MemStorage, AppState};

fn test_state() -> AppState {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("API_RPS", "1000");
    env::set_var("STORAGE_BACKEND", "memory");
    let _ = worklink_backend::config::init_config();
    AppState::new(Arc::new(MemStorage::new()))
}

fn app(state: &AppState) -> Router {
    routes::api_router().with_state(state.clone())
}

async fn post_json(app: &Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

fn worker_payload(username: &str) -> JsonValue {
    json!({
        "username": username,
        "password": "secret123",
        "confirmPassword": "secret123",
        "firstName": "Ravi",
        "lastName": "Kumar",
        "email": format!("{}@example.com", username),
        "phone": "+971500000001",
        "skills": "masonry, plumbing"
    })
}

fn employer_payload(username: &str) -> JsonValue {
    json!({
        "username": username,
        "password": "secret123",
        "confirmPassword": "secret123",
        "firstName": "Fatima",
        "lastName": "Hassan",
        "email": format!("{}@example.com", username),
        "phone": "+971500000002",
        "companyName": "Hassan Construction",
        "designation": "HR Manager",
        "industry": "Construction"
    })
}

#[tokio::test]
async fn worker_registration_creates_user_and_profile() {
    let state = test_state();
    let app = app(&state);

    let (status, body) = post_json(&app, "/api/register/worker", worker_payload("ravi")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "ravi");
    assert_eq!(body["role"], "worker");
    assert!(body.get("password").is_none(), "password must not be serialized");

    let user_id = body["id"].as_i64().unwrap();
    let profile = state
        .storage
        .get_worker_profile(user_id)
        .await
        .unwrap()
        .expect("worker profile created at registration");
    assert_eq!(profile.skills, "masonry, plumbing");
}

#[tokio::test]
async fn employer_registration_creates_user_and_profile() {
    let state = test_state();
    let app = app(&state);

    let (status, body) =
        post_json(&app, "/api/register/employer", employer_payload("fatima")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "employer");

    let user_id = body["id"].as_i64().unwrap();
    let profile = state
        .storage
        .get_employer_profile(user_id)
        .await
        .unwrap()
        .expect("employer profile created at registration");
    assert_eq!(profile.company_name, "Hassan Construction");
    assert_eq!(profile.designation, "HR Manager");
    assert_eq!(profile.industry, "Construction");
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let state = test_state();
    let app = app(&state);

    let (status, _) = post_json(&app, "/api/register/worker", worker_payload("dup")).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut second = worker_payload("dup");
    second["email"] = json!("other@example.com");
    let (status, body) = post_json(&app, "/api/register/worker", second).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("username"));

    // the failed attempt must not have created anything
    assert!(state
        .storage
        .get_user_by_email("other@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn mismatched_confirm_password_is_rejected() {
    let state = test_state();
    let app = app(&state);

    let mut payload = worker_payload("mismatch");
    payload["confirmPassword"] = json!("different");
    let (status, _) = post_json(&app, "/api/register/worker", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_issues_token_for_valid_credentials() {
    let state = test_state();
    let app = app(&state);

    let (status, registered) =
        post_json(&app, "/api/register/worker", worker_payload("amina")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        &app,
        "/api/login",
        json!({ "username": "amina", "password": "secret123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], registered["id"]);
    let token = body["token"].as_str().unwrap();
    assert!(!token.is_empty());

    let req = Request::builder()
        .method("GET")
        .uri("/api/user")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let me: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(me["username"], "amina");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let state = test_state();
    let app = app(&state);

    let (status, _) = post_json(&app, "/api/register/worker", worker_payload("hasan")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        &app,
        "/api/login",
        json!({ "username": "hasan", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn current_user_requires_a_token() {
    let state = test_state();
    let app = app(&state);

    let req = Request::builder()
        .method("GET")
        .uri("/api/user")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
