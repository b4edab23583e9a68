use std::env;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
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

async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

/// Registers an employer with a "Mason" job and a worker; returns
/// (employer_id, job_id, worker_id).
async fn seed_marketplace(app: &Router) -> (i64, i64, i64) {
    let (status, employer) = request_json(
        app,
        "POST",
        "/api/register/employer",
        Some(json!({
            "username": "builderco",
            "password": "secret123",
            "confirmPassword": "secret123",
            "firstName": "Fatima",
            "lastName": "Hassan",
            "email": "builderco@example.com",
            "phone": "+971500000002",
            "companyName": "Hassan Construction",
            "designation": "HR Manager",
            "industry": "Construction"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let employer_id = employer["id"].as_i64().unwrap();

    let (status, job) = request_json(
        app,
        "POST",
        &format!("/api/jobs?employerId={}", employer_id),
        Some(json!({
            "title": "Mason",
            "description": "Bricklaying on a residential site",
            "location": "Dubai",
            "salary": "AED 2500/month"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let job_id = job["id"].as_i64().unwrap();

    let (status, worker) = request_json(
        app,
        "POST",
        "/api/register/worker",
        Some(json!({
            "username": "mason20",
            "password": "secret123",
            "confirmPassword": "secret123",
            "firstName": "Ravi",
            "lastName": "Kumar",
            "email": "mason20@example.com",
            "phone": "+971500000001",
            "skills": "masonry"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let worker_id = worker["id"].as_i64().unwrap();

    (employer_id, job_id, worker_id)
}

async fn submit_application(app: &Router, job_id: i64, worker_id: i64) -> i64 {
    let (status, application) = request_json(
        app,
        "POST",
        &format!("/api/applications?workerId={}", worker_id),
        Some(json!({ "jobId": job_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    application["id"].as_i64().unwrap()
}

async fn notifications_for(app: &Router, user_id: i64) -> Vec<JsonValue> {
    let (status, body) =
        request_json(app, "GET", &format!("/api/notifications/{}", user_id), None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().clone()
}

#[tokio::test]
async fn submitting_creates_pending_application_and_notifies_both_sides() {
    let state = test_state();
    let app = app(&state);
    let (employer_id, job_id, worker_id) = seed_marketplace(&app).await;

    let (status, application) = request_json(
        &app,
        "POST",
        &format!("/api/applications?workerId={}", worker_id),
        Some(json!({ "jobId": job_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(application["status"], "pending");
    assert_eq!(application["jobId"], job_id);
    assert_eq!(application["workerId"], worker_id);

    let employer_feed = notifications_for(&app, employer_id).await;
    assert_eq!(employer_feed.len(), 1);
    assert_eq!(
        employer_feed[0]["message"],
        "New application received for job: Mason"
    );
    assert_eq!(employer_feed[0]["type"], "job_application");
    assert_eq!(employer_feed[0]["isRead"], false);

    let worker_feed = notifications_for(&app, worker_id).await;
    assert_eq!(worker_feed.len(), 1);
    assert_eq!(
        worker_feed[0]["message"],
        "You have applied for the job: Mason"
    );
    assert_eq!(worker_feed[0]["type"], "application_submitted");
}

#[tokio::test]
async fn applying_to_a_missing_job_is_not_found() {
    let state = test_state();
    let app = app(&state);
    let (_, _, worker_id) = seed_marketplace(&app).await;

    let (status, body) = request_json(
        &app,
        "POST",
        &format!("/api/applications?workerId={}", worker_id),
        Some(json!({ "jobId": 404 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Job not found");

    let (status, applications) = request_json(
        &app,
        "GET",
        &format!("/api/applications/worker/{}", worker_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(applications.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_applications_are_allowed() {
    let state = test_state();
    let app = app(&state);
    let (_, job_id, worker_id) = seed_marketplace(&app).await;

    let first = submit_application(&app, job_id, worker_id).await;
    let second = submit_application(&app, job_id, worker_id).await;
    assert_ne!(first, second);

    let (_, applications) = request_json(
        &app,
        "GET",
        &format!("/api/applications/worker/{}", worker_id),
        None,
    )
    .await;
    assert_eq!(applications.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn accepting_with_documents_notifies_worker_with_the_request() {
    let state = test_state();
    let app = app(&state);
    let (_, job_id, worker_id) = seed_marketplace(&app).await;
    let application_id = submit_application(&app, job_id, worker_id).await;

    let (status, updated) = request_json(
        &app,
        "PATCH",
        &format!("/api/applications/{}", application_id),
        Some(json!({
            "status": "accepted",
            "employerNotes": "Bring ID",
            "requestedDocuments": "ID proof"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "accepted");
    assert_eq!(updated["employerNotes"], "Bring ID");
    assert_eq!(updated["requestedDocuments"], "ID proof");

    let feed = notifications_for(&app, worker_id).await;
    // newest first: the status notification precedes the submission one
    assert_eq!(feed.len(), 2);
    assert_eq!(
        feed[0]["message"],
        "Your application for \"Mason\" has been accepted. Please provide the following documents: ID proof"
    );
    assert_eq!(feed[0]["type"], "application_update");
    assert_eq!(feed[0]["relatedId"], application_id);
}

#[tokio::test]
async fn rejecting_notifies_worker_without_document_text() {
    let state = test_state();
    let app = app(&state);
    let (_, job_id, worker_id) = seed_marketplace(&app).await;
    let application_id = submit_application(&app, job_id, worker_id).await;

    let (status, _) = request_json(
        &app,
        "PATCH",
        &format!("/api/applications/{}", application_id),
        Some(json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let feed = notifications_for(&app, worker_id).await;
    assert_eq!(feed.len(), 2);
    let message = feed[0]["message"].as_str().unwrap();
    assert_eq!(message, "Your application for \"Mason\" has been rejected");
    assert!(!message.contains("documents"));
}

#[tokio::test]
async fn notes_only_update_notifies_worker() {
    let state = test_state();
    let app = app(&state);
    let (_, job_id, worker_id) = seed_marketplace(&app).await;
    let application_id = submit_application(&app, job_id, worker_id).await;

    let (status, updated) = request_json(
        &app,
        "PATCH",
        &format!("/api/applications/{}", application_id),
        Some(json!({ "employerNotes": "Interview on Monday" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "pending");

    let feed = notifications_for(&app, worker_id).await;
    assert_eq!(feed.len(), 2);
    assert_eq!(
        feed[0]["message"],
        "The employer has added notes to your application for \"Mason\""
    );
}

#[tokio::test]
async fn updating_a_missing_application_is_not_found() {
    let state = test_state();
    let app = app(&state);
    seed_marketplace(&app).await;

    let (status, body) = request_json(
        &app,
        "PATCH",
        "/api/applications/4242",
        Some(json!({ "status": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Application not found");
}

#[tokio::test]
async fn details_update_by_non_owner_is_forbidden_and_writes_nothing() {
    let state = test_state();
    let app = app(&state);
    let (_, job_id, worker_id) = seed_marketplace(&app).await;
    let application_id = submit_application(&app, job_id, worker_id).await;

    let (status, body) = request_json(
        &app,
        "PATCH",
        &format!(
            "/api/applications/{}/details?workerId={}",
            application_id,
            worker_id + 100
        ),
        Some(json!({ "resume": "stolen resume" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized");

    let (_, applications) = request_json(
        &app,
        "GET",
        &format!("/api/applications/worker/{}", worker_id),
        None,
    )
    .await;
    assert_eq!(applications[0]["resume"], JsonValue::Null);
}

#[tokio::test]
async fn details_update_notifies_the_employer() {
    let state = test_state();
    let app = app(&state);
    let (employer_id, job_id, worker_id) = seed_marketplace(&app).await;
    let application_id = submit_application(&app, job_id, worker_id).await;

    let (status, updated) = request_json(
        &app,
        "PATCH",
        &format!(
            "/api/applications/{}/details?workerId={}",
            application_id, worker_id
        ),
        Some(json!({
            "resume": "10 years of masonry experience",
            "coverLetter": "I am available immediately"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["resume"], "10 years of masonry experience");

    let feed = notifications_for(&app, employer_id).await;
    assert_eq!(feed.len(), 2);
    assert_eq!(
        feed[0]["message"],
        "A worker has updated their application for \"Mason\" with additional details"
    );
    assert_eq!(feed[0]["type"], "application_details_update");
}

#[tokio::test]
async fn worker_listing_embeds_the_job() {
    let state = test_state();
    let app = app(&state);
    let (_, job_id, worker_id) = seed_marketplace(&app).await;
    submit_application(&app, job_id, worker_id).await;

    let (status, applications) = request_json(
        &app,
        "GET",
        &format!("/api/applications/worker/{}", worker_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let applications = applications.as_array().unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["job"]["title"], "Mason");
    assert_eq!(applications[0]["job"]["location"], "Dubai");
}

#[tokio::test]
async fn employer_listing_includes_the_applicant_snapshot() {
    let state = test_state();
    let app = app(&state);
    let (employer_id, job_id, worker_id) = seed_marketplace(&app).await;
    submit_application(&app, job_id, worker_id).await;

    let (status, applications) = request_json(
        &app,
        "GET",
        &format!("/api/applications/employer/{}", employer_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let applications = applications.as_array().unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0]["job"]["title"], "Mason");

    let applicant = &applications[0]["applicant"];
    assert_eq!(applicant["id"], worker_id);
    assert_eq!(applicant["name"], "Ravi Kumar");
    assert_eq!(applicant["email"], "mason20@example.com");
    assert_eq!(applicant["phone"], "+971500000001");
    assert_eq!(applicant["skills"], "masonry");
}
