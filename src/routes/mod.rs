pub mod applications;
pub mod auth;
pub mod health;
pub mod jobs;
pub mod notifications;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::AppState;

/// The full /api surface. Layers (CORS, tracing, rate limiting) are
/// applied by the caller so tests can drive the bare routes.
pub fn api_router() -> Router<AppState> {
    let authenticated = Router::new()
        .route("/api/user", get(auth::current_user))
        .route_layer(axum::middleware::from_fn(
            crate::middleware::auth::require_bearer_auth,
        ));

    Router::new()
        .route("/api/register/worker", post(auth::register_worker))
        .route("/api/register/employer", post(auth::register_employer))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/applications", post(applications::submit_application))
        .route(
            "/api/applications/worker/:worker_id",
            get(applications::worker_applications),
        )
        .route(
            "/api/applications/employer/:employer_id",
            get(applications::employer_applications),
        )
        .route(
            "/api/applications/:id",
            patch(applications::update_application),
        )
        .route(
            "/api/applications/:id/details",
            patch(applications::update_application_details),
        )
        .route(
            "/api/notifications/:id",
            get(notifications::list_notifications),
        )
        .route(
            "/api/notifications/:id/read",
            post(notifications::mark_notification_read),
        )
        .merge(authenticated)
}
