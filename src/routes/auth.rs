use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::auth_dto::{
        EmployerRegistrationPayload, LoginPayload, LoginResponse, WorkerRegistrationPayload,
    },
    error::Result,
    middleware::auth::Claims,
    AppState,
};

pub async fn register_worker(
    State(state): State<AppState>,
    Json(payload): Json<WorkerRegistrationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register_worker(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn register_employer(
    State(state): State<AppState>,
    Json(payload): Json<EmployerRegistrationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register_employer(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, token) = state.user_service.login(payload).await?;
    Ok(Json(LoginResponse { user, token }))
}

/// Bearer tokens are stateless; logout is an acknowledgement the client
/// uses to drop its copy.
pub async fn logout() -> impl IntoResponse {
    Json(json!({ "message": "Logged out" }))
}

pub async fn current_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get_user(claims.user_id()?).await?;
    Ok(Json(user))
}
