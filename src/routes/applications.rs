use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::application_dto::{
        CreateApplicationPayload, UpdateApplicationDetailsPayload, UpdateApplicationPayload,
        WorkerIdQuery,
    },
    error::{Error, Result},
    AppState,
};

pub async fn submit_application(
    State(state): State<AppState>,
    Query(query): Query<WorkerIdQuery>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let worker_id = query
        .worker_id
        .ok_or_else(|| Error::BadRequest("Worker ID is required".to_string()))?;
    let application = state
        .application_service
        .submit(worker_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn worker_applications(
    State(state): State<AppState>,
    Path(worker_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .list_for_worker(worker_id)
        .await?;
    Ok(Json(applications))
}

pub async fn employer_applications(
    State(state): State<AppState>,
    Path(employer_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .list_for_employer(employer_id)
        .await?;
    Ok(Json(applications))
}

pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.update(id, payload).await?;
    Ok(Json(application))
}

pub async fn update_application_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<WorkerIdQuery>,
    Json(payload): Json<UpdateApplicationDetailsPayload>,
) -> Result<impl IntoResponse> {
    let worker_id = query
        .worker_id
        .ok_or_else(|| Error::BadRequest("Worker ID is required".to_string()))?;
    let application = state
        .application_service
        .update_details(id, worker_id, payload)
        .await?;
    Ok(Json(application))
}
