use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::job_dto::{CreateJobPayload, CreateJobQuery},
    error::{Error, Result},
    AppState,
};

pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_enriched().await?;
    Ok(Json(jobs))
}

pub async fn create_job(
    State(state): State<AppState>,
    Query(query): Query<CreateJobQuery>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let employer_id = query
        .employer_id
        .ok_or_else(|| Error::BadRequest("Employer ID is required".to_string()))?;
    payload.validate()?;
    let job = state.job_service.create(employer_id, payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}
