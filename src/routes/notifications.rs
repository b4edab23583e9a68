use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::{error::Result, AppState};

pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let notifications = state.notification_service.list_for_user(user_id).await?;
    Ok(Json(notifications))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.notification_service.mark_read(id).await?;
    Ok(Json(json!({ "message": "Notification marked as read" })))
}
