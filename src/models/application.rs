use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub worker_id: i64,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub employer_notes: Option<String>,
    pub requested_documents: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: i64,
    pub worker_id: i64,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ApplicationChanges {
    pub status: Option<String>,
    pub employer_notes: Option<String>,
    pub requested_documents: Option<String>,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}
