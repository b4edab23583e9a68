use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub employer_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub employer_id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: String,
}
