use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::Job;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Salary is required"))]
    pub salary: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateJobQuery {
    pub employer_id: Option<i64>,
}

/// Job joined with the posting employer's identity for the search view.
/// Missing employer data degrades to "Unknown" instead of failing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithEmployer {
    #[serde(flatten)]
    pub job: Job,
    pub employer_name: String,
    pub company_name: String,
    pub designation: String,
    pub industry: String,
}
