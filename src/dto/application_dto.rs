use serde::{Deserialize, Serialize};

use crate::models::application::Application;
use crate::models::job::Job;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    pub job_id: i64,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerIdQuery {
    pub worker_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateApplicationPayload {
    pub status: Option<String>,
    pub employer_notes: Option<String>,
    pub requested_documents: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateApplicationDetailsPayload {
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: Application,
    pub job: Job,
}

/// What an employer sees about the person behind an application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub skills: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithApplicant {
    #[serde(flatten)]
    pub application: Application,
    pub job: Job,
    pub applicant: ApplicantProfile,
}
