use std::sync::Arc;

use crate::dto::application_dto::{
    ApplicantProfile, ApplicationWithApplicant, ApplicationWithJob, CreateApplicationPayload,
    UpdateApplicationDetailsPayload, UpdateApplicationPayload,
};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationChanges, NewApplication};
use crate::models::notification::NewNotification;
use crate::services::notification_service::NotificationService;
use crate::storage::Storage;

const UNKNOWN: &str = "Unknown";

/// Builds the worker-facing message for an employer-side update, or `None`
/// when the update warrants no notification. Status strings other than
/// accepted/rejected pass through the store unchanged and only notify when
/// the employer attached notes.
pub fn status_change_message(
    job_title: &str,
    status: Option<&str>,
    employer_notes: Option<&str>,
    requested_documents: Option<&str>,
) -> Option<String> {
    match status {
        Some("accepted") => {
            let mut message = format!("Your application for \"{}\" has been accepted", job_title);
            if let Some(documents) = requested_documents {
                message.push_str(". Please provide the following documents: ");
                message.push_str(documents);
            }
            Some(message)
        }
        Some("rejected") => Some(format!(
            "Your application for \"{}\" has been rejected",
            job_title
        )),
        _ => employer_notes.map(|_| {
            format!(
                "The employer has added notes to your application for \"{}\"",
                job_title
            )
        }),
    }
}

/// Employer-facing message for a worker-side details update.
pub fn details_update_message(job_title: &str, has_cover_letter: bool) -> String {
    let mut message = format!("A worker has updated their application for \"{}\"", job_title);
    if has_cover_letter {
        message.push_str(" with additional details");
    }
    message
}

#[derive(Clone)]
pub struct ApplicationService {
    storage: Arc<dyn Storage>,
    notifications: NotificationService,
}

impl ApplicationService {
    pub fn new(storage: Arc<dyn Storage>, notifications: NotificationService) -> Self {
        Self {
            storage,
            notifications,
        }
    }

    /// Creates a pending application, then notifies both sides. The two
    /// notification inserts are independent writes; a failure after the
    /// application insert leaves it in place.
    pub async fn submit(
        &self,
        worker_id: i64,
        payload: CreateApplicationPayload,
    ) -> Result<Application> {
        let worker = self
            .storage
            .get_user(worker_id)
            .await?
            .ok_or_else(|| Error::NotFound("Worker not found".to_string()))?;
        let job = self
            .storage
            .get_job(payload.job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        let application = self
            .storage
            .create_application(NewApplication {
                job_id: job.id,
                worker_id: worker.id,
                resume: payload.resume,
                cover_letter: payload.cover_letter,
            })
            .await?;

        self.notifications
            .create(NewNotification {
                user_id: job.employer_id,
                message: format!("New application received for job: {}", job.title),
                kind: "job_application".to_string(),
                related_id: Some(application.id),
            })
            .await?;
        self.notifications
            .create(NewNotification {
                user_id: worker.id,
                message: format!("You have applied for the job: {}", job.title),
                kind: "application_submitted".to_string(),
                related_id: Some(application.id),
            })
            .await?;

        tracing::info!(
            application_id = application.id,
            job_id = job.id,
            worker_id,
            "application submitted"
        );
        Ok(application)
    }

    /// Employer-side update: status, notes, document requests. Repeating the
    /// same update re-sends the notification; nothing is deduplicated.
    pub async fn update(&self, id: i64, payload: UpdateApplicationPayload) -> Result<Application> {
        let updated = self
            .storage
            .update_application(
                id,
                ApplicationChanges {
                    status: payload.status.clone(),
                    employer_notes: payload.employer_notes.clone(),
                    requested_documents: payload.requested_documents.clone(),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        match self.storage.get_job(updated.job_id).await? {
            Some(job) => {
                let message = status_change_message(
                    &job.title,
                    payload.status.as_deref(),
                    payload.employer_notes.as_deref(),
                    payload.requested_documents.as_deref(),
                );
                if let Some(message) = message {
                    self.notifications
                        .create(NewNotification {
                            user_id: updated.worker_id,
                            message,
                            kind: "application_update".to_string(),
                            related_id: Some(updated.id),
                        })
                        .await?;
                }
            }
            None => {
                tracing::warn!(
                    application_id = id,
                    job_id = updated.job_id,
                    "job missing, skipping application update notification"
                );
            }
        }

        Ok(updated)
    }

    /// Worker-side update of resume/cover letter. The caller must own the
    /// application; a mismatch rejects before anything is written.
    pub async fn update_details(
        &self,
        id: i64,
        worker_id: i64,
        payload: UpdateApplicationDetailsPayload,
    ) -> Result<Application> {
        let application = self
            .storage
            .get_application(id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        if application.worker_id != worker_id {
            return Err(Error::Forbidden("Not authorized".to_string()));
        }

        let updated = self
            .storage
            .update_application(
                id,
                ApplicationChanges {
                    resume: payload.resume.clone(),
                    cover_letter: payload.cover_letter.clone(),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        match self.storage.get_job(application.job_id).await? {
            Some(job) => {
                self.notifications
                    .create(NewNotification {
                        user_id: job.employer_id,
                        message: details_update_message(&job.title, payload.cover_letter.is_some()),
                        kind: "application_details_update".to_string(),
                        related_id: Some(updated.id),
                    })
                    .await?;
            }
            None => {
                tracing::warn!(
                    application_id = id,
                    job_id = application.job_id,
                    "job missing, skipping details update notification"
                );
            }
        }

        Ok(updated)
    }

    pub async fn list_for_worker(&self, worker_id: i64) -> Result<Vec<ApplicationWithJob>> {
        let applications = self.storage.list_applications_by_worker(worker_id).await?;
        let mut result = Vec::with_capacity(applications.len());
        for application in applications {
            let Some(job) = self.storage.get_job(application.job_id).await? else {
                tracing::warn!(
                    application_id = application.id,
                    job_id = application.job_id,
                    "application references a missing job, skipping"
                );
                continue;
            };
            result.push(ApplicationWithJob { application, job });
        }
        Ok(result)
    }

    pub async fn list_for_employer(
        &self,
        employer_id: i64,
    ) -> Result<Vec<ApplicationWithApplicant>> {
        let jobs = self.storage.list_jobs_by_employer(employer_id).await?;
        let mut result = Vec::new();
        for job in jobs {
            let applications = self.storage.list_applications_by_job(job.id).await?;
            for application in applications {
                let applicant = self.applicant_snapshot(application.worker_id).await?;
                result.push(ApplicationWithApplicant {
                    application,
                    job: job.clone(),
                    applicant,
                });
            }
        }
        Ok(result)
    }

    async fn applicant_snapshot(&self, worker_id: i64) -> Result<ApplicantProfile> {
        let user = self.storage.get_user(worker_id).await?;
        let profile = self.storage.get_worker_profile(worker_id).await?;

        let (name, phone, email) = match user {
            Some(u) => (u.display_name(), u.phone, u.email),
            None => (
                UNKNOWN.to_string(),
                UNKNOWN.to_string(),
                UNKNOWN.to_string(),
            ),
        };
        let skills = profile
            .map(|p| p.skills)
            .unwrap_or_else(|| UNKNOWN.to_string());

        Ok(ApplicantProfile {
            id: worker_id,
            name,
            phone,
            email,
            skills,
        })
    }
}
