use std::sync::Arc;

use crate::dto::job_dto::{CreateJobPayload, JobWithEmployer};
use crate::error::{Error, Result};
use crate::models::job::{Job, NewJob};
use crate::storage::Storage;

const UNKNOWN: &str = "Unknown";

#[derive(Clone)]
pub struct JobService {
    storage: Arc<dyn Storage>,
}

impl JobService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, employer_id: i64, payload: CreateJobPayload) -> Result<Job> {
        let employer = self
            .storage
            .get_user(employer_id)
            .await?
            .ok_or_else(|| Error::NotFound("Employer not found".to_string()))?;
        if employer.role != "employer" {
            return Err(Error::BadRequest(
                "Only employer accounts can post jobs".to_string(),
            ));
        }

        let job = self
            .storage
            .create_job(NewJob {
                employer_id,
                title: payload.title,
                description: payload.description,
                location: payload.location,
                salary: payload.salary,
            })
            .await?;
        tracing::info!(job_id = job.id, employer_id, "job posted");
        Ok(job)
    }

    /// Full table scan, fresh per call. Employer data is looked up per job
    /// and degrades to "Unknown" rather than failing the listing.
    pub async fn list_enriched(&self) -> Result<Vec<JobWithEmployer>> {
        let jobs = self.storage.list_jobs().await?;
        let mut enriched = Vec::with_capacity(jobs.len());
        for job in jobs {
            let employer = self.storage.get_user(job.employer_id).await?;
            let profile = self.storage.get_employer_profile(job.employer_id).await?;

            let employer_name = employer
                .map(|u| u.display_name())
                .unwrap_or_else(|| UNKNOWN.to_string());
            let (company_name, designation, industry) = match profile {
                Some(p) => (p.company_name, p.designation, p.industry),
                None => (
                    UNKNOWN.to_string(),
                    UNKNOWN.to_string(),
                    UNKNOWN.to_string(),
                ),
            };

            enriched.push(JobWithEmployer {
                job,
                employer_name,
                company_name,
                designation,
                industry,
            });
        }
        Ok(enriched)
    }
}
