pub mod memory;
pub mod postgres;

use crate::error::Result;
use crate::models::application::{Application, ApplicationChanges, NewApplication};
use crate::models::job::{Job, NewJob};
use crate::models::notification::{NewNotification, Notification};
use crate::models::profile::{EmployerProfile, NewEmployerProfile, NewWorkerProfile, WorkerProfile};
use crate::models::user::{NewUser, User};

/// Persistence port. Handlers and services are written against this trait
/// so the backing store (in-memory or Postgres) is chosen at startup.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create_user(&self, user: NewUser) -> Result<User>;

    async fn create_worker_profile(&self, profile: NewWorkerProfile) -> Result<WorkerProfile>;
    async fn get_worker_profile(&self, user_id: i64) -> Result<Option<WorkerProfile>>;
    async fn create_employer_profile(&self, profile: NewEmployerProfile)
        -> Result<EmployerProfile>;
    async fn get_employer_profile(&self, user_id: i64) -> Result<Option<EmployerProfile>>;

    async fn create_job(&self, job: NewJob) -> Result<Job>;
    async fn get_job(&self, id: i64) -> Result<Option<Job>>;
    async fn list_jobs(&self) -> Result<Vec<Job>>;
    async fn list_jobs_by_employer(&self, employer_id: i64) -> Result<Vec<Job>>;

    /// Status is always "pending" on creation; the caller cannot override it.
    async fn create_application(&self, application: NewApplication) -> Result<Application>;
    async fn get_application(&self, id: i64) -> Result<Option<Application>>;
    /// Applies the non-`None` fields of `changes`. Returns `None` for an
    /// unknown id; nothing is written in that case.
    async fn update_application(
        &self,
        id: i64,
        changes: ApplicationChanges,
    ) -> Result<Option<Application>>;
    async fn list_applications_by_worker(&self, worker_id: i64) -> Result<Vec<Application>>;
    async fn list_applications_by_job(&self, job_id: i64) -> Result<Vec<Application>>;

    async fn create_notification(&self, notification: NewNotification) -> Result<Notification>;
    /// Newest first.
    async fn list_notifications_by_user(&self, user_id: i64) -> Result<Vec<Notification>>;
    /// No-op when the id is unknown or the notification is already read.
    async fn mark_notification_read(&self, id: i64) -> Result<()>;
}
