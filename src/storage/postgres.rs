use sqlx::PgPool;

use crate::error::Result;
use crate::models::application::{Application, ApplicationChanges, NewApplication};
use crate::models::job::{Job, NewJob};
use crate::models::notification::{NewNotification, Notification};
use crate::models::profile::{EmployerProfile, NewEmployerProfile, NewWorkerProfile, WorkerProfile};
use crate::models::user::{NewUser, User};
use crate::storage::Storage;

const USER_COLUMNS: &str = "id, username, password, role, first_name, last_name, email, phone";
const JOB_COLUMNS: &str = "id, employer_id, title, description, location, salary, created_at";
const APPLICATION_COLUMNS: &str = "id, job_id, worker_id, status, applied_at, resume, \
     cover_letter, employer_notes, requested_documents";
const NOTIFICATION_COLUMNS: &str =
    "id, user_id, message, type, is_read, related_id, created_at";

pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password, role, first_name, last_name, email, phone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.username)
        .bind(user.password)
        .bind(user.role)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_worker_profile(&self, profile: NewWorkerProfile) -> Result<WorkerProfile> {
        let profile = sqlx::query_as::<_, WorkerProfile>(
            "INSERT INTO worker_profiles (user_id, skills) VALUES ($1, $2) \
             RETURNING id, user_id, skills",
        )
        .bind(profile.user_id)
        .bind(profile.skills)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn get_worker_profile(&self, user_id: i64) -> Result<Option<WorkerProfile>> {
        let profile = sqlx::query_as::<_, WorkerProfile>(
            "SELECT id, user_id, skills FROM worker_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn create_employer_profile(
        &self,
        profile: NewEmployerProfile,
    ) -> Result<EmployerProfile> {
        let profile = sqlx::query_as::<_, EmployerProfile>(
            "INSERT INTO employer_profiles (user_id, company_name, designation, industry) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_id, company_name, designation, industry",
        )
        .bind(profile.user_id)
        .bind(profile.company_name)
        .bind(profile.designation)
        .bind(profile.industry)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn get_employer_profile(&self, user_id: i64) -> Result<Option<EmployerProfile>> {
        let profile = sqlx::query_as::<_, EmployerProfile>(
            "SELECT id, user_id, company_name, designation, industry \
             FROM employer_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn create_job(&self, job: NewJob) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (employer_id, title, description, location, salary) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            JOB_COLUMNS
        ))
        .bind(job.employer_id)
        .bind(job.title)
        .bind(job.description)
        .bind(job.location)
        .bind(job.salary)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    async fn get_job(&self, id: i64) -> Result<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs ORDER BY id",
            JOB_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn list_jobs_by_employer(&self, employer_id: i64) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE employer_id = $1 ORDER BY id",
            JOB_COLUMNS
        ))
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn create_application(&self, application: NewApplication) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (job_id, worker_id, status, resume, cover_letter) \
             VALUES ($1, $2, 'pending', $3, $4) \
             RETURNING {}",
            APPLICATION_COLUMNS
        ))
        .bind(application.job_id)
        .bind(application.worker_id)
        .bind(application.resume)
        .bind(application.cover_letter)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    async fn get_application(&self, id: i64) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn update_application(
        &self,
        id: i64,
        changes: ApplicationChanges,
    ) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET \
                 status = COALESCE($2, status), \
                 employer_notes = COALESCE($3, employer_notes), \
                 requested_documents = COALESCE($4, requested_documents), \
                 resume = COALESCE($5, resume), \
                 cover_letter = COALESCE($6, cover_letter) \
             WHERE id = $1 \
             RETURNING {}",
            APPLICATION_COLUMNS
        ))
        .bind(id)
        .bind(changes.status)
        .bind(changes.employer_notes)
        .bind(changes.requested_documents)
        .bind(changes.resume)
        .bind(changes.cover_letter)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn list_applications_by_worker(&self, worker_id: i64) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE worker_id = $1 ORDER BY id",
            APPLICATION_COLUMNS
        ))
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    async fn list_applications_by_job(&self, job_id: i64) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {} FROM applications WHERE job_id = $1 ORDER BY id",
            APPLICATION_COLUMNS
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    async fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "INSERT INTO notifications (user_id, message, type, related_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            NOTIFICATION_COLUMNS
        ))
        .bind(notification.user_id)
        .bind(notification.message)
        .bind(notification.kind)
        .bind(notification.related_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(notification)
    }

    async fn list_notifications_by_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {} FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            NOTIFICATION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    async fn mark_notification_read(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
