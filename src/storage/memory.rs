use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use crate::error::Result;
use crate::models::application::{Application, ApplicationChanges, NewApplication};
use crate::models::job::{Job, NewJob};
use crate::models::notification::{NewNotification, Notification};
use crate::models::profile::{EmployerProfile, NewEmployerProfile, NewWorkerProfile, WorkerProfile};
use crate::models::user::{NewUser, User};
use crate::storage::Storage;

struct Tables {
    users: HashMap<i64, User>,
    worker_profiles: HashMap<i64, WorkerProfile>,
    employer_profiles: HashMap<i64, EmployerProfile>,
    jobs: HashMap<i64, Job>,
    applications: HashMap<i64, Application>,
    notifications: HashMap<i64, Notification>,
    next_user_id: i64,
    next_worker_profile_id: i64,
    next_employer_profile_id: i64,
    next_job_id: i64,
    next_application_id: i64,
    next_notification_id: i64,
}

impl Tables {
    fn new() -> Self {
        Self {
            users: HashMap::new(),
            worker_profiles: HashMap::new(),
            employer_profiles: HashMap::new(),
            jobs: HashMap::new(),
            applications: HashMap::new(),
            notifications: HashMap::new(),
            next_user_id: 1,
            next_worker_profile_id: 1,
            next_employer_profile_id: 1,
            next_job_id: 1,
            next_application_id: 1,
            next_notification_id: 1,
        }
    }
}

/// HashMap-backed store. Used as the dev/test backend; every operation
/// takes the single lock, so writes are serialized the same way one
/// Postgres statement at a time would be.
pub struct MemStorage {
    inner: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Tables::new()),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn take_id(counter: &mut i64) -> i64 {
    let id = *counter;
    *counter += 1;
    id
}

#[async_trait::async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.inner.write().expect("storage lock poisoned");
        let id = take_id(&mut tables.next_user_id);
        let user = User {
            id,
            username: user.username,
            password: user.password,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn create_worker_profile(&self, profile: NewWorkerProfile) -> Result<WorkerProfile> {
        let mut tables = self.inner.write().expect("storage lock poisoned");
        let id = take_id(&mut tables.next_worker_profile_id);
        let profile = WorkerProfile {
            id,
            user_id: profile.user_id,
            skills: profile.skills,
        };
        tables.worker_profiles.insert(id, profile.clone());
        Ok(profile)
    }

    async fn get_worker_profile(&self, user_id: i64) -> Result<Option<WorkerProfile>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        Ok(tables
            .worker_profiles
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn create_employer_profile(
        &self,
        profile: NewEmployerProfile,
    ) -> Result<EmployerProfile> {
        let mut tables = self.inner.write().expect("storage lock poisoned");
        let id = take_id(&mut tables.next_employer_profile_id);
        let profile = EmployerProfile {
            id,
            user_id: profile.user_id,
            company_name: profile.company_name,
            designation: profile.designation,
            industry: profile.industry,
        };
        tables.employer_profiles.insert(id, profile.clone());
        Ok(profile)
    }

    async fn get_employer_profile(&self, user_id: i64) -> Result<Option<EmployerProfile>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        Ok(tables
            .employer_profiles
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn create_job(&self, job: NewJob) -> Result<Job> {
        let mut tables = self.inner.write().expect("storage lock poisoned");
        let id = take_id(&mut tables.next_job_id);
        let job = Job {
            id,
            employer_id: job.employer_id,
            title: job.title,
            description: job.description,
            location: job.location,
            salary: job.salary,
            created_at: Utc::now(),
        };
        tables.jobs.insert(id, job.clone());
        Ok(job)
    }

    async fn get_job(&self, id: i64) -> Result<Option<Job>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        Ok(tables.jobs.get(&id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        let mut jobs: Vec<Job> = tables.jobs.values().cloned().collect();
        jobs.sort_by_key(|j| j.id);
        Ok(jobs)
    }

    async fn list_jobs_by_employer(&self, employer_id: i64) -> Result<Vec<Job>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        let mut jobs: Vec<Job> = tables
            .jobs
            .values()
            .filter(|j| j.employer_id == employer_id)
            .cloned()
            .collect();
        jobs.sort_by_key(|j| j.id);
        Ok(jobs)
    }

    async fn create_application(&self, application: NewApplication) -> Result<Application> {
        let mut tables = self.inner.write().expect("storage lock poisoned");
        let id = take_id(&mut tables.next_application_id);
        let application = Application {
            id,
            job_id: application.job_id,
            worker_id: application.worker_id,
            status: "pending".to_string(),
            applied_at: Utc::now(),
            resume: application.resume,
            cover_letter: application.cover_letter,
            employer_notes: None,
            requested_documents: None,
        };
        tables.applications.insert(id, application.clone());
        Ok(application)
    }

    async fn get_application(&self, id: i64) -> Result<Option<Application>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        Ok(tables.applications.get(&id).cloned())
    }

    async fn update_application(
        &self,
        id: i64,
        changes: ApplicationChanges,
    ) -> Result<Option<Application>> {
        let mut tables = self.inner.write().expect("storage lock poisoned");
        let Some(application) = tables.applications.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(status) = changes.status {
            application.status = status;
        }
        if let Some(notes) = changes.employer_notes {
            application.employer_notes = Some(notes);
        }
        if let Some(documents) = changes.requested_documents {
            application.requested_documents = Some(documents);
        }
        if let Some(resume) = changes.resume {
            application.resume = Some(resume);
        }
        if let Some(cover_letter) = changes.cover_letter {
            application.cover_letter = Some(cover_letter);
        }
        Ok(Some(application.clone()))
    }

    async fn list_applications_by_worker(&self, worker_id: i64) -> Result<Vec<Application>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        let mut applications: Vec<Application> = tables
            .applications
            .values()
            .filter(|a| a.worker_id == worker_id)
            .cloned()
            .collect();
        applications.sort_by_key(|a| a.id);
        Ok(applications)
    }

    async fn list_applications_by_job(&self, job_id: i64) -> Result<Vec<Application>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        let mut applications: Vec<Application> = tables
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        applications.sort_by_key(|a| a.id);
        Ok(applications)
    }

    async fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        let mut tables = self.inner.write().expect("storage lock poisoned");
        let id = take_id(&mut tables.next_notification_id);
        let notification = Notification {
            id,
            user_id: notification.user_id,
            message: notification.message,
            kind: notification.kind,
            is_read: false,
            related_id: notification.related_id,
            created_at: Utc::now(),
        };
        tables.notifications.insert(id, notification.clone());
        Ok(notification)
    }

    async fn list_notifications_by_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        let tables = self.inner.read().expect("storage lock poisoned");
        let mut notifications: Vec<Notification> = tables
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        // id breaks created_at ties so the order stays stable within a burst
        notifications.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(notifications)
    }

    async fn mark_notification_read(&self, id: i64) -> Result<()> {
        let mut tables = self.inner.write().expect("storage lock poisoned");
        if let Some(notification) = tables.notifications.get_mut(&id) {
            notification.is_read = true;
        }
        Ok(())
    }
}
