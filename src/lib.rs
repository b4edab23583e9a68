pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use crate::services::{
    application_service::ApplicationService, job_service::JobService,
    notification_service::NotificationService, user_service::UserService,
};
use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let user_service = UserService::new(storage.clone());
        let job_service = JobService::new(storage.clone());
        let notification_service = NotificationService::new(storage.clone());
        let application_service =
            ApplicationService::new(storage.clone(), notification_service.clone());

        Self {
            storage,
            user_service,
            job_service,
            application_service,
            notification_service,
        }
    }
}
