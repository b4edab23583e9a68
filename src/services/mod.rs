pub mod application_service;
pub mod job_service;
pub mod notification_service;
pub mod user_service;
