use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    pub id: i64,
    pub user_id: i64,
    pub skills: String,
}

#[derive(Debug, Clone)]
pub struct NewWorkerProfile {
    pub user_id: i64,
    pub skills: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfile {
    pub id: i64,
    pub user_id: i64,
    pub company_name: String,
    pub designation: String,
    pub industry: String,
}

#[derive(Debug, Clone)]
pub struct NewEmployerProfile {
    pub user_id: i64,
    pub company_name: String,
    pub designation: String,
    pub industry: String,
}
