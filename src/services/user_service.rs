use std::sync::Arc;

use crate::dto::auth_dto::{EmployerRegistrationPayload, LoginPayload, WorkerRegistrationPayload};
use crate::error::{Error, Result};
use crate::models::profile::{NewEmployerProfile, NewWorkerProfile};
use crate::models::user::{NewUser, User};
use crate::storage::Storage;
use crate::utils::{crypto, token};

#[derive(Clone)]
pub struct UserService {
    storage: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn register_worker(&self, payload: WorkerRegistrationPayload) -> Result<User> {
        self.ensure_unique(&payload.username, &payload.email).await?;

        let user = self
            .storage
            .create_user(NewUser {
                username: payload.username,
                password: crypto::hash_password(&payload.password)?,
                role: "worker".to_string(),
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
                phone: payload.phone,
            })
            .await?;

        self.storage
            .create_worker_profile(NewWorkerProfile {
                user_id: user.id,
                skills: payload.skills,
            })
            .await?;

        tracing::info!(user_id = user.id, "worker registered");
        Ok(user)
    }

    pub async fn register_employer(&self, payload: EmployerRegistrationPayload) -> Result<User> {
        self.ensure_unique(&payload.username, &payload.email).await?;

        let user = self
            .storage
            .create_user(NewUser {
                username: payload.username,
                password: crypto::hash_password(&payload.password)?,
                role: "employer".to_string(),
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
                phone: payload.phone,
            })
            .await?;

        self.storage
            .create_employer_profile(NewEmployerProfile {
                user_id: user.id,
                company_name: payload.company_name,
                designation: payload.designation,
                industry: payload.industry,
            })
            .await?;

        tracing::info!(user_id = user.id, "employer registered");
        Ok(user)
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<(User, String)> {
        // Same message for unknown user and bad password.
        let invalid = || Error::Unauthorized("Invalid username or password".to_string());

        let user = self
            .storage
            .get_user_by_username(&payload.username)
            .await?
            .ok_or_else(invalid)?;

        if !crypto::verify_password(&payload.password, &user.password)? {
            return Err(invalid());
        }

        let token = token::issue_token(&user)?;
        Ok((user, token))
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.storage
            .get_user(id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    async fn ensure_unique(&self, username: &str, email: &str) -> Result<()> {
        if self
            .storage
            .get_user_by_username(username)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(
                "A user with this username already exists".to_string(),
            ));
        }
        if self.storage.get_user_by_email(email).await?.is_some() {
            return Err(Error::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        Ok(())
    }
}
