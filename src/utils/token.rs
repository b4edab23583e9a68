use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::User;

const TOKEN_TTL_DAYS: i64 = 7;

pub fn issue_token(user: &User) -> Result<String> {
    let config = get_config();
    let exp = Utc::now() + Duration::days(TOKEN_TTL_DAYS);
    let claims = Claims {
        sub: user.id.to_string(),
        exp: exp.timestamp() as usize,
        role: Some(user.role.clone()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}
