use crate::config::get_config;
use crate::error::{Error, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn create_pool() -> Result<PgPool> {
    let config = get_config();
    let url = config.database_url.as_deref().ok_or_else(|| {
        Error::Config("DATABASE_URL must be set for the postgres backend".to_string())
    })?;
    let pool = PgPoolOptions::new()
        .max_connections(50)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(url)
        .await?;
    Ok(pool)
}
