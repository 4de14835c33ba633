use anyhow::Result;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::config::Config;
use crate::models::user::Role;

/// Ensures the configured admin account exists. Runs once at startup, after
/// the schema bootstrap. Existing accounts are left untouched so a rotated
/// password is never silently reverted.
pub async fn ensure_admin(pool: &PgPool, config: &Config) -> Result<()> {
    if config.admin_password_is_default() {
        warn!(
            "Admin account '{}' uses the documented default password — not safe for production",
            config.admin_email
        );
    }

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&config.admin_email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(&config.admin_password)
        .map_err(|e| anyhow::anyhow!("failed to hash admin password: {e}"))?;
    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, full_name, role)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&config.admin_email)
    .bind(&password_hash)
    .bind("Administrator")
    .bind(Role::Admin.as_str())
    .execute(pool)
    .await?;

    info!("Seeded admin account '{}'", config.admin_email);
    Ok(())
}
