//! Administrator bootstrap from deployment configuration.
//!
//! Runs exactly once at startup, after migrations and before the listener
//! binds. This is an idempotent upsert, not a user-facing mutation path:
//! the configured credentials always win, so rotating `ADMIN_PASSWORD`
//! in the environment takes effect on the next boot.

use sevadesk_core::roles::ROLE_ADMIN;
use sevadesk_db::models::admin::CreateAdmin;
use sevadesk_db::repositories::AdminRepo;
use sevadesk_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Create or sync the administrator record from `config.bootstrap_admin`.
///
/// Resolution order:
/// 1. A record with the configured email: password re-hashed and synced.
/// 2. Otherwise the oldest `admin`-role record: adopted, its email and
///    password overwritten (covers a changed `ADMIN_EMAIL` between
///    deployments without growing a second administrator).
/// 3. Otherwise a fresh record is created.
///
/// Skipped entirely when no bootstrap credentials are configured.
pub async fn ensure_admin(pool: &DbPool, config: &ServerConfig) -> AppResult<()> {
    let Some(bootstrap) = &config.bootstrap_admin else {
        tracing::info!("No ADMIN_EMAIL/ADMIN_PASSWORD set, skipping admin bootstrap");
        return Ok(());
    };

    let password_hash = hash_password(&bootstrap.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if let Some(admin) = AdminRepo::find_by_email(pool, &bootstrap.email).await? {
        AdminRepo::update_credentials(pool, admin.id, &bootstrap.email, &password_hash).await?;
        tracing::info!(email = %bootstrap.email, "Admin password synced from environment");
        return Ok(());
    }

    if let Some(admin) = AdminRepo::find_first_by_role(pool, ROLE_ADMIN).await? {
        AdminRepo::update_credentials(pool, admin.id, &bootstrap.email, &password_hash).await?;
        tracing::info!(
            previous = %admin.email,
            email = %bootstrap.email,
            "Adopted existing admin and updated credentials from environment"
        );
        return Ok(());
    }

    let input = CreateAdmin {
        name: "Admin User".to_string(),
        email: bootstrap.email.clone(),
        password_hash,
        phone: "+91 00000 00000".to_string(),
        profile_image: String::new(),
        role: ROLE_ADMIN.to_string(),
    };
    let admin = AdminRepo::create(pool, &input).await?;
    tracing::info!(admin_id = admin.id, email = %admin.email, "Admin created from environment");

    Ok(())
}
