//! Repository for the `admins` table.

use sevadesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin::{Admin, CreateAdmin, UpdateAdminProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, phone, profile_image, role, \
                        created_at, updated_at";

/// Provides CRUD operations for administrators.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new administrator, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (name, email, password_hash, phone, profile_image, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(&input.profile_image)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find an administrator by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an administrator by login email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE email = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find the oldest administrator carrying the given role, if any.
    ///
    /// Used by the startup bootstrap to adopt an existing record when the
    /// configured email changed between deployments.
    pub async fn find_first_by_role(
        pool: &PgPool,
        role: &str,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE role = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Patch an administrator's profile. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdminProfile,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!(
            "UPDATE admins SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                profile_image = COALESCE($5, profile_image),
                password_hash = COALESCE($6, password_hash),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.profile_image)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite an administrator's login email and password hash.
    ///
    /// Startup-bootstrap only; never reachable from a request handler.
    pub async fn update_credentials(
        pool: &PgPool,
        id: DbId,
        email: &str,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE admins SET email = $2, password_hash = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(())
    }
}
