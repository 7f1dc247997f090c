//! Repository for the `applications` and `application_documents` tables.

use std::collections::HashMap;

use sevadesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{
    Application, ApplicationDocument, ApplicationWithDocuments, CreateApplication, CreateDocument,
    UpdateApplication,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_name, phone, service_id, service_name, \
                        message, status, version, created_at, updated_at";

const DOC_COLUMNS: &str =
    "id, application_id, original_name, stored_name, mime_type, size_bytes, uploaded_at";

/// Provides CRUD operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application with its documents in one transaction.
    ///
    /// The status column is left to its `'pending'` default; documents
    /// attach atomically -- a failed document insert rolls back the
    /// application row as well.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
        documents: &[CreateDocument],
    ) -> Result<ApplicationWithDocuments, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO applications (customer_name, phone, service_id, service_name, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(&input.customer_name)
            .bind(&input.phone)
            .bind(&input.service_id)
            .bind(&input.service_name)
            .bind(&input.message)
            .fetch_one(&mut *tx)
            .await?;

        let doc_query = format!(
            "INSERT INTO application_documents
                (application_id, original_name, stored_name, mime_type, size_bytes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {DOC_COLUMNS}"
        );
        let mut docs = Vec::with_capacity(documents.len());
        for doc in documents {
            let row = sqlx::query_as::<_, ApplicationDocument>(&doc_query)
                .bind(application.id)
                .bind(&doc.original_name)
                .bind(&doc.stored_name)
                .bind(&doc.mime_type)
                .bind(doc.size_bytes)
                .fetch_one(&mut *tx)
                .await?;
            docs.push(row);
        }

        tx.commit().await?;

        Ok(ApplicationWithDocuments {
            application,
            documents: docs,
        })
    }

    /// List all applications, most recently submitted first, with their
    /// documents attached.
    ///
    /// Documents are fetched in a single `= ANY` query and grouped in
    /// memory to avoid one query per application.
    pub async fn list(pool: &PgPool) -> Result<Vec<ApplicationWithDocuments>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications ORDER BY created_at DESC");
        let applications = sqlx::query_as::<_, Application>(&query)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = applications.iter().map(|a| a.id).collect();
        let mut grouped = Self::documents_grouped(pool, &ids).await?;

        Ok(applications
            .into_iter()
            .map(|application| {
                let documents = grouped.remove(&application.id).unwrap_or_default();
                ApplicationWithDocuments {
                    application,
                    documents,
                }
            })
            .collect())
    }

    /// Find a single application with documents by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ApplicationWithDocuments>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        let Some(application) = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let mut grouped = Self::documents_grouped(pool, &[id]).await?;
        let documents = grouped.remove(&id).unwrap_or_default();

        Ok(Some(ApplicationWithDocuments {
            application,
            documents,
        }))
    }

    /// Check whether an application row exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM applications WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Patch an application. Only non-`None` fields in `input` are applied;
    /// every successful patch bumps `version` and touches `updated_at`.
    ///
    /// When `expected_version` is given, the patch only applies if the
    /// stored version still matches. Returns `None` if no row matched
    /// (absent id, or version mismatch -- use [`Self::exists`] to tell
    /// the two apart).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApplication,
        expected_version: Option<i64>,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                customer_name = COALESCE($2, customer_name),
                phone = COALESCE($3, phone),
                message = COALESCE($4, message),
                status = COALESCE($5, status),
                service_id = COALESCE($6, service_id),
                service_name = COALESCE($7, service_name),
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND ($8::BIGINT IS NULL OR version = $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(&input.customer_name)
            .bind(&input.phone)
            .bind(&input.message)
            .bind(&input.status)
            .bind(&input.service_id)
            .bind(&input.service_name)
            .bind(expected_version)
            .fetch_optional(pool)
            .await
    }

    /// Set an application's status, bumping `version` and `updated_at`.
    ///
    /// Same `None`-on-miss contract as [`Self::update`].
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        expected_version: Option<i64>,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                status = $2,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND ($3::BIGINT IS NULL OR version = $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status)
            .bind(expected_version)
            .fetch_optional(pool)
            .await
    }

    /// Physically delete one application (documents cascade).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a set of applications in one statement, returning the count
    /// actually removed (which may be less than `ids.len()` when some ids
    /// did not exist).
    pub async fn delete_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Fetch the documents owned by one application, in upload order.
    pub async fn documents_for(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<ApplicationDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {DOC_COLUMNS} FROM application_documents
             WHERE application_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, ApplicationDocument>(&query)
            .bind(application_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch documents for a set of applications, grouped by owner id.
    async fn documents_grouped(
        pool: &PgPool,
        application_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ApplicationDocument>>, sqlx::Error> {
        if application_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!(
            "SELECT {DOC_COLUMNS} FROM application_documents
             WHERE application_id = ANY($1)
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, ApplicationDocument>(&query)
            .bind(application_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<ApplicationDocument>> = HashMap::new();
        for row in rows {
            grouped.entry(row.application_id).or_default().push(row);
        }
        Ok(grouped)
    }
}
