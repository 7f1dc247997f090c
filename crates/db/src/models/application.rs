//! Application entity model and DTOs.

use serde::Serialize;
use sevadesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full application row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: DbId,
    pub customer_name: String,
    pub phone: String,
    /// Opaque reference into the service catalog; not a foreign key.
    pub service_id: String,
    /// Snapshot of the service's display name at submission time.
    pub service_name: String,
    pub message: Option<String>,
    pub status: String,
    /// Monotonic counter bumped on every mutation.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One document row from the `application_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDocument {
    pub id: DbId,
    pub application_id: DbId,
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub uploaded_at: Timestamp,
}

/// An application together with its owned documents, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithDocuments {
    #[serde(flatten)]
    pub application: Application,
    pub documents: Vec<ApplicationDocument>,
}

/// DTO for creating a new application.
///
/// Status is not part of the DTO: every new application starts `pending`
/// via the column default, regardless of what the client sent.
#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub customer_name: String,
    pub phone: String,
    pub service_id: String,
    pub service_name: String,
    pub message: Option<String>,
}

/// DTO for attaching one validated document during creation.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
}

/// DTO for patching an existing application. `None` fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateApplication {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub service_id: Option<String>,
    pub service_name: Option<String>,
}
