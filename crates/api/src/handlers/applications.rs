//! Handlers for the `/applications` resource.
//!
//! Submission is the only public operation; everything else requires the
//! `admin` role. Validation happens here, before any repository call.

use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sevadesk_core::error::CoreError;
use sevadesk_core::status::ApplicationStatus;
use sevadesk_core::submission::{validate_submission, SubmissionFields};
use sevadesk_core::types::DbId;
use sevadesk_db::models::application::{
    Application, ApplicationWithDocuments, CreateApplication, UpdateApplication,
};
use sevadesk_db::repositories::ApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, MessageResponse};
use crate::state::AppState;
use crate::uploads::{self, SubmissionForm};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// JSON body for `POST /applications` (the no-attachments path).
///
/// Fields default to empty so a missing field surfaces as our uniform
/// validation error rather than a serde decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmitRequest {
    pub customer_name: String,
    pub phone: String,
    pub service_id: String,
    pub service_name: String,
    pub message: Option<String>,
}

/// Request body for `PATCH /applications/{id}/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
    /// Optional optimistic-concurrency guard; mismatch yields 409.
    pub expected_version: Option<i64>,
}

/// Request body for `PATCH /applications/{id}`.
///
/// Patch-by-presence: only present, non-empty fields overwrite the stored
/// value. Absent and empty-string fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateDetailsRequest {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub service_id: Option<String>,
    pub service_name: Option<String>,
    /// Optional optimistic-concurrency guard; mismatch yields 409.
    pub expected_version: Option<i64>,
}

/// Request body for `POST /applications/bulk-delete`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<DbId>,
}

/// Payload for the bulk-delete confirmation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResult {
    pub deleted_count: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/applications
///
/// Public submission. Accepts `multipart/form-data` (fields plus up to the
/// configured number of documents) or a plain JSON body (fields only).
/// Status is always forced to `pending`.
pub async fn submit(
    State(state): State<AppState>,
    request: Request,
) -> AppResult<(StatusCode, Json<ApiResponse<ApplicationWithDocuments>>)> {
    let form = extract_submission(request).await?;

    validate_submission(&SubmissionFields {
        customer_name: &form.customer_name,
        phone: &form.phone,
        service_id: &form.service_id,
        service_name: &form.service_name,
    })?;

    // Validate the whole batch and write files only after it passes; a
    // rejected batch must leave no trace on disk or in the database.
    let documents = uploads::store_documents(
        &form.files,
        &form.customer_name,
        &form.phone,
        &state.config.uploads.limits(),
        &state.config.uploads.dir,
    )
    .await?;

    let input = CreateApplication {
        customer_name: form.customer_name,
        phone: form.phone,
        service_id: form.service_id,
        service_name: form.service_name,
        message: form.message,
    };
    let created = ApplicationRepo::create(&state.pool, &input, &documents).await?;

    tracing::info!(
        application_id = created.application.id,
        documents = created.documents.len(),
        "Application submitted"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(created))))
}

/// GET /api/v1/applications
///
/// All applications, most recently submitted first.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<ApplicationWithDocuments>>>> {
    let applications = ApplicationRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::new(applications)))
}

/// PATCH /api/v1/applications/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<ApplicationWithDocuments>>> {
    let status = input
        .status
        .as_deref()
        .ok_or_else(|| AppError::Core(CoreError::Validation("Status is required".into())))?;
    let status = ApplicationStatus::parse(status)?;

    let updated =
        ApplicationRepo::update_status(&state.pool, id, status.as_str(), input.expected_version)
            .await?;

    match updated {
        Some(application) => Ok(Json(ApiResponse::new(
            with_documents(&state, application).await?,
        ))),
        None => Err(update_miss(&state, id, input.expected_version).await),
    }
}

/// PATCH /api/v1/applications/{id}
pub async fn update_details(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDetailsRequest>,
) -> AppResult<Json<ApiResponse<ApplicationWithDocuments>>> {
    let status = match present(input.status) {
        Some(raw) => Some(ApplicationStatus::parse(&raw)?),
        None => None,
    };

    let patch = UpdateApplication {
        customer_name: present(input.customer_name),
        phone: present(input.phone),
        message: present(input.message),
        status: status.map(|s| s.as_str().to_string()),
        service_id: present(input.service_id),
        service_name: present(input.service_name),
    };

    let updated = ApplicationRepo::update(&state.pool, id, &patch, input.expected_version).await?;

    match updated {
        Some(application) => Ok(Json(ApiResponse::new(
            with_documents(&state, application).await?,
        ))),
        None => Err(update_miss(&state, id, input.expected_version).await),
    }
}

/// DELETE /api/v1/applications/{id}
///
/// Physical, irreversible removal. Deleting an already-removed id reports
/// 404 rather than silently succeeding, to surface operator errors.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let removed = ApplicationRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }));
    }

    tracing::info!(application_id = id, "Application deleted");
    Ok(Json(MessageResponse::new("Application removed")))
}

/// POST /api/v1/applications/bulk-delete
///
/// Removes the given id set in one statement and reports the count
/// actually removed, which may be less than requested when some ids
/// did not exist.
pub async fn bulk_delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<BulkDeleteRequest>,
) -> AppResult<Json<ApiResponse<BulkDeleteResult>>> {
    if input.ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No ids provided".into(),
        )));
    }

    let deleted_count = ApplicationRepo::delete_many(&state.pool, &input.ids).await?;
    tracing::info!(
        requested = input.ids.len(),
        deleted = deleted_count,
        "Bulk delete"
    );

    Ok(Json(ApiResponse::new(BulkDeleteResult { deleted_count })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decode the submission from either supported content type.
async fn extract_submission(request: Request) -> AppResult<SubmissionForm> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = axum::extract::Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return uploads::parse_multipart(multipart).await;
    }

    let Json(input) = Json::<SubmitRequest>::from_request(request, &())
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(SubmissionForm {
        customer_name: input.customer_name,
        phone: input.phone,
        service_id: input.service_id,
        service_name: input.service_name,
        message: input.message,
        files: Vec::new(),
    })
}

/// Treat empty strings as absent, per the patch-by-presence policy.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Attach the owned documents to a freshly updated application row.
async fn with_documents(
    state: &AppState,
    application: Application,
) -> AppResult<ApplicationWithDocuments> {
    let documents = ApplicationRepo::documents_for(&state.pool, application.id).await?;
    Ok(ApplicationWithDocuments {
        application,
        documents,
    })
}

/// Decide why a guarded update matched no row: a version mismatch on an
/// existing record is a 409, everything else is a 404.
async fn update_miss(state: &AppState, id: DbId, expected_version: Option<i64>) -> AppError {
    if expected_version.is_some() {
        match ApplicationRepo::exists(&state.pool, id).await {
            Ok(true) => {
                return AppError::Core(CoreError::Conflict(
                    "Application was modified by another request. Reload and retry".into(),
                ))
            }
            Ok(false) => {}
            Err(e) => return AppError::Database(e),
        }
    }
    AppError::Core(CoreError::NotFound {
        entity: "Application",
        id,
    })
}
