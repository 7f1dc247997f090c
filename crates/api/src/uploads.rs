//! Document attachment intake for public submissions.
//!
//! Multipart parts are buffered in memory first; the batch is validated as
//! a whole (count ceiling, then per-file MIME and size) and only then do
//! bytes reach the uploads root. A rejected batch therefore writes nothing
//! to disk and no Application record is created for it.

use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::Multipart;
use sevadesk_core::attachment::{storage_filename, validate_batch, AttachmentLimits, FileCheck};
use sevadesk_db::models::application::CreateDocument;

use crate::error::{AppError, AppResult};

/// The decoded fields and files of one submission request.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    pub customer_name: String,
    pub phone: String,
    pub service_id: String,
    pub service_name: String,
    pub message: Option<String>,
    pub files: Vec<IncomingFile>,
}

/// One uploaded file, buffered before validation.
#[derive(Debug)]
pub struct IncomingFile {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

/// Decode a `multipart/form-data` submission.
///
/// Text parts are matched by the public API's camelCase field names;
/// unknown text fields are ignored. Any part carrying a filename is
/// treated as a document regardless of its field name.
pub async fn parse_multipart(mut multipart: Multipart) -> AppResult<SubmissionForm> {
    let mut form = SubmissionForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.file_name().is_some() {
            let original_name = field
                .file_name()
                .unwrap_or("document")
                .to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            form.files.push(IncomingFile {
                original_name,
                mime_type,
                bytes,
            });
            continue;
        }

        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "customerName" => form.customer_name = value,
            "phone" => form.phone = value,
            "serviceId" => form.service_id = value,
            "serviceName" => form.service_name = value,
            "message" => form.message = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

/// Validate the document batch and persist each file under `dir`.
///
/// Storage names follow `{customer}_{phone}_{epoch_millis}.{ext}`; the
/// timestamp is taken per file at write time, so sequential writes within
/// one batch land on distinct names at millisecond granularity. Returns
/// the metadata rows to attach to the application, in upload order.
pub async fn store_documents(
    files: &[IncomingFile],
    customer_name: &str,
    phone: &str,
    limits: &AttachmentLimits,
    dir: &Path,
) -> AppResult<Vec<CreateDocument>> {
    let checks: Vec<FileCheck<'_>> = files
        .iter()
        .map(|f| FileCheck {
            original_name: &f.original_name,
            mime_type: &f.mime_type,
            size_bytes: f.bytes.len() as u64,
        })
        .collect();
    let mimes = validate_batch(&checks, limits)?;

    if files.is_empty() {
        return Ok(Vec::new());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create uploads dir: {e}")))?;

    let mut documents = Vec::with_capacity(files.len());
    for (file, mime) in files.iter().zip(mimes) {
        let stored_name = storage_filename(
            customer_name,
            phone,
            chrono::Utc::now().timestamp_millis(),
            &file.original_name,
        );
        tokio::fs::write(dir.join(&stored_name), &file.bytes)
            .await
            .map_err(|e| {
                AppError::InternalError(format!(
                    "Failed to store document '{}': {e}",
                    file.original_name
                ))
            })?;
        documents.push(CreateDocument {
            original_name: file.original_name.clone(),
            stored_name,
            mime_type: mime.to_string(),
            size_bytes: file.bytes.len() as i64,
        });
    }

    Ok(documents)
}
