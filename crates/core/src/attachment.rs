//! Attachment validation rules and storage-filename derivation.
//!
//! Every file uploaded with a submission is checked against the allowed
//! MIME set and size/count ceilings *before* any bytes reach disk. A single
//! bad file fails the whole batch -- there is no partial acceptance.

use crate::error::CoreError;

/// MIME types accepted for application documents.
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";

/// Default per-file size ceiling: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Default maximum number of documents per submission.
pub const DEFAULT_MAX_ATTACHMENTS: usize = 5;

/// Configured ceilings for a submission's document batch.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentLimits {
    /// Per-file size ceiling in bytes.
    pub max_bytes: u64,
    /// Maximum number of files in one submission.
    pub max_count: usize,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_count: DEFAULT_MAX_ATTACHMENTS,
        }
    }
}

/// Declared metadata for one uploaded file, checked before it is written.
#[derive(Debug)]
pub struct FileCheck<'a> {
    pub original_name: &'a str,
    pub mime_type: &'a str,
    pub size_bytes: u64,
}

/// Map a declared MIME type onto the canonical allowed set.
///
/// `image/jpg` is a common browser alias and normalizes to `image/jpeg`.
/// Returns `None` for anything outside the allowed set.
pub fn normalize_mime(declared: &str) -> Option<&'static str> {
    match declared.to_ascii_lowercase().as_str() {
        "application/pdf" => Some(MIME_PDF),
        "image/jpeg" | "image/jpg" => Some(MIME_JPEG),
        "image/png" => Some(MIME_PNG),
        _ => None,
    }
}

/// Validate a whole document batch against the configured limits.
///
/// Checks the batch count first, then each file's MIME type and size.
/// Any failure rejects the entire batch. On success, returns the
/// canonical MIME type for each file in input order.
pub fn validate_batch(
    files: &[FileCheck<'_>],
    limits: &AttachmentLimits,
) -> Result<Vec<&'static str>, CoreError> {
    if files.len() > limits.max_count {
        return Err(CoreError::InvalidAttachment(format!(
            "Too many documents: {} uploaded, at most {} allowed",
            files.len(),
            limits.max_count
        )));
    }

    let mut mimes = Vec::with_capacity(files.len());
    for file in files {
        let Some(mime) = normalize_mime(file.mime_type) else {
            return Err(CoreError::InvalidAttachment(format!(
                "'{}' has disallowed type '{}'. Only PDF, JPEG, and PNG are accepted",
                file.original_name, file.mime_type
            )));
        };
        if file.size_bytes > limits.max_bytes {
            return Err(CoreError::InvalidAttachment(format!(
                "'{}' is {} bytes, exceeding the {} byte limit",
                file.original_name, file.size_bytes, limits.max_bytes
            )));
        }
        mimes.push(mime);
    }

    Ok(mimes)
}

/// Derive the storage filename for an uploaded document.
///
/// Convention: `{customer_name}_{phone}_{epoch_millis}.{ext}`
///
/// - whitespace runs in the customer name collapse to a single `_`
/// - path separators and NUL are stripped from name and phone
/// - the original extension (text after the last `.`) is preserved;
///   a file with no extension gets none
///
/// Collisions are avoided by millisecond timestamp granularity rather than
/// an explicit uniqueness check.
pub fn storage_filename(
    customer_name: &str,
    phone: &str,
    epoch_millis: i64,
    original_name: &str,
) -> String {
    let name = sanitize_component(customer_name);
    let phone = sanitize_component(phone);

    let mut filename = format!("{name}_{phone}_{epoch_millis}");
    if let Some(ext) = extension_of(original_name) {
        filename.push('.');
        filename.push_str(ext);
    }
    filename
}

/// Collapse whitespace runs to `_` and drop path-hostile characters.
fn sanitize_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if matches!(c, '/' | '\\' | '\0') {
            continue;
        }
        out.push(c);
    }
    out
}

/// The extension of `name`, if it has one (text after the last `.`).
fn extension_of(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext)
}
