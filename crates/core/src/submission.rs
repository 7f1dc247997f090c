//! Required-field validation for public application submissions.

use crate::error::CoreError;

/// The four fields a submission must carry non-empty.
///
/// Phone numbers are deliberately not format-validated here; the intake
/// form accepts whatever the customer typed and triage happens by hand.
#[derive(Debug)]
pub struct SubmissionFields<'a> {
    pub customer_name: &'a str,
    pub phone: &'a str,
    pub service_id: &'a str,
    pub service_name: &'a str,
}

/// Reject a submission whose required fields are missing or blank.
pub fn validate_submission(fields: &SubmissionFields<'_>) -> Result<(), CoreError> {
    for (label, value) in [
        ("customerName", fields.customer_name),
        ("phone", fields.phone),
        ("serviceId", fields.service_id),
        ("serviceName", fields.service_name),
    ] {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Required field '{label}' is missing"
            )));
        }
    }
    Ok(())
}
