//! Application workflow status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a service application.
///
/// Submissions always start as `Pending`; an administrator toggles the
/// record to `Completed` (and back) during triage. Stored as lowercase
/// text in the `applications.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Completed,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Completed => "completed",
        }
    }

    /// Parse a status token from client input.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "completed" => Ok(ApplicationStatus::Completed),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Expected 'pending' or 'completed'"
            ))),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
