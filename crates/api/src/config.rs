use std::path::PathBuf;

use sevadesk_core::attachment::{
    AttachmentLimits, DEFAULT_MAX_ATTACHMENTS, DEFAULT_MAX_UPLOAD_BYTES,
};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry window).
    pub jwt: JwtConfig,
    /// Attachment storage configuration.
    pub uploads: UploadConfig,
    /// Administrator credentials synced into the database at startup.
    /// `None` when `ADMIN_EMAIL`/`ADMIN_PASSWORD` are not set; the
    /// bootstrap step is skipped in that case.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Where uploaded documents land and how large a submission may be.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are written to (default: `./uploads`).
    /// Created at startup if absent; also served statically at `/uploads`.
    pub dir: PathBuf,
    /// Per-file size ceiling in bytes (default: 10 MiB).
    pub max_bytes: u64,
    /// Maximum number of documents per submission (default: 5).
    pub max_attachments: usize,
}

impl UploadConfig {
    /// The ceilings as the domain layer's validation input.
    pub fn limits(&self) -> AttachmentLimits {
        AttachmentLimits {
            max_bytes: self.max_bytes,
            max_count: self.max_attachments,
        }
    }

    /// Request body cap for the submission route: every file at the
    /// per-file ceiling, plus headroom for text fields and part framing.
    pub fn body_limit(&self) -> usize {
        self.max_bytes as usize * self.max_attachments + 256 * 1024
    }
}

/// Deployment-supplied administrator identity.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default         |
    /// |------------------------|-----------------|
    /// | `HOST`                 | `0.0.0.0`       |
    /// | `PORT`                 | `3000`          |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`            |
    /// | `UPLOADS_DIR`          | `./uploads`     |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`      |
    /// | `MAX_ATTACHMENTS`      | `5`             |
    /// | `ADMIN_EMAIL`          | unset (bootstrap skipped) |
    /// | `ADMIN_PASSWORD`       | unset (bootstrap skipped) |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric values or a missing `JWT_SECRET`,
    /// which is the desired behaviour -- misconfiguration fails fast.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let uploads_dir =
            PathBuf::from(std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".into()));

        let max_bytes: u64 = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid u64");

        let max_attachments: usize = std::env::var("MAX_ATTACHMENTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTACHMENTS.to_string())
            .parse()
            .expect("MAX_ATTACHMENTS must be a valid usize");

        let bootstrap_admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD"))
        {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(BootstrapAdmin { email, password })
            }
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            uploads: UploadConfig {
                dir: uploads_dir,
                max_bytes,
                max_attachments,
            },
            bootstrap_admin,
        }
    }
}
