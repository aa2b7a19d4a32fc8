use std::str::FromStr;

use sustaineco_core::media::MAX_IMAGE_BYTES;
use sustaineco_db::BackendConfig;

/// Default request body limit: the image limit plus 64 KiB for the text
/// fields sent next to it.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = MAX_IMAGE_BYTES + 64 * 1024;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines (default).
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the backend connection have defaults suitable for
/// local development.
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
    /// Largest accepted request body. Defaults to the image limit plus room
    /// for the accompanying form fields.
    pub max_upload_bytes: usize,
    /// Page the password-reset email links back to.
    pub password_reset_redirect: String,
    pub log_format: LogFormat,
    /// Managed backend connection.
    pub backend: BackendConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                 |
    /// |---------------------------|-----------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                               |
    /// | `PORT`                    | `3000`                                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`                 |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                    |
    /// | `MAX_UPLOAD_BYTES`        | 5 MiB + 64 KiB                          |
    /// | `PASSWORD_RESET_REDIRECT` | `http://localhost:5173/reset-password`  |
    /// | `LOG_FORMAT`              | `pretty`                                |
    ///
    /// The backend variables are documented on [`BackendConfig::from_env`].
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

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let password_reset_redirect = std::env::var("PASSWORD_RESET_REDIRECT")
            .unwrap_or_else(|_| "http://localhost:5173/reset-password".into());

        let log_format = std::env::var("LOG_FORMAT")
            .unwrap_or_default()
            .parse()
            .unwrap_or_else(|e| panic!("LOG_FORMAT is invalid: {e}"));

        let backend = BackendConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            password_reset_redirect,
            log_format,
            backend,
        }
    }
}
