use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sustaineco_core::error::CoreError;
use sustaineco_db::BackendError;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`BackendError`] for managed
/// backend failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sustaineco_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A managed backend call failed without a more specific message.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// A managed backend call failed; `message` is what the user sees.
    #[error("{message}: {source}")]
    BackendFailed {
        message: &'static str,
        #[source]
        source: BackendError,
    },

    /// A multipart body that could not be read.
    #[error("Invalid form data: {0}")]
    Multipart(#[from] MultipartError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Attach the user-facing message to a failed backend call.
pub trait BackendContext<T> {
    fn or_fail(self, message: &'static str) -> AppResult<T>;
}

impl<T> BackendContext<T> for Result<T, BackendError> {
    fn or_fail(self, message: &'static str) -> AppResult<T> {
        self.map_err(|source| AppError::BackendFailed { message, source })
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(describe_validation(&errors)))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Backend errors ---
            AppError::Backend(err) => {
                classify_backend_error(err, "The content service request failed")
            }
            AppError::BackendFailed { message, source } => classify_backend_error(source, message),

            // --- HTTP-specific errors ---
            AppError::Multipart(err) => (err.status(), "INVALID_FORM", err.body_text()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a backend error into an HTTP status, error code, and message.
///
/// - Session problems map to 401.
/// - Rejections and unreachable backends map to 502 with `message`.
/// - Undecodable rows map to 500.
fn classify_backend_error(
    err: &BackendError,
    message: &str,
) -> (StatusCode, &'static str, String) {
    match err {
        BackendError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Session is missing or expired".to_string(),
        ),
        BackendError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid email or password".to_string(),
        ),
        BackendError::Api { status, body } => {
            tracing::error!(status, body = %body, "{message}");
            (StatusCode::BAD_GATEWAY, "BACKEND_ERROR", message.to_string())
        }
        BackendError::Request(e) => {
            tracing::error!(error = %e, "{message}");
            (StatusCode::BAD_GATEWAY, "BACKEND_UNAVAILABLE", message.to_string())
        }
        BackendError::Decode(e) => {
            tracing::error!(error = %e, "{message}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                message.to_string(),
            )
        }
    }
}

/// Flatten field errors into one message, fields in name order.
fn describe_validation(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
