use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Clients match on these,
// never on the human-readable message string.

/// Stable error code constants.
///
/// Clients should match on `code` from `{"code": "NOT_FOUND", "message": "..."}`.
/// Codes never change; messages may be reworded.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const INTERNAL: &str = "INTERNAL";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type used across all modules.
///
/// Each variant maps to a stable error code (see [`error_code`]) and an
/// HTTP status code:
///
/// | Failure | Constructor | Status | Code |
/// |---|---|---|---|
/// | no session on a write or per-user read | [`ServiceError::not_logged_in`] | 401 | `UNAUTHENTICATED` |
/// | path names a user other than the caller | [`ServiceError::foreign_user`] | 403 | `PERMISSION_DENIED` |
/// | bookmark or edge already present | [`ServiceError::already_exists`] | 409 | `ALREADY_EXISTS` |
/// | unknown movie or bookmark | [`ServiceError::not_found`] | 404 | `NOT_FOUND` |
/// | blank user or movie id | `Validation` | 400 | `VALIDATION_FAILED` |
/// | store transaction failed | `Storage` | 500 | `STORAGE_ERROR` |
///
/// The JSON response always includes both:
///
/// ```json
/// {"code": "ALREADY_EXISTS", "message": "bookmark 'U1:tt0111161' already exists"}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate relationship / resource already exists. HTTP 409.
    #[error("{0}")]
    Conflict(String),

    /// Input data is invalid. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// No resolvable session identity. HTTP 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Session exists but the request acts on someone else's behalf. HTTP 403.
    #[error("{0}")]
    PermissionDenied(String),

    /// Storage backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// The caller carries no usable session.
    pub fn not_logged_in() -> Self {
        ServiceError::Unauthorized("user needs to be logged in".into())
    }

    /// The request names a user other than the session holder.
    pub fn foreign_user(user_id: &str) -> Self {
        ServiceError::PermissionDenied(format!("cannot act on behalf of user '{}'", user_id))
    }

    pub fn already_exists(resource: &str, key: &str) -> Self {
        ServiceError::Conflict(format!("{} '{}' already exists", resource, key))
    }

    pub fn not_found(resource: &str, key: &str) -> Self {
        ServiceError::NotFound(format!("{} '{}' not found", resource, key))
    }

    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            ServiceError::PermissionDenied(_) => error_code::PERMISSION_DENIED,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
