//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Reelhouse                              │
//! │                                                                         │
//! │  Handler: Result<Json<T>, ApiError>                                    │
//! │         │                                                               │
//! │         ├── DbError ──────► CoreError::Internal ──┐                    │
//! │         ├── AuthError ────► CoreError::Malformed.. ├──► ErrorKind      │
//! │         ├── CoreError ─────────────────────────────┘        │          │
//! │         │                                                   ▼          │
//! │         │                                     ApiError { code, message }│
//! │         │                                                   │          │
//! │         ▼                                                   ▼          │
//! │      200 + JSON                             status from code + JSON    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Mapping
//! | Code               | Status |
//! |--------------------|--------|
//! | `BAD_REQUEST`      | 400    |
//! | `INVALID_TOKEN`    | 400    |
//! | `ALREADY_RETURNED` | 400    |
//! | `UNAUTHENTICATED`  | 401    |
//! | `FORBIDDEN`        | 403    |
//! | `NOT_FOUND`        | 404    |
//! | `INTERNAL`         | 500    |
//!
//! Several codes share 400; clients tell them apart by `code`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reel_core::{CoreError, ErrorKind, ValidationError};
use reel_db::{DbError, LedgerError};
use serde::Serialize;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "The movie with the given ID was not found."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or invalid input, unknown reference, out of stock (400)
    BadRequest,

    /// No token supplied (401)
    Unauthenticated,

    /// Token supplied but unusable (400)
    InvalidToken,

    /// Authenticated without the required role (403)
    Forbidden,

    /// Resource not found (404)
    NotFound,

    /// The rental was already closed (400)
    AlreadyReturned,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest | ErrorCode::InvalidToken | ErrorCode::AlreadyReturned => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Unauthenticated => ErrorCode::Unauthenticated,
            ErrorKind::InvalidCredentialFormat => ErrorCode::InvalidToken,
            ErrorKind::Forbidden => ErrorCode::Forbidden,
            ErrorKind::BadRequest => ErrorCode::BadRequest,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::AlreadyReturned => ErrorCode::AlreadyReturned,
            ErrorKind::Internal => ErrorCode::Internal,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error for a path id.
    pub fn not_found(entity: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("The {} with the given ID was not found.", entity),
        )
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }
}

/// Converts core errors to API errors.
///
/// Internal details are logged here and replaced with a generic message.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = ErrorCode::from(err.kind());
        match err {
            CoreError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                ApiError::new(code, "Something failed.")
            }
            other => ApiError::new(code, other.to_string()),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::from(CoreError::from(err))
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::from(CoreError::from(err))
    }
}

/// Converts stock failures outside a rental (catalog edits).
impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::OutOfStock { movie_id } => CoreError::NotInStock { movie_id }.into(),
            LedgerError::NotFound { .. } => ApiError::not_found("movie"),
            err @ LedgerError::NegativeCount { .. } => ApiError::bad_request(err.to_string()),
            LedgerError::Db(e) => e.into(),
        }
    }
}

/// Malformed JSON bodies are client errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}
