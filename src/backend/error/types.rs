//! Backend Error Types
//!
//! `ApiError` maps the failure taxonomy onto HTTP status codes:
//!
//! - validation errors (malformed identifier, empty payload) -> 400
//! - missing/invalid credentials -> 401
//! - not a participant -> 403
//! - missing record -> 404
//! - everything unexpected -> 500 with a generic message
//!
//! Internal detail (database errors, upstream failures) is logged server-side
//! and never leaks into a response body. Clients surface the `message` field
//! verbatim, so user-facing variants carry text worth showing.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::SharedError;

/// JSON body returned for every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub message: String,
}

/// Errors produced by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (bad identifier, empty payload)
    #[error("{message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid credentials
    #[error("{message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Authenticated but not allowed to act on this resource
    #[error("{message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// The requested record does not exist
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected internal failure; detail stays server-side
    #[error("Internal server error")]
    Internal {
        /// Internal detail, logged but never sent to the client
        detail: String,
    },

    /// Database failure; reported as a generic server error
    #[error("Internal server error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// Create a validation error (400)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unauthorized error (401)
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a forbidden error (403)
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a not-found error (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an internal error (500) with server-side detail
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// The HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SharedError> for ApiError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { .. } => Self::validation(err.to_string()),
            SharedError::SerializationError { .. } => Self::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 500s log their detail and respond with a generic message only.
        match &self {
            Self::Internal { detail } => {
                tracing::error!("Internal error: {}", detail);
            }
            Self::Database(e) => {
                tracing::error!("Database error: {:?}", e);
            }
            _ => {}
        }

        let body = ErrorBody {
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("bad id").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("not yours").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_never_leaks() {
        let error = ApiError::internal("connection string leaked");
        assert_eq!(error.to_string(), "Internal server error");
    }

    #[test]
    fn test_database_error_is_generic() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "Internal server error");
    }

    #[test]
    fn test_user_facing_message_preserved() {
        let error = ApiError::forbidden("Unauthorized to delete this message");
        assert_eq!(error.to_string(), "Unauthorized to delete this message");
    }

    #[test]
    fn test_from_shared_validation() {
        let shared = SharedError::validation("text", "cannot be empty");
        let error: ApiError = shared.into();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
