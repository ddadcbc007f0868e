//! REST API error types
//!
//! Every service renders failures through [`ApiError`] so clients see one
//! JSON shape regardless of which process answered.

use ms_auth::AuthError;
use ms_core::CoreError;
use ms_db::DbError;

use std::collections::BTreeMap;
use std::panic::Location;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";
const INVALID_CREDENTIALS_MESSAGE: &str = "Username or password is incorrect";

/// JSON error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable kind, e.g. `not_found`
    pub error: String,
    pub message: String,
    /// Per-field messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
    pub timestamp: DateTime<Utc>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Wrong username or password (401)
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Missing, malformed or rejected token (401, empty body)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Authenticated but lacking a role (403)
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// Malformed request (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        details: BTreeMap<String, String>,
        location: ErrorLocation,
    },

    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Duplicate unique value (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Peer dependency failed with no fallback engaged (503)
    #[error("Service unavailable: {message} {location}")]
    ServiceUnavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500); detail stays in the log
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Single-field validation failure.
    #[track_caller]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Validation {
            details: BTreeMap::from([(field.to_string(), message.clone())]),
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials { .. } | Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "invalid_credentials",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Forbidden { .. } => "forbidden",
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::ServiceUnavailable { .. } => "service_unavailable",
            Self::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.kind().to_string();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let (message, details) = match self {
            ApiError::Unauthorized { .. } => return status.into_response(),
            ApiError::InvalidCredentials { .. } => (INVALID_CREDENTIALS_MESSAGE.to_string(), None),
            ApiError::Validation {
                message, details, ..
            } => (message, Some(details)),
            ApiError::Internal { .. } => (INTERNAL_ERROR_MESSAGE.to_string(), None),
            ApiError::Forbidden { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Conflict { message, .. }
            | ApiError::ServiceUnavailable { message, .. } => (message, None),
        };

        let body = ApiErrorBody {
            error,
            message,
            details,
            timestamp: Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}

/// Convert auth errors to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if e.is_token_rejection() {
            return ApiError::Unauthorized {
                message: e.to_string(),
                location,
            };
        }

        match e {
            AuthError::AuthenticationFailed { .. } => ApiError::InvalidCredentials { location },
            AuthError::Forbidden { required, .. } => ApiError::Forbidden {
                message: format!("Access denied: requires one of {}", required.join(", ")),
                location,
            },
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict { message, .. } => ApiError::Conflict {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            other => ApiError::Internal {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Domain rule violations are client errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let (field, message) = match e {
            CoreError::Validation { message, .. } => ("request", message),
            CoreError::InvalidMemberStatus { value, .. } => {
                ("status", format!("Unknown member status: {}", value))
            }
            CoreError::InvalidOrderStatus { value, .. } => {
                ("status", format!("Unknown order status: {}", value))
            }
            CoreError::InvalidAmount { message, .. } => ("amount", message),
        };
        ApiError::validation(field, message)
    }
}

/// Unparseable JSON bodies are reported like any other validation failure
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(e: JsonRejection) -> Self {
        ApiError::validation("body", e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    #[track_caller]
    fn from(e: QueryRejection) -> Self {
        ApiError::validation("query", e.body_text())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
