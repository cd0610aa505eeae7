// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use corkboard_core::Error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::STORE_TIMEOUT;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Domain error carried to the HTTP boundary.
///
/// Authentication failures collapse to generic messages; 5xx causes are
/// logged and never echoed to the client.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::TokenInvalid
            | Error::TokenExpired
            | Error::Unauthenticated
            | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::UsernameTaken(_) | Error::EmailTaken(_) => StatusCode::CONFLICT,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Configuration(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match &self.0 {
            Error::TokenInvalid | Error::TokenExpired => "Invalid or expired token".to_string(),
            Error::Unauthenticated => "Authentication required".to_string(),
            Error::InvalidCredentials => "Invalid username or password".to_string(),
            Error::Forbidden => "Access denied".to_string(),
            Error::StoreUnavailable(_) => "Service temporarily unavailable".to_string(),
            Error::Configuration(_) | Error::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else if self.0.is_authentication_failure() {
            tracing::debug!(error = %self.0, "Authentication failed");
        }

        let mut response =
            (status, Json(ErrorResponse::new(self.public_message()))).into_response();
        // Transient store failures: ask clients to wait out one store timeout
        if self.0.is_retryable() {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(STORE_TIMEOUT.as_secs()),
            );
        }
        response
    }
}
