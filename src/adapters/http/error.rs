//! API Error Responses
//!
//! Uniform JSON error envelope for every endpoint: `{ error, message,
//! suggestion? }` with the mapped status code. Upstream and internal
//! failures map to 500; only malformed client input maps to 400.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::adapters::jupiter::JupiterError;
use crate::ports::SourceError;

/// Error returned by route handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    message: String,
    suggestion: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
}

impl ApiError {
    /// Upstream or internal failure (500)
    pub fn upstream(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Malformed client input (400)
    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a remediation hint for the client
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.error,
            message: &self.message,
            suggestion: self.suggestion.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        ApiError::upstream("Upstream source failed", err.to_string())
    }
}

impl From<JupiterError> for ApiError {
    fn from(err: JupiterError) -> Self {
        ApiError::upstream("Jupiter request failed", err.to_string())
    }
}
