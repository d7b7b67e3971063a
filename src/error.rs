//! Error types for the mock server
//!
//! Every failure a request can hit maps to one variant here, and each variant
//! has a fixed HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Mock Error Enum ==
/// Unified error type for the mock server.
#[derive(Error, Debug)]
pub enum MockError {
    /// Body present but not a single JSON object
    #[error("cannot unmarshal request body")]
    MalformedPayload,

    /// Write request arrived without a body
    #[error("there is no request body")]
    EmptyPayload,

    /// Write payload has no `response` field
    #[error("missing request response")]
    MissingResponse,

    /// No record stored under the derived fingerprint
    #[error("data needs to be set before GET")]
    RecordNotFound,

    /// Write credential check failed
    #[error("unauthorized")]
    Unauthorized,

    /// Key-value store unreachable, erroring, or timed out
    #[error("cannot connect to database: {0}")]
    StoreUnavailable(String),
}

impl MockError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            MockError::MalformedPayload
            | MockError::EmptyPayload
            | MockError::MissingResponse
            | MockError::RecordNotFound => StatusCode::BAD_REQUEST,
            MockError::Unauthorized => StatusCode::UNAUTHORIZED,
            MockError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Transport details stay in the logs
        let message = match &self {
            MockError::StoreUnavailable(_) => "cannot connect to database".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the mock server.
pub type Result<T> = std::result::Result<T, MockError>;
