//! Response DTOs for the mock server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::mock::Fingerprint;

/// Response body for Define and Redefine (POST/PUT /api/*)
#[derive(Debug, Clone, Serialize)]
pub struct DefineResponse {
    /// Fingerprint the record was stored under
    pub id: Fingerprint,
}

impl DefineResponse {
    /// Creates a new DefineResponse
    pub fn new(id: Fingerprint) -> Self {
        Self { id }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, always "ok" while the process serves requests
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
