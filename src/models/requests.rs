//! Request DTOs for the mock server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Request body for Define and Redefine (POST/PUT /api/*)
///
/// # Fields
/// - `response`: The JSON document to serve back on lookup
/// - `body`: Optional request payload the response is matched against
///
/// Explicit `null` is treated the same as an absent field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefineRequest {
    /// Canned response to store
    #[serde(default)]
    pub response: Option<Value>,
    /// Payload whose canonical form feeds the fingerprint
    #[serde(default)]
    pub body: Option<Value>,
}
