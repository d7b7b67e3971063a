//! API Module
//!
//! HTTP handlers and routing for the mock server.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /api/*` - Serve a previously defined mock response
//! - `POST /api/*` - Define a mock response
//! - `PUT /api/*` - Redefine a mock response (bearer-gated when configured)

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
