//! minimock - A record-and-replay mock API server
//!
//! Clients define a canned JSON response for a route plus request body; later
//! requests with the same route and body get that response back. Records are
//! keyed by a SHA-1 fingerprint of the route and canonical body, and live in
//! Redis (or process memory) for seven days.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod mock;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::MockService;
pub use tasks::spawn_cleanup_task;
