//! API Handlers
//!
//! HTTP request handlers for each mock server endpoint. They only pull the
//! path, headers and body off the request and hand them to `MockService`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::AccessGate;
use crate::config::{Config, StoreBackend};
use crate::error::Result;
use crate::mock::{MemoryStore, MockStore, RedisStore, StoreResult};
use crate::models::{DefineResponse, HealthResponse};
use crate::service::MockService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator for lookup and write requests
    pub service: Arc<MockService>,
    /// Set when records live in process memory, so the sweep task can reach them
    pub memory: Option<Arc<MemoryStore>>,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: MockService) -> Self {
        Self {
            service: Arc::new(service),
            memory: None,
        }
    }

    /// Creates an AppState backed by a fresh in-memory store.
    pub fn in_memory(config: &Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let service = MockService::new(store.clone(), gate_from(config), config);
        Self {
            service: Arc::new(service),
            memory: Some(store),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Selects the store backend and access gate from the Config.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        match config.store_backend {
            StoreBackend::Memory => Ok(Self::in_memory(config)),
            StoreBackend::Redis => {
                let store: Arc<dyn MockStore> = Arc::new(RedisStore::from_config(config)?);
                Ok(Self::new(MockService::new(store, gate_from(config), config)))
            }
        }
    }
}

fn gate_from(config: &Config) -> AccessGate {
    AccessGate::new(config.auth_key.clone())
}

/// Path plus query string, the route half of the fingerprint input.
fn route_of(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}

/// Handler for GET /api/*
///
/// Serves the stored response for the route and optional body verbatim.
pub async fn lookup_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Response> {
    let value = state.service.lookup(route_of(&uri), &body).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], value).into_response())
}

/// Handler for POST /api/*
///
/// Stores a mock record and echoes its fingerprint. Never gated.
pub async fn define_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Json<DefineResponse>> {
    let id = state.service.define(route_of(&uri), &body).await?;

    Ok(Json(DefineResponse::new(id)))
}

/// Handler for PUT /api/*
///
/// Like POST, but requires `Authorization: Bearer <AUTH_KEY>` when a key is configured.
pub async fn redefine_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DefineResponse>> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let id = state
        .service
        .redefine(route_of(&uri), authorization, &body)
        .await?;

    Ok(Json(DefineResponse::new(id)))
}

/// Handler for GET /health and GET /
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
