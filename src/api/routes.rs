//! API Routes
//!
//! Configures the Axum router with all mock server endpoints.

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::handlers::{
    define_handler, health_handler, lookup_handler, redefine_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health`, `GET /` - Health check
/// - `GET /api/*` - Look up a mock record (body optional)
/// - `POST /api/*` - Define a mock record
/// - `PUT /api/*` - Redefine a mock record, bearer-gated when `AUTH_KEY` is set
///
/// # Middleware
/// - Panic recovery: A panicking handler becomes a 500 response
/// - Security headers: nosniff, SAMEORIGIN framing, XSS filter
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route(
            "/api/*route",
            get(lookup_handler)
                .post(define_handler)
                .put(redefine_handler),
        );

    with_middleware(router).with_state(state)
}

/// Wraps a router in the server-wide middleware stack.
fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CatchPanicLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
